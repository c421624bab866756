use serde::Serialize;

use crate::step::ProcessSnapshot;

/// Aggregate statistics of a finished run
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub stats: Vec<ProcessSnapshot>,
    pub avg_wait: f64,
    pub avg_turnaround: f64,
}

impl Summary {
    /// Averages waiting and turnaround times over `final_stats`.
    ///
    /// An empty set averages to zero.
    pub fn from_final_stats(final_stats: &[ProcessSnapshot]) -> Summary {
        let mean = |total: u64| {
            if final_stats.is_empty() {
                0.0
            } else {
                total as f64 / final_stats.len() as f64
            }
        };

        Summary {
            stats: final_stats.to_vec(),
            avg_wait: mean(final_stats.iter().map(|p| p.waiting_time).sum()),
            avg_turnaround: mean(final_stats.iter().map(|p| p.turnaround_time).sum()),
        }
    }
}

//! Messages produced by a running simulation.
//!
//! Every value here serializes to the JSON shape the delivery layer forwards
//! to observers:
//!
//! ```text
//! {"time": 3, "cpu": {...} | "Idle", "ready_queue": [...], "completed": [...], "event": "START"}
//! {"final_stats": [...]}
//! ```

use std::fmt;

use serde::{Serialize, Serializer};

use crate::common_types::Timestamp;

/// Every field of a process, by name, as seen by observers
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProcessSnapshot {
    pub pid: String,
    pub arrival_time: u64,
    pub burst_time: u64,
    pub priority: u32,
    pub remaining_time: u64,
    /// `-1` until the process is first dispatched
    pub start_time: i64,
    /// `-1` until the process finishes
    pub completion_time: i64,
    pub waiting_time: u64,
    pub turnaround_time: u64,
}

/// What occupies the execution unit
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CpuSlot {
    Idle,
    Running(ProcessSnapshot),
}

impl CpuSlot {
    pub fn running(&self) -> Option<&ProcessSnapshot> {
        match self {
            CpuSlot::Idle => None,
            CpuSlot::Running(snap) => Some(snap),
        }
    }
}

impl Serialize for CpuSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CpuSlot::Idle => serializer.serialize_str("Idle"),
            CpuSlot::Running(snap) => snap.serialize(serializer),
        }
    }
}

/// Contents of the ready structure at the moment of a snapshot
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ReadyView {
    /// A single queue, in dispatch order
    #[serde(rename = "ready_queue")]
    Queue(Vec<ProcessSnapshot>),
    /// One queue per priority level, highest priority first
    #[serde(rename = "ready_queues")]
    Levels(Vec<Vec<ProcessSnapshot>>),
}

impl ReadyView {
    /// All ready processes, level by level.
    pub fn processes(&self) -> Vec<&ProcessSnapshot> {
        match self {
            ReadyView::Queue(queue) => queue.iter().collect(),
            ReadyView::Levels(levels) => levels.iter().flatten().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ReadyView::Queue(queue) => queue.is_empty(),
            ReadyView::Levels(levels) => levels.iter().all(Vec::is_empty),
        }
    }
}

/// Tag attached to the discontinuous steps of the event driven scheduler
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepEvent {
    Start,
    Finish,
    IdleUntil(Timestamp),
}

impl fmt::Display for StepEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepEvent::Start => f.write_str("START"),
            StepEvent::Finish => f.write_str("FINISH"),
            StepEvent::IdleUntil(time) => write!(f, "IDLE_UNTIL_{}", time),
        }
    }
}

impl Serialize for StepEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// State of the simulation at one instant
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub time: Timestamp,
    pub cpu: CpuSlot,
    #[serde(flatten)]
    pub ready: ReadyView,
    pub completed: Vec<ProcessSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<StepEvent>,
}

/// One element of the step sequence
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Step {
    /// A scheduling decision at one instant
    Progress(Snapshot),
    /// The completed set, emitted once after the last progress step
    FinalStats { final_stats: Vec<ProcessSnapshot> },
    /// Idle state after the run, always the last step
    Terminal(Snapshot),
}

impl Step {
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            Step::Progress(snap) | Step::Terminal(snap) => Some(snap),
            Step::FinalStats { .. } => None,
        }
    }

    pub fn final_stats(&self) -> Option<&[ProcessSnapshot]> {
        match self {
            Step::FinalStats { final_stats } => Some(final_stats.as_slice()),
            _ => None,
        }
    }

    pub fn is_progress(&self) -> bool {
        matches!(self, Step::Progress(_))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn snap(pid: &str) -> ProcessSnapshot {
        ProcessSnapshot {
            pid: pid.to_string(),
            arrival_time: 0,
            burst_time: 2,
            priority: 0,
            remaining_time: 2,
            start_time: 0,
            completion_time: -1,
            waiting_time: 0,
            turnaround_time: 0,
        }
    }

    #[test]
    fn idle_cpu_serializes_as_string() {
        let step = Step::Terminal(Snapshot {
            time: Timestamp::new(9),
            cpu: CpuSlot::Idle,
            ready: ReadyView::Queue(Vec::new()),
            completed: Vec::new(),
            event: None,
        });

        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(
            value,
            json!({"time": 9, "cpu": "Idle", "ready_queue": [], "completed": []})
        );
    }

    #[test]
    fn levels_use_plural_key_and_event_tag() {
        let step = Step::Progress(Snapshot {
            time: Timestamp::new(1),
            cpu: CpuSlot::Running(snap("P2")),
            ready: ReadyView::Levels(vec![vec![], vec![snap("P1")], vec![]]),
            completed: Vec::new(),
            event: Some(StepEvent::IdleUntil(Timestamp::new(4))),
        });

        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value["cpu"]["pid"], "P2");
        assert_eq!(value["ready_queues"][1][0]["pid"], "P1");
        assert!(value.get("ready_queue").is_none());
        assert_eq!(value["event"], "IDLE_UNTIL_4");
    }

    #[test]
    fn final_stats_shape() {
        let step = Step::FinalStats { final_stats: vec![snap("P1")] };
        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value["final_stats"][0]["pid"], "P1");
        assert_eq!(step.final_stats().map(<[_]>::len), Some(1));
    }
}

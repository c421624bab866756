//! Property tests for the scheduling invariants every discipline must keep.

use std::collections::HashMap;

use proptest::prelude::*;

use scheduler::{Discipline, Pid, Process, ProcessSnapshot, Quantum, Simulation, Snapshot, Step, Timestamp};

/// (arrival, burst, priority) for each generated process
fn workload() -> impl Strategy<Value = Vec<(u64, u64, u32)>> {
    prop::collection::vec((0u64..20, 1u64..8, 0u32..3), 0..12)
}

fn build(workload: &[(u64, u64, u32)]) -> Vec<Process> {
    workload
        .iter()
        .enumerate()
        .map(|(i, &(arrival, burst, priority))| {
            Process::new(Pid::new(format!("P{}", i)), Timestamp::new(arrival), burst, priority)
        })
        .collect()
}

fn run(discipline: Discipline, workload: &[(u64, u64, u32)]) -> Vec<Step> {
    Simulation::new(discipline, build(workload))
        .expect("generated workload is valid")
        .collect()
}

fn progress(steps: &[Step]) -> impl Iterator<Item = &Snapshot> {
    steps.iter().filter(|step| step.is_progress()).filter_map(Step::snapshot)
}

fn final_stats(steps: &[Step]) -> Vec<ProcessSnapshot> {
    steps
        .iter()
        .find_map(Step::final_stats)
        .map(<[ProcessSnapshot]>::to_vec)
        .unwrap_or_default()
}

fn disciplines(quantum: Quantum) -> [Discipline; 4] {
    [
        Discipline::Fcfs,
        Discipline::SjfPreemptive,
        Discipline::RoundRobin { quantum },
        Discipline::MultiLevel,
    ]
}

fn quantum() -> impl Strategy<Value = Quantum> {
    (1usize..5).prop_map(|q| Quantum::new(q).unwrap())
}

proptest! {
    #[test]
    fn every_process_completes_once_with_consistent_statistics(
        workload in workload(),
        quantum in quantum(),
    ) {
        for discipline in disciplines(quantum) {
            let steps = run(discipline, &workload);
            let stats = final_stats(&steps);

            prop_assert_eq!(stats.len(), workload.len());

            let mut seen: HashMap<&str, usize> = HashMap::new();
            for p in &stats {
                *seen.entry(p.pid.as_str()).or_default() += 1;
            }
            prop_assert!(seen.values().all(|&count| count == 1));

            for p in &stats {
                prop_assert_eq!(p.remaining_time, 0);
                prop_assert!(p.start_time >= p.arrival_time as i64);
                prop_assert_eq!(p.turnaround_time as i64, p.completion_time - p.arrival_time as i64);
                prop_assert_eq!(p.waiting_time, p.turnaround_time - p.burst_time);
            }

            for pair in stats.windows(2) {
                prop_assert!(pair[0].completion_time <= pair[1].completion_time);
            }

            prop_assert!(matches!(steps.last(), Some(Step::Terminal(_))));
        }
    }

    #[test]
    fn fcfs_completes_in_arrival_order(workload in workload()) {
        let steps = run(Discipline::Fcfs, &workload);

        let mut expected: Vec<(u64, usize)> = workload
            .iter()
            .enumerate()
            .map(|(i, &(arrival, _, _))| (arrival, i))
            .collect();
        expected.sort();
        let expected: Vec<String> = expected.into_iter().map(|(_, i)| format!("P{}", i)).collect();

        let order: Vec<String> = final_stats(&steps).into_iter().map(|p| p.pid).collect();
        prop_assert_eq!(order, expected);
    }

    #[test]
    fn round_robin_never_exceeds_the_quantum(workload in workload(), quantum in quantum()) {
        let steps = run(Discipline::RoundRobin { quantum }, &workload);

        let mut current: Option<String> = None;
        let mut streak = 0usize;
        let mut previous_ready_empty = true;
        for snap in progress(&steps) {
            let pid = snap.cpu.running().map(|p| p.pid.clone());
            if pid.is_some() && pid == current {
                streak += 1;
            } else {
                streak = 1;
            }
            current = pid;

            // a new slice for the same process: nobody else was waiting
            // when its quantum expired
            if streak > 1 && streak % quantum.get() == 1 % quantum.get() {
                prop_assert!(previous_ready_empty, "ran {} units with others waiting", streak);
            }
            previous_ready_empty = snap.ready.is_empty();
        }
    }

    #[test]
    fn sjf_runs_the_shortest_remaining_time(workload in workload()) {
        let steps = run(Discipline::SjfPreemptive, &workload);

        for snap in progress(&steps) {
            if let Some(running) = snap.cpu.running() {
                for ready in snap.ready.processes() {
                    prop_assert!(running.remaining_time <= ready.remaining_time);
                }
            } else {
                prop_assert!(snap.ready.is_empty());
            }
        }
    }

    #[test]
    fn multi_level_runs_the_highest_ready_level(workload in workload()) {
        let steps = run(Discipline::MultiLevel, &workload);

        for snap in progress(&steps) {
            if let Some(running) = snap.cpu.running() {
                for ready in snap.ready.processes() {
                    prop_assert!(running.priority <= ready.priority);
                }
            } else {
                prop_assert!(snap.ready.is_empty());
            }
        }
    }
}

use crate::collector::{collect_all, Collector};
use crate::common_funcs::execute_dispatch;
use crate::common_types::Timestamp;
use crate::process::Process;
use crate::process_manager::{FifoQueue, ProcessManager};
use crate::scheduler::Scheduler;
use crate::scheduler_info::SchedulerInfo;
use crate::step::{CpuSlot, ProcessSnapshot, ReadyView, Snapshot, StepEvent};

/// Non-preemptive first come, first served scheduler
///
/// The scheduler is event driven: the clock jumps from one decision point
/// to the next instead of ticking. A dispatch emits `START`, the end of the
/// running process emits `FINISH` and an empty ready queue with future
/// arrivals emits `IDLE_UNTIL_<t>` before jumping to `t`.
pub struct FcfsScheduler {
    info: SchedulerInfo,
    ready: FifoQueue,
}

impl FcfsScheduler {
    pub(crate) fn new(processes: Vec<Process>) -> FcfsScheduler {
        FcfsScheduler {
            info: SchedulerInfo::new(processes),
            ready: FifoQueue::new(),
        }
    }

    /// Runs the dispatched process to completion in one jump. Arrivals
    /// during the burst join the ready queue without interrupting it.
    fn run_to_completion(&mut self, mut proc: Process) -> Snapshot {
        let burst = proc.remaining_time();
        let finish_time = self.info.get_timestamp() + burst;

        self.info.admit_until(finish_time, &mut self.ready);
        self.info.make_timeskip(burst);
        proc.execute(burst);
        self.info.finalize(proc);

        collect_all(self, Some(StepEvent::Finish))
    }

    fn idle_until(&mut self, next_arrival: Timestamp) -> Snapshot {
        let snapshot = collect_all(self, Some(StepEvent::IdleUntil(next_arrival)));

        let now = self.info.get_timestamp();
        log::trace!("t={} idle until {}", now, next_arrival);
        self.info.make_timeskip(next_arrival.since(now));

        snapshot
    }
}

impl Collector for FcfsScheduler {
    fn collect_time(&self) -> Timestamp {
        self.info.get_timestamp()
    }

    fn collect_running(&self) -> CpuSlot {
        self.info.cpu_slot()
    }

    fn collect_ready(&self) -> ReadyView {
        self.ready.ready_view()
    }

    fn collect_completed(&self) -> Vec<ProcessSnapshot> {
        self.info.completed_snapshots()
    }
}

impl Scheduler for FcfsScheduler {
    fn name(&self) -> &'static str {
        "fcfs"
    }

    fn tick(&mut self) -> Option<Snapshot> {
        if self.info.all_completed() {
            return None;
        }

        if let Some(proc) = self.info.take_running() {
            return Some(self.run_to_completion(proc));
        }

        self.info.admit_arrivals(&mut self.ready);
        if execute_dispatch(&mut self.info, &mut self.ready) {
            return Some(collect_all(self, Some(StepEvent::Start)));
        }

        // nothing ready, nothing running: the next arrival is the next event
        let next_arrival = self.info.next_arrival()?;
        Some(self.idle_until(next_arrival))
    }

    fn info(&self) -> &SchedulerInfo {
        &self.info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common_types::Pid;

    fn proc(pid: &str, arrival: u64, burst: u64) -> Process {
        Process::new(Pid::new(pid), Timestamp::new(arrival), burst, 0)
    }

    fn events(scheduler: &mut FcfsScheduler) -> Vec<(u64, String)> {
        std::iter::from_fn(|| scheduler.tick())
            .map(|snap| (snap.time.get(), snap.event.map(|e| e.to_string()).unwrap_or_default()))
            .collect()
    }

    #[test]
    fn start_and_finish_events_jump_the_clock() {
        let mut scheduler = FcfsScheduler::new(vec![proc("P1", 0, 5), proc("P2", 1, 3)]);

        assert_eq!(
            events(&mut scheduler),
            [
                (0, "START".to_string()),
                (5, "FINISH".to_string()),
                (5, "START".to_string()),
                (8, "FINISH".to_string()),
            ]
        );
    }

    #[test]
    fn idle_gap_is_skipped() {
        let mut scheduler = FcfsScheduler::new(vec![proc("P1", 2, 1), proc("P2", 6, 2)]);

        assert_eq!(
            events(&mut scheduler),
            [
                (0, "IDLE_UNTIL_2".to_string()),
                (2, "START".to_string()),
                (3, "FINISH".to_string()),
                (3, "IDLE_UNTIL_6".to_string()),
                (6, "START".to_string()),
                (8, "FINISH".to_string()),
            ]
        );
    }

    #[test]
    fn arrival_at_finish_time_is_queued_before_finish_snapshot() {
        let mut scheduler = FcfsScheduler::new(vec![proc("P1", 0, 2), proc("P2", 2, 1)]);

        let start = scheduler.tick().unwrap();
        assert_eq!(start.cpu.running().map(|p| p.pid.as_str()), Some("P1"));

        let finish = scheduler.tick().unwrap();
        assert_eq!(finish.cpu, CpuSlot::Idle);
        let ready: Vec<&str> = finish.ready.processes().into_iter().map(|p| p.pid.as_str()).collect();
        assert_eq!(ready, ["P2"]);
        assert_eq!(finish.completed.len(), 1);
    }
}

use crate::collector::{collect_all, Collector};
use crate::common_funcs::{execute_dispatch, execute_tick};
use crate::common_types::Timestamp;
use crate::process::Process;
use crate::process_manager::{PriorityLevels, ProcessManager};
use crate::scheduler::Scheduler;
use crate::scheduler_info::SchedulerInfo;
use crate::step::{CpuSlot, ProcessSnapshot, ReadyView, Snapshot};

/// Fixed priority multi-level queue scheduler
///
/// Every priority level has its own FIFO queue and level 0 runs first. A
/// process keeps the execution unit until it finishes or a process with a
/// higher priority (lower level) becomes ready. There is no time slicing
/// and no aging.
pub struct MultiLevelScheduler {
    info: SchedulerInfo,
    ready: PriorityLevels,
}

impl MultiLevelScheduler {
    /// Creates a new scheduler
    ///
    /// * `processes` - every priority must be below
    ///                 [`PRIORITY_LEVELS`](crate::PRIORITY_LEVELS), which
    ///                 [`Simulation::new`](crate::Simulation::new) checks
    pub(crate) fn new(processes: Vec<Process>) -> MultiLevelScheduler {
        MultiLevelScheduler {
            info: SchedulerInfo::new(processes),
            ready: PriorityLevels::new(),
        }
    }

    fn should_preempt(&self) -> bool {
        match (self.info.get_running(), self.ready.highest_ready_level()) {
            (Some(running), Some(level)) => level < running.priority() as usize,
            _ => false,
        }
    }

    /// Returns the running process to the head of its own level
    fn preempt_running(&mut self) {
        if let Some(proc) = self.info.take_running() {
            log::debug!(
                "t={} preempt {} (priority {})",
                self.info.get_timestamp(),
                proc.pid(),
                proc.priority()
            );
            self.ready.preempt_process(proc);
        }
    }
}

impl Collector for MultiLevelScheduler {
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

impl Scheduler for MultiLevelScheduler {
    fn name(&self) -> &'static str {
        "multi_level"
    }

    fn tick(&mut self) -> Option<Snapshot> {
        if self.info.is_drained(&self.ready) {
            return None;
        }

        self.info.admit_arrivals(&mut self.ready);
        if self.should_preempt() {
            self.preempt_running();
        }
        execute_dispatch(&mut self.info, &mut self.ready);

        let snapshot = collect_all(self, None);
        execute_tick(&mut self.info);

        Some(snapshot)
    }

    fn info(&self) -> &SchedulerInfo {
        &self.info
    }
}

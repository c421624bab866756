use crate::collector::{collect_all, Collector};
use crate::common_funcs::{execute_dispatch, execute_tick};
use crate::common_types::Timestamp;
use crate::process::Process;
use crate::process_manager::{ProcessManager, RemainingTimeHeap};
use crate::scheduler::Scheduler;
use crate::scheduler_info::SchedulerInfo;
use crate::step::{CpuSlot, ProcessSnapshot, ReadyView, Snapshot};

/// Preemptive shortest remaining time first scheduler
///
/// A running process is preempted as soon as a ready process needs strictly
/// less time to finish. Equal remaining times never preempt.
pub struct SjfPreemptiveScheduler {
    info: SchedulerInfo,
    ready: RemainingTimeHeap,
}

impl SjfPreemptiveScheduler {
    pub(crate) fn new(processes: Vec<Process>) -> SjfPreemptiveScheduler {
        SjfPreemptiveScheduler {
            info: SchedulerInfo::new(processes),
            ready: RemainingTimeHeap::new(),
        }
    }

    fn should_preempt(&self) -> bool {
        match (self.info.get_running(), self.ready.min_remaining_time()) {
            (Some(running), Some(shortest)) => shortest < running.remaining_time(),
            _ => false,
        }
    }

    /// Puts the running process back in the heap; it competes again with
    /// the time it has left.
    fn preempt_running(&mut self) {
        if let Some(proc) = self.info.take_running() {
            log::debug!(
                "t={} preempt {} with {} left",
                self.info.get_timestamp(),
                proc.pid(),
                proc.remaining_time()
            );
            self.ready.enqueue_process(proc);
        }
    }
}

impl Collector for SjfPreemptiveScheduler {
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

impl Scheduler for SjfPreemptiveScheduler {
    fn name(&self) -> &'static str {
        "sjf_preemptive"
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

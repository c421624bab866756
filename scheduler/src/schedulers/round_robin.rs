use crate::collector::{collect_all, Collector};
use crate::common_funcs::{execute_dispatch, execute_tick, TickOutcome};
use crate::common_types::{Quantum, Timestamp};
use crate::process::Process;
use crate::process_manager::{FifoQueue, ProcessManager};
use crate::scheduler::Scheduler;
use crate::scheduler_info::SchedulerInfo;
use crate::step::{CpuSlot, ProcessSnapshot, ReadyView, Snapshot};

pub struct RoundRobinScheduler {
    info: SchedulerInfo,
    ready: FifoQueue,
    /// Time quanta of the scheduler
    ///
    /// The maximum time a process can run before being preempted
    quanta: Quantum,
    /// Units the running process has used from its current quanta
    time_slice: usize,
}

impl RoundRobinScheduler {
    pub(crate) fn new(quanta: Quantum, processes: Vec<Process>) -> RoundRobinScheduler {
        RoundRobinScheduler {
            info: SchedulerInfo::new(processes),
            ready: FifoQueue::new(),
            quanta,
            time_slice: 0,
        }
    }

    /// Sends the running process to the tail of the ready queue
    fn enqueue_running_process(&mut self) {
        if let Some(proc) = self.info.take_running() {
            log::debug!(
                "t={} quanta expired for {}, {} left",
                self.info.get_timestamp(),
                proc.pid(),
                proc.remaining_time()
            );
            self.ready.enqueue_process(proc);
        }
        self.time_slice = 0;
    }
}

impl Collector for RoundRobinScheduler {
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

impl Scheduler for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        "round_robin"
    }

    fn tick(&mut self) -> Option<Snapshot> {
        if self.info.is_drained(&self.ready) {
            return None;
        }

        self.info.admit_arrivals(&mut self.ready);
        if execute_dispatch(&mut self.info, &mut self.ready) {
            self.time_slice = 0;
        }

        let snapshot = collect_all(self, None);

        match execute_tick(&mut self.info) {
            TickOutcome::Idle => (),
            // finishing wins over an expired quanta
            TickOutcome::Finished => self.time_slice = 0,
            TickOutcome::Running => {
                self.time_slice += 1;
                if self.time_slice == self.quanta.get() {
                    self.enqueue_running_process();
                }
            }
        }

        Some(snapshot)
    }

    fn info(&self) -> &SchedulerInfo {
        &self.info
    }
}

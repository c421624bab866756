use std::collections::VecDeque;

use crate::common_types::Timestamp;
use crate::process::Process;
use crate::process_manager::ProcessManager;
use crate::step::{CpuSlot, ProcessSnapshot};

/// State every scheduler keeps for one run
///
/// Owns the clock, the processes that have not arrived yet, the running slot
/// and the completed list. A fresh value is built for every run, nothing in
/// it is shared with other runs.
#[derive(Debug)]
pub struct SchedulerInfo {
    /// Current simulated time
    timestamp: Timestamp,
    /// Processes not yet admitted, sorted by arrival time
    pending: VecDeque<Process>,
    /// The process holding the execution unit
    running: Option<Process>,
    /// Finished processes, in completion order
    completed: Vec<Process>,
    /// Number of processes the run started with
    total: usize,
}

impl SchedulerInfo {
    /// Creates the context of a new run
    ///
    /// * `processes` - the input processes, in request order. The sort is
    ///                 stable, so equal arrivals keep their request order.
    pub(crate) fn new(mut processes: Vec<Process>) -> SchedulerInfo {
        processes.sort_by_key(Process::arrival_time);
        let total = processes.len();

        SchedulerInfo {
            timestamp: Timestamp::ZERO,
            pending: processes.into(),
            running: None,
            completed: Vec::with_capacity(total),
            total,
        }
    }

    pub fn get_timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Advances the clock by `time` units
    pub(crate) fn make_timeskip(&mut self, time: u64) {
        self.timestamp = self.timestamp + time;
    }

    /// Moves every process that arrived by the current time into `ready`.
    pub(crate) fn admit_arrivals(&mut self, ready: &mut dyn ProcessManager) -> usize {
        let now = self.timestamp;
        self.admit_until(now, ready)
    }

    /// Moves every process with an arrival time up to `time` into `ready`,
    /// in arrival order.
    pub(crate) fn admit_until(&mut self, time: Timestamp, ready: &mut dyn ProcessManager) -> usize {
        let mut admitted = 0;

        while self.pending.front().is_some_and(|proc| proc.arrival_time() <= time) {
            if let Some(proc) = self.pending.pop_front() {
                log::trace!("t={} admit {}", self.timestamp, proc.pid());
                ready.enqueue_process(proc);
                admitted += 1;
            }
        }

        admitted
    }

    /// Arrival time of the next process still to be admitted
    pub fn next_arrival(&self) -> Option<Timestamp> {
        self.pending.front().map(Process::arrival_time)
    }

    pub fn has_pending_arrivals(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn has_running_process(&self) -> bool {
        self.running.is_some()
    }

    pub fn get_running(&self) -> Option<&Process> {
        self.running.as_ref()
    }

    pub(crate) fn running_mut(&mut self) -> Option<&mut Process> {
        self.running.as_mut()
    }

    pub(crate) fn take_running(&mut self) -> Option<Process> {
        self.running.take()
    }

    /// Gives the execution unit to `proc`, recording its start time on the
    /// first dispatch.
    pub(crate) fn dispatch(&mut self, mut proc: Process) {
        debug_assert!(self.running.is_none(), "execution unit already taken");
        proc.dispatch(self.timestamp);
        log::debug!("t={} dispatch {}", self.timestamp, proc.pid());
        self.running = Some(proc);
    }

    /// Finalizes `proc` at the current time and appends it to the completed
    /// list.
    pub(crate) fn finalize(&mut self, mut proc: Process) {
        proc.complete(self.timestamp);
        log::debug!(
            "t={} finish {} (turnaround {}, waiting {})",
            self.timestamp,
            proc.pid(),
            proc.turnaround_time().unwrap_or_default(),
            proc.waiting_time().unwrap_or_default(),
        );
        self.completed.push(proc);
    }

    pub fn completed(&self) -> &[Process] {
        &self.completed
    }

    pub fn all_completed(&self) -> bool {
        self.completed.len() == self.total
    }

    /// Nothing left to run: no arrivals to come, nothing ready, nothing
    /// running.
    pub fn is_drained(&self, ready: &dyn ProcessManager) -> bool {
        !self.has_pending_arrivals() && !ready.has_ready_processes() && !self.has_running_process()
    }

    pub fn cpu_slot(&self) -> CpuSlot {
        match &self.running {
            Some(proc) => CpuSlot::Running(proc.snapshot()),
            None => CpuSlot::Idle,
        }
    }

    pub fn completed_snapshots(&self) -> Vec<ProcessSnapshot> {
        self.completed.iter().map(Process::snapshot).collect()
    }
}

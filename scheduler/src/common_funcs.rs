use crate::process_manager::ProcessManager;
use crate::scheduler_info::SchedulerInfo;

/// What happened to the execution unit during one tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing was running
    Idle,
    /// The running process still has work left
    Running,
    /// The running process finished and left the execution unit
    Finished,
}

/// Advances the clock by one unit and charges it to the running process,
/// finalizing the process if that was its last unit.
pub fn execute_tick(info: &mut SchedulerInfo) -> TickOutcome {
    info.make_timeskip(1);

    let finished = match info.running_mut() {
        Some(proc) => proc.execute(1),
        None => return TickOutcome::Idle,
    };

    if !finished {
        return TickOutcome::Running;
    }

    if let Some(proc) = info.take_running() {
        info.finalize(proc);
    }
    TickOutcome::Finished
}

/// Dispatches the next ready process if the execution unit is free.
///
/// Returns true if a new process was dispatched.
pub fn execute_dispatch(info: &mut SchedulerInfo, ready: &mut dyn ProcessManager) -> bool {
    if info.has_running_process() {
        return false;
    }

    match ready.dequeue_process() {
        Some(proc) => {
            info.dispatch(proc);
            true
        }
        None => false,
    }
}

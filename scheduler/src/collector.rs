use crate::common_types::Timestamp;
use crate::step::{CpuSlot, ProcessSnapshot, ReadyView, Snapshot, StepEvent};

pub trait Collector {
    // Returns the current simulated time
    fn collect_time(&self) -> Timestamp;

    // Returns the running process, or idle
    fn collect_running(&self) -> CpuSlot;

    // Returns the ready processes, in dispatch order
    fn collect_ready(&self) -> ReadyView;

    // Returns the finished processes, in completion order
    fn collect_completed(&self) -> Vec<ProcessSnapshot>;
}

pub fn collect_all(scheduler: &dyn Collector, event: Option<StepEvent>) -> Snapshot {
    Snapshot {
        time: scheduler.collect_time(),
        cpu: scheduler.collect_running(),
        ready: scheduler.collect_ready(),
        completed: scheduler.collect_completed(),
        event,
    }
}

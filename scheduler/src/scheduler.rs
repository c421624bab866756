use crate::collector::Collector;
use crate::scheduler_info::SchedulerInfo;
use crate::step::Snapshot;

/// A scheduling discipline driving one run
///
/// Every call to [`Scheduler::tick`] admits the processes that arrived,
/// picks the process holding the execution unit, takes a snapshot and then
/// advances the clock. The scheduler owns all of its processes.
pub trait Scheduler: Collector + Send {
    /// Name of the discipline, as accepted in a request
    fn name(&self) -> &'static str;

    /// Runs the scheduler until the next decision point.
    ///
    /// Returns the snapshot taken at that point, or `None` once every
    /// process has completed.
    fn tick(&mut self) -> Option<Snapshot>;

    /// The per run state: clock, running slot and completed processes
    fn info(&self) -> &SchedulerInfo;
}

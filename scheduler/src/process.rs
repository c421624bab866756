use crate::common_types::{Pid, Timestamp};
use crate::step::ProcessSnapshot;

/// A simulated process
///
/// A process is owned by exactly one place at a time: the pending arrivals,
/// a ready structure, the running slot or the completed list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Process {
    /// The PID of the process
    pid: Pid,
    /// The moment the process becomes eligible for admission
    arrival_time: Timestamp,
    /// Total execution time the process needs
    burst_time: u64,
    /// Fixed priority, also the queue index for multi-level queueing
    priority: u32,
    /// Execution time still owed, never greater than `burst_time`
    remaining_time: u64,
    /// Set the first time the process is dispatched
    start_time: Option<Timestamp>,
    /// Set once, when `remaining_time` reaches 0
    completion_time: Option<Timestamp>,
    waiting_time: Option<u64>,
    turnaround_time: Option<u64>,
}

impl Process {
    /// Creates a new process that has not run yet
    ///
    /// * `pid` - PID of the new process
    /// * `arrival_time` - when the process becomes ready
    /// * `burst_time` - total execution time the process needs
    /// * `priority` - fixed priority of the process
    pub fn new(pid: Pid, arrival_time: Timestamp, burst_time: u64, priority: u32) -> Process {
        Process {
            pid,
            arrival_time,
            burst_time,
            priority,
            remaining_time: burst_time,
            start_time: None,
            completion_time: None,
            waiting_time: None,
            turnaround_time: None,
        }
    }

    pub fn pid(&self) -> &Pid {
        &self.pid
    }

    pub fn arrival_time(&self) -> Timestamp {
        self.arrival_time
    }

    pub fn burst_time(&self) -> u64 {
        self.burst_time
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn remaining_time(&self) -> u64 {
        self.remaining_time
    }

    pub fn start_time(&self) -> Option<Timestamp> {
        self.start_time
    }

    pub fn completion_time(&self) -> Option<Timestamp> {
        self.completion_time
    }

    pub fn waiting_time(&self) -> Option<u64> {
        self.waiting_time
    }

    pub fn turnaround_time(&self) -> Option<u64> {
        self.turnaround_time
    }

    /// Gives the execution unit to the process at `time`.
    ///
    /// Only the first dispatch records the start time.
    pub(crate) fn dispatch(&mut self, time: Timestamp) {
        if self.start_time.is_none() {
            self.start_time = Some(time);
        }
    }

    /// Runs the process for `units` of time and returns true when it has no
    /// work left.
    pub(crate) fn execute(&mut self, units: u64) -> bool {
        debug_assert!(units <= self.remaining_time, "executed past the burst");
        self.remaining_time -= units.min(self.remaining_time);
        self.remaining_time == 0
    }

    /// Records the completion of the process at `time` and derives its
    /// turnaround and waiting times.
    pub(crate) fn complete(&mut self, time: Timestamp) {
        debug_assert_eq!(self.remaining_time, 0);
        debug_assert!(self.completion_time.is_none(), "process completed twice");

        let turnaround = time.since(self.arrival_time);
        debug_assert!(turnaround >= self.burst_time);

        self.completion_time = Some(time);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - self.burst_time);
    }

    /// Wire view of the process; unset times are reported as `-1`.
    pub fn snapshot(&self) -> ProcessSnapshot {
        let as_wire = |t: Option<Timestamp>| t.map_or(-1, |t| i64::try_from(t.get()).unwrap_or(i64::MAX));

        ProcessSnapshot {
            pid: self.pid.to_string(),
            arrival_time: self.arrival_time.get(),
            burst_time: self.burst_time,
            priority: self.priority,
            remaining_time: self.remaining_time,
            start_time: as_wire(self.start_time),
            completion_time: as_wire(self.completion_time),
            waiting_time: self.waiting_time.unwrap_or(0),
            turnaround_time: self.turnaround_time.unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(arrival: u64, burst: u64) -> Process {
        Process::new(Pid::new("P1"), Timestamp::new(arrival), burst, 0)
    }

    #[test]
    fn start_time_is_set_once() {
        let mut p = process(0, 3);
        p.dispatch(Timestamp::new(2));
        p.dispatch(Timestamp::new(5));
        assert_eq!(p.start_time(), Some(Timestamp::new(2)));
    }

    #[test]
    fn completion_derives_statistics() {
        let mut p = process(1, 3);
        p.dispatch(Timestamp::new(4));
        assert!(!p.execute(2));
        assert!(p.execute(1));
        p.complete(Timestamp::new(7));

        assert_eq!(p.turnaround_time(), Some(6));
        assert_eq!(p.waiting_time(), Some(3));
        assert_eq!(p.completion_time(), Some(Timestamp::new(7)));
    }

    #[test]
    fn snapshot_reports_unset_times_as_minus_one() {
        let snap = process(2, 4).snapshot();
        assert_eq!(snap.start_time, -1);
        assert_eq!(snap.completion_time, -1);
        assert_eq!(snap.waiting_time, 0);
        assert_eq!(snap.remaining_time, 4);
    }
}

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::common_types::PRIORITY_LEVELS;
use crate::process::Process;
use crate::step::ReadyView;

/// A ready structure: the admitted processes that wait for the execution unit
pub trait ProcessManager {
    /// Enqueues the given process to the ready structure
    ///
    /// * `proc` - process to be enqueued
    fn enqueue_process(&mut self, proc: Process);

    /// Dequeues the process that should run next
    fn dequeue_process(&mut self) -> Option<Process>;

    fn has_ready_processes(&self) -> bool;

    /// The ready processes, in the order they would be dispatched
    fn ready_view(&self) -> ReadyView;
}

/// First in, first out queue used by FCFS and round robin
#[derive(Debug, Default)]
pub struct FifoQueue {
    ready: VecDeque<Process>,
}

impl FifoQueue {
    pub fn new() -> FifoQueue {
        FifoQueue::default()
    }
}

impl ProcessManager for FifoQueue {
    fn enqueue_process(&mut self, proc: Process) {
        self.ready.push_back(proc);
    }

    fn dequeue_process(&mut self) -> Option<Process> {
        self.ready.pop_front()
    }

    fn has_ready_processes(&self) -> bool {
        !self.ready.is_empty()
    }

    fn ready_view(&self) -> ReadyView {
        ReadyView::Queue(self.ready.iter().map(Process::snapshot).collect())
    }
}

#[derive(Debug)]
struct HeapEntry {
    proc: Process,
    /// Insertion sequence, breaks ties between equal remaining times
    seq: u64,
}

impl HeapEntry {
    fn key(&self) -> (u64, u64) {
        (self.proc.remaining_time(), self.seq)
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    // BinaryHeap is a max-heap, the smallest key has to compare greatest
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

/// Min-heap on remaining time, used by preemptive shortest job first
///
/// Processes with equal remaining time leave in insertion order. A process
/// pushed back after preemption counts as a fresh insertion.
#[derive(Debug, Default)]
pub struct RemainingTimeHeap {
    ready: BinaryHeap<HeapEntry>,
    next_seq: u64,
}

impl RemainingTimeHeap {
    pub fn new() -> RemainingTimeHeap {
        RemainingTimeHeap::default()
    }

    /// Remaining time of the process at the top of the heap
    pub fn min_remaining_time(&self) -> Option<u64> {
        self.ready.peek().map(|entry| entry.proc.remaining_time())
    }
}

impl ProcessManager for RemainingTimeHeap {
    fn enqueue_process(&mut self, proc: Process) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.ready.push(HeapEntry { proc, seq });
    }

    fn dequeue_process(&mut self) -> Option<Process> {
        self.ready.pop().map(|entry| entry.proc)
    }

    fn has_ready_processes(&self) -> bool {
        !self.ready.is_empty()
    }

    fn ready_view(&self) -> ReadyView {
        let mut entries: Vec<&HeapEntry> = self.ready.iter().collect();
        entries.sort_by_key(|entry| entry.key());

        ReadyView::Queue(entries.into_iter().map(|entry| entry.proc.snapshot()).collect())
    }
}

/// One FIFO queue per priority level, index 0 first
#[derive(Debug)]
pub struct PriorityLevels {
    levels: [VecDeque<Process>; PRIORITY_LEVELS],
}

impl Default for PriorityLevels {
    fn default() -> Self {
        PriorityLevels {
            levels: std::array::from_fn(|_| VecDeque::new()),
        }
    }
}

impl PriorityLevels {
    pub fn new() -> PriorityLevels {
        PriorityLevels::default()
    }

    /// Index of the highest priority level holding a ready process
    pub fn highest_ready_level(&self) -> Option<usize> {
        self.levels.iter().position(|queue| !queue.is_empty())
    }

    /// Puts a preempted process back at the head of its level, so it keeps
    /// its turn.
    pub fn preempt_process(&mut self, proc: Process) {
        let level = Self::level_of(&proc);
        self.levels[level].push_front(proc);
    }

    fn level_of(proc: &Process) -> usize {
        let level = proc.priority() as usize;
        debug_assert!(level < PRIORITY_LEVELS, "priority validated on admission");
        level
    }
}

impl ProcessManager for PriorityLevels {
    fn enqueue_process(&mut self, proc: Process) {
        let level = Self::level_of(&proc);
        self.levels[level].push_back(proc);
    }

    fn dequeue_process(&mut self) -> Option<Process> {
        self.levels.iter_mut().find_map(VecDeque::pop_front)
    }

    fn has_ready_processes(&self) -> bool {
        self.highest_ready_level().is_some()
    }

    fn ready_view(&self) -> ReadyView {
        ReadyView::Levels(
            self.levels
                .iter()
                .map(|queue| queue.iter().map(Process::snapshot).collect())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common_types::{Pid, Timestamp};

    fn proc(pid: &str, burst: u64, priority: u32) -> Process {
        Process::new(Pid::new(pid), Timestamp::ZERO, burst, priority)
    }

    fn pids(view: &ReadyView) -> Vec<String> {
        view.processes().into_iter().map(|p| p.pid.clone()).collect()
    }

    #[test]
    fn fifo_keeps_arrival_order() {
        let mut queue = FifoQueue::new();
        queue.enqueue_process(proc("A", 3, 0));
        queue.enqueue_process(proc("B", 1, 0));

        assert_eq!(pids(&queue.ready_view()), ["A", "B"]);
        assert_eq!(queue.dequeue_process().unwrap().pid().as_str(), "A");
        assert!(queue.has_ready_processes());
    }

    #[test]
    fn heap_pops_shortest_and_breaks_ties_by_insertion() {
        let mut heap = RemainingTimeHeap::new();
        heap.enqueue_process(proc("A", 5, 0));
        heap.enqueue_process(proc("B", 2, 0));
        heap.enqueue_process(proc("C", 2, 0));
        heap.enqueue_process(proc("D", 7, 0));

        assert_eq!(heap.min_remaining_time(), Some(2));
        assert_eq!(pids(&heap.ready_view()), ["B", "C", "A", "D"]);

        let order: Vec<String> = std::iter::from_fn(|| heap.dequeue_process())
            .map(|p| p.pid().to_string())
            .collect();
        assert_eq!(order, ["B", "C", "A", "D"]);
    }

    #[test]
    fn levels_dequeue_by_priority_and_preempt_to_front() {
        let mut levels = PriorityLevels::new();
        levels.enqueue_process(proc("low", 1, 2));
        levels.enqueue_process(proc("mid1", 1, 1));
        levels.enqueue_process(proc("mid2", 1, 1));

        assert_eq!(levels.highest_ready_level(), Some(1));
        levels.preempt_process(proc("mid0", 1, 1));

        match levels.ready_view() {
            ReadyView::Levels(view) => {
                assert_eq!(view.len(), PRIORITY_LEVELS);
                assert!(view[0].is_empty());
                let level1: Vec<&str> = view[1].iter().map(|p| p.pid.as_str()).collect();
                assert_eq!(level1, ["mid0", "mid1", "mid2"]);
            }
            other => panic!("unexpected view {:?}", other),
        }

        assert_eq!(levels.dequeue_process().unwrap().pid().as_str(), "mid0");
    }
}

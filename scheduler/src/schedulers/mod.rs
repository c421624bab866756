//! The scheduling disciplines
//!
//! Every discipline owns a [`SchedulerInfo`](crate::SchedulerInfo) and the
//! ready structure it selects from, and implements
//! [`Scheduler`](crate::Scheduler).

mod fcfs;
pub use fcfs::FcfsScheduler;

mod round_robin;
pub use round_robin::RoundRobinScheduler;

mod sjf_preemptive;
pub use sjf_preemptive::SjfPreemptiveScheduler;

mod multi_level;
pub use multi_level::MultiLevelScheduler;

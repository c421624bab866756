//! A scheduling simulation library.
//!
//! This library simulates classical CPU scheduling disciplines over a set
//! of synthetic processes and produces a deterministic, time ordered trace
//! of scheduling decisions followed by per process statistics.
//!
//! A run is a [`Simulation`], an iterator of [`Step`]s:
//!
//! ```
//! use scheduler::{Simulation, SimulationRequest, Step};
//!
//! let request = SimulationRequest::from_json(
//!     r#"{"processes": [{"pid": "P1", "arrival": 0, "burst": 2}], "algorithm": "fcfs"}"#,
//! )
//! .unwrap();
//!
//! let steps: Vec<Step> = Simulation::from_request(&request).unwrap().collect();
//! assert!(matches!(steps[steps.len() - 2], Step::FinalStats { .. }));
//! ```

mod schedulers;
pub use schedulers::{FcfsScheduler, MultiLevelScheduler, RoundRobinScheduler, SjfPreemptiveScheduler};

mod scheduler;
pub use crate::scheduler::Scheduler;

mod common_types;
pub use crate::common_types::{Pid, Quantum, Timestamp, PRIORITY_LEVELS};

mod collector;
pub use crate::collector::{collect_all, Collector};

mod process;
pub use crate::process::Process;

mod process_manager;
pub use crate::process_manager::ProcessManager;

mod scheduler_info;
pub use crate::scheduler_info::SchedulerInfo;

mod common_funcs;

mod error;
pub use crate::error::SimulationError;

mod request;
pub use crate::request::{Algorithm, Discipline, ProcessDescriptor, QuantumValue, SimulationRequest};

mod simulation;
pub use crate::simulation::Simulation;

mod step;
pub use crate::step::{CpuSlot, ProcessSnapshot, ReadyView, Snapshot, Step, StepEvent};

mod summary;
pub use crate::summary::Summary;

/// Returns a run with a non-preemptive first come, first served policy
///
/// * `processes` - the processes to schedule, in request order
pub fn fcfs(processes: Vec<Process>) -> Result<Simulation, SimulationError> {
    Simulation::new(Discipline::Fcfs, processes)
}

/// Returns a run with a round robin policy
///
/// * `quantum` - the time quanta that a process can run before it is preempted
/// * `processes` - the processes to schedule, in request order
pub fn round_robin(quantum: Quantum, processes: Vec<Process>) -> Result<Simulation, SimulationError> {
    Simulation::new(Discipline::RoundRobin { quantum }, processes)
}

/// Returns a run with a preemptive shortest remaining time first policy
///
/// * `processes` - the processes to schedule, in request order
pub fn sjf_preemptive(processes: Vec<Process>) -> Result<Simulation, SimulationError> {
    Simulation::new(Discipline::SjfPreemptive, processes)
}

/// Returns a run with a fixed priority multi-level queue policy
///
/// * `processes` - the processes to schedule, in request order. Every
///                 priority must be lower than [`PRIORITY_LEVELS`], the run
///                 is rejected otherwise.
pub fn multi_level(processes: Vec<Process>) -> Result<Simulation, SimulationError> {
    Simulation::new(Discipline::MultiLevel, processes)
}

//! Simulation requests, as sent by the delivery layer.
//!
//! ```text
//! {
//!   "processes": [{"pid": "P1", "arrival": 0, "burst": 5, "priority": 1}],
//!   "algorithm": "round_robin",
//!   "quantum": 2
//! }
//! ```

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common_types::{Pid, Quantum, Timestamp, PRIORITY_LEVELS};
use crate::error::SimulationError;
use crate::process::Process;

/// Latest instant a run may reach; times are signed on the wire.
const MAX_WIRE_TIME: u64 = i64::MAX as u64;

/// Algorithm selector, as spelled in a request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Fcfs,
    SjfPreemptive,
    RoundRobin,
    MultiLevel,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Fcfs,
        Algorithm::SjfPreemptive,
        Algorithm::RoundRobin,
        Algorithm::MultiLevel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "fcfs",
            Algorithm::SjfPreemptive => "sjf_preemptive",
            Algorithm::RoundRobin => "round_robin",
            Algorithm::MultiLevel => "multi_level",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str() == s)
            .ok_or_else(|| SimulationError::UnknownAlgorithm(s.to_string()))
    }
}

/// A fully resolved scheduling discipline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Discipline {
    Fcfs,
    SjfPreemptive,
    RoundRobin { quantum: Quantum },
    MultiLevel,
}

impl Discipline {
    /// Resolves `algorithm`; the quantum is only read for round robin.
    pub fn new(algorithm: Algorithm, quantum: Option<&QuantumValue>) -> Result<Discipline, SimulationError> {
        Ok(match algorithm {
            Algorithm::Fcfs => Discipline::Fcfs,
            Algorithm::SjfPreemptive => Discipline::SjfPreemptive,
            Algorithm::MultiLevel => Discipline::MultiLevel,
            Algorithm::RoundRobin => {
                let quantum = quantum.ok_or(SimulationError::MissingQuantum)?;
                Discipline::RoundRobin {
                    quantum: quantum.parse()?,
                }
            }
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Discipline::Fcfs => Algorithm::Fcfs,
            Discipline::SjfPreemptive => Algorithm::SjfPreemptive,
            Discipline::RoundRobin { .. } => Algorithm::RoundRobin,
            Discipline::MultiLevel => Algorithm::MultiLevel,
        }
    }

    /// Checks that `processes` can be scheduled by this discipline.
    ///
    /// The clock never passes the latest arrival plus the total work, so
    /// that horizon must fit the signed times reported on the wire.
    pub fn validate(&self, processes: &[Process]) -> Result<(), SimulationError> {
        let mut seen = HashSet::with_capacity(processes.len());
        let mut latest_arrival = 0u64;
        let mut total_work = 0u64;

        for proc in processes {
            let pid = proc.pid().as_str();

            if pid.is_empty() {
                return Err(SimulationError::invalid_process(pid, "pid must not be empty"));
            }
            if proc.burst_time() == 0 {
                return Err(SimulationError::invalid_process(pid, "burst must be at least 1"));
            }
            if !seen.insert(pid) {
                return Err(SimulationError::DuplicatePid(pid.to_string()));
            }
            if *self == Discipline::MultiLevel && proc.priority() as usize >= PRIORITY_LEVELS {
                return Err(SimulationError::PriorityOutOfRange {
                    pid: pid.to_string(),
                    priority: proc.priority(),
                });
            }

            latest_arrival = latest_arrival.max(proc.arrival_time().get());
            total_work = total_work.saturating_add(proc.burst_time());
            if latest_arrival.saturating_add(total_work) > MAX_WIRE_TIME {
                return Err(SimulationError::invalid_process(
                    pid,
                    format!("times past {} cannot be simulated", MAX_WIRE_TIME),
                ));
            }
        }

        Ok(())
    }
}

/// A quantum given either as a number or as text
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantumValue {
    Integer(i64),
    Text(String),
}

impl QuantumValue {
    pub fn parse(&self) -> Result<Quantum, SimulationError> {
        let invalid = || SimulationError::InvalidQuantum(self.to_string());

        let value = match self {
            QuantumValue::Integer(value) => *value,
            QuantumValue::Text(text) => text.trim().parse::<i64>().map_err(|_| invalid())?,
        };

        usize::try_from(value)
            .ok()
            .and_then(Quantum::new)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for QuantumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantumValue::Integer(value) => write!(f, "{}", value),
            QuantumValue::Text(text) => f.write_str(text),
        }
    }
}

/// One process of a request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    pub pid: String,
    pub arrival: i64,
    pub burst: i64,
    #[serde(default)]
    pub priority: i64,
}

impl ProcessDescriptor {
    /// Builds a fresh process, failing on negative or missing work.
    pub fn to_process(&self) -> Result<Process, SimulationError> {
        let arrival = u64::try_from(self.arrival)
            .map_err(|_| SimulationError::invalid_process(&self.pid, format!("negative arrival {}", self.arrival)))?;

        let burst = u64::try_from(self.burst)
            .ok()
            .filter(|burst| *burst >= 1)
            .ok_or_else(|| SimulationError::invalid_process(&self.pid, format!("burst {} is not positive", self.burst)))?;

        let priority = u32::try_from(self.priority)
            .map_err(|_| SimulationError::invalid_process(&self.pid, format!("priority {} out of range", self.priority)))?;

        Ok(Process::new(Pid::new(self.pid.as_str()), Timestamp::new(arrival), burst, priority))
    }
}

/// A request to simulate one discipline over a set of processes
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub processes: Vec<ProcessDescriptor>,
    pub algorithm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<QuantumValue>,
}

impl SimulationRequest {
    pub fn from_json(text: &str) -> Result<SimulationRequest, SimulationError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn discipline(&self) -> Result<Discipline, SimulationError> {
        let algorithm: Algorithm = self.algorithm.parse()?;
        Discipline::new(algorithm, self.quantum.as_ref())
    }

    /// Builds a new, independent set of processes for one run.
    pub fn build_processes(&self) -> Result<Vec<Process>, SimulationError> {
        self.processes.iter().map(ProcessDescriptor::to_process).collect()
    }
}

use crate::common_types::PRIORITY_LEVELS;

/// Reasons a simulation cannot start
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Round robin requires a quantum")]
    MissingQuantum,

    #[error("Invalid quantum {0:?}: expected a positive integer")]
    InvalidQuantum(String),

    #[error("Invalid process {pid:?}: {reason}")]
    InvalidProcess { pid: String, reason: String },

    #[error("Duplicate pid: {0}")]
    DuplicatePid(String),

    #[error("Process {pid} has priority {priority}, multi-level queueing accepts 0..{levels}", levels = PRIORITY_LEVELS)]
    PriorityOutOfRange { pid: String, priority: u32 },

    #[error("Malformed request: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimulationError {
    pub(crate) fn invalid_process(pid: &str, reason: impl Into<String>) -> SimulationError {
        SimulationError::InvalidProcess {
            pid: pid.to_string(),
            reason: reason.into(),
        }
    }
}

use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Number of ready queues used by the multi-level scheduler.
///
/// Queue `0` has the highest priority.
pub const PRIORITY_LEVELS: usize = 3;

/// The maximum time a round robin process can run before being preempted
pub type Quantum = NonZeroUsize;

/// Identifier of a simulated process, unique within one run
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pid(String);

impl Pid {
    /// Creates a new Pid object
    ///
    /// * `pid` - the identifier as given in the request
    pub fn new(pid: impl Into<String>) -> Pid {
        Pid(pid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A point on the simulated clock
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    /// Creates a new Timestamp object
    ///
    /// * `time` - inital value of the Timestamp
    pub fn new(time: u64) -> Timestamp {
        Timestamp(time)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// Units of time elapsed between `earlier` and `self`.
    ///
    /// Panics in debug builds if `earlier` is in the future.
    pub fn since(&self, earlier: Timestamp) -> u64 {
        debug_assert!(earlier.0 <= self.0, "timestamp went backwards");
        self.0 - earlier.0
    }
}

impl Add<u64> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: u64) -> Self::Output {
        Timestamp::new(self.0 + rhs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Errors raised by the scheduling core
//!
//! Validation errors are raised before any simulation state exists.
//! `Timeout` means the engine ran past its safety bound, which only
//! happens when a policy stops making progress.

use std::fmt;

use crate::Pid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedError {
    /// The workload contains no process
    EmptyWorkload,
    /// A process uses pid 0
    InvalidPid { process: String },
    /// Two processes share the same pid
    DuplicatePid(Pid),
    /// A mandatory field has an unusable value
    InvalidField {
        process: String,
        field: &'static str,
        reason: &'static str,
    },
    /// A priority policy got a process without priority
    MissingPriority { process: String },
    /// A priority policy got a negative priority
    InvalidPriority { process: String, priority: i32 },
    /// An I/O operation of a process is malformed
    InvalidIoOperation {
        process: String,
        index: usize,
        reason: &'static str,
    },
    /// Round Robin needs a quantum of at least one unit
    InvalidQuantum,
    /// The algorithm name could not be parsed
    UnknownAlgorithm(String),
    /// The workload's time bound does not fit in a `usize`
    HorizonOverflow { last_arrival: usize },
    /// The simulation exceeded its loop bound
    Timeout { time: usize, limit: usize },
}

impl SchedError {
    /// Returns true for errors caused by the caller's input
    pub fn is_validation(&self) -> bool {
        !matches!(self, SchedError::Timeout { .. })
    }
}

impl fmt::Display for SchedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedError::EmptyWorkload => write!(f, "no processes to schedule"),
            SchedError::InvalidPid { process } => {
                write!(f, "process {}: pid must be a positive integer", process)
            }
            SchedError::DuplicatePid(pid) => write!(f, "pid {} is used by more than one process", pid),
            SchedError::InvalidField { process, field, reason } => {
                write!(f, "process {}: invalid {}: {}", process, field, reason)
            }
            SchedError::MissingPriority { process } => {
                write!(f, "process {} has no priority defined", process)
            }
            SchedError::InvalidPriority { process, priority } => write!(
                f,
                "process {}: priority must be non-negative, got {}",
                process, priority
            ),
            SchedError::InvalidIoOperation { process, index, reason } => {
                write!(f, "process {}: I/O operation {}: {}", process, index, reason)
            }
            SchedError::InvalidQuantum => write!(f, "the quantum must be a positive number"),
            SchedError::UnknownAlgorithm(name) => write!(f, "unknown scheduling algorithm: {}", name),
            SchedError::HorizonOverflow { last_arrival } => write!(
                f,
                "workload is too long to simulate: last arrival {} plus total burst overflows",
                last_arrival
            ),
            SchedError::Timeout { time, limit } => write!(
                f,
                "simulation reached time {} past its bound {}, possible infinite loop",
                time, limit
            ),
        }
    }
}

impl std::error::Error for SchedError {}

pub type SchedResult<T> = Result<T, SchedError>;

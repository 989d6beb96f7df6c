use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::Serialize;

use crate::common_types::DEFAULT_QUANTUM;
use crate::error::{SchedError, SchedResult};
use crate::schedulers::{
    FcfsIoScheduler, FcfsScheduler, PreemptivePriorityScheduler, PriorityScheduler, RoundRobinScheduler,
    SjfScheduler,
};
use crate::DispatchPolicy;

/// The scheduling disciplines the simulator knows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Fcfs,
    FcfsIo,
    Sjf,
    RoundRobin { quantum: NonZeroUsize },
    Priority,
    PriorityPreemptive,
}

/// Human readable description of an algorithm
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantum: Option<usize>,
    pub description: String,
}

impl Algorithm {
    /// Round Robin with the given quantum
    ///
    /// * `quantum` - the time quanta, must be at least 1
    pub fn round_robin(quantum: usize) -> SchedResult<Algorithm> {
        match NonZeroUsize::new(quantum) {
            Some(quantum) => Ok(Algorithm::RoundRobin { quantum }),
            None => Err(SchedError::InvalidQuantum),
        }
    }

    /// The tag reported in simulation results
    pub fn tag(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::FcfsIo => "FCFS_IO",
            Algorithm::Sjf => "SJF",
            Algorithm::RoundRobin { .. } => "ROUND_ROBIN",
            Algorithm::Priority => "PRIORITY",
            Algorithm::PriorityPreemptive => "PRIORITY_PREEMPTIVE",
        }
    }

    pub fn quantum(&self) -> Option<usize> {
        match self {
            Algorithm::RoundRobin { quantum } => Some(quantum.get()),
            _ => None,
        }
    }

    pub fn is_preemptive(&self) -> bool {
        matches!(self, Algorithm::RoundRobin { .. } | Algorithm::PriorityPreemptive)
    }

    pub fn describe(&self) -> AlgorithmInfo {
        let (name, description) = match self {
            Algorithm::Fcfs => (
                "First Come, First Served",
                "Processes run to completion in arrival order.".to_string(),
            ),
            Algorithm::FcfsIo => (
                "First Come, First Served with I/O",
                "Processes run in arrival order and leave the CPU for their I/O operations; \
                 each resource serves its requests in FIFO order."
                    .to_string(),
            ),
            Algorithm::Sjf => (
                "Shortest Job First",
                "When the CPU is free, the arrived process with the shortest burst runs to completion."
                    .to_string(),
            ),
            Algorithm::RoundRobin { quantum } => (
                "Round Robin",
                format!(
                    "Processes take turns in a circular queue, at most {} units per turn.",
                    quantum
                ),
            ),
            Algorithm::Priority => (
                "Priority",
                "When the CPU is free, the most urgent process (lowest value) runs to completion."
                    .to_string(),
            ),
            Algorithm::PriorityPreemptive => (
                "Preemptive Priority",
                "The most urgent ready process always holds the CPU; a more urgent arrival interrupts the running one."
                    .to_string(),
            ),
        };

        AlgorithmInfo {
            name,
            kind: if self.is_preemptive() { "preemptive" } else { "non-preemptive" },
            quantum: self.quantum(),
            description,
        }
    }

    /// Builds the dispatch policy implementing this algorithm
    pub fn policy(&self) -> Box<dyn DispatchPolicy> {
        match *self {
            Algorithm::Fcfs => Box::new(FcfsScheduler::new()),
            Algorithm::FcfsIo => Box::new(FcfsIoScheduler::new()),
            Algorithm::Sjf => Box::new(SjfScheduler::new()),
            Algorithm::RoundRobin { quantum } => Box::new(RoundRobinScheduler::new(quantum)),
            Algorithm::Priority => Box::new(PriorityScheduler::new()),
            Algorithm::PriorityPreemptive => Box::new(PreemptivePriorityScheduler::new()),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::RoundRobin { quantum } => write!(f, "{}(q={})", self.tag(), quantum),
            _ => write!(f, "{}", self.tag()),
        }
    }
}

impl FromStr for Algorithm {
    type Err = SchedError;

    /// Parses `fcfs`, `fcfs-io`, `sjf`, `rr`, `rr:<quantum>`, `priority`
    /// and `priority-preemptive` (case insensitive, `_` or `-`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");

        if let Some(quantum) = normalized
            .strip_prefix("rr:")
            .or_else(|| normalized.strip_prefix("round-robin:"))
        {
            let quantum: usize = quantum.parse().map_err(|_| SchedError::InvalidQuantum)?;
            return Algorithm::round_robin(quantum);
        }

        match normalized.as_str() {
            "fcfs" => Ok(Algorithm::Fcfs),
            "fcfs-io" => Ok(Algorithm::FcfsIo),
            "sjf" => Ok(Algorithm::Sjf),
            "rr" | "round-robin" => Algorithm::round_robin(DEFAULT_QUANTUM),
            "priority" => Ok(Algorithm::Priority),
            "priority-preemptive" => Ok(Algorithm::PriorityPreemptive),
            _ => Err(SchedError::UnknownAlgorithm(s.to_string())),
        }
    }
}

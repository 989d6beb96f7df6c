//! A CPU scheduling simulator library.
//!
//! This library runs a workload of synthetic processes through a
//! classical scheduling algorithm, unit by unit, and reports the
//! execution timeline, per-process timings and aggregate statistics.
//!
//! Every algorithm is a `DispatchPolicy` plugged into the same
//! `Simulation` engine.
//!

use std::num::NonZeroUsize;

mod schedulers;

pub use schedulers::{
    FcfsIoScheduler, FcfsScheduler, IoOperation, PreemptivePriorityScheduler, PriorityScheduler, ProcessRecord,
    RoundRobinScheduler, SjfScheduler,
};

mod scheduler;
pub use crate::scheduler::{DispatchPolicy, Pid, Process, ProcessState};

mod common_types;
pub use crate::common_types::{Action, TimelineEvent, Timestamp};
pub use crate::common_types::{DEFAULT_QUANTUM, SAFETY_MARGIN};

mod collector;
pub use crate::collector::Collector;
pub use crate::collector::QueueSnapshot;

mod process_control_block;
pub use process_control_block::ProcessControlBlock;

mod scheduler_info;
pub use crate::scheduler_info::ProcessManager;
pub use crate::scheduler_info::SchedulerInfo;

mod common_funcs;
pub use common_funcs::execute_expired;
pub use common_funcs::execute_preemption;
pub use common_funcs::execute_unit;

mod error;
pub use crate::error::{SchedError, SchedResult};

mod algorithm;
pub use crate::algorithm::{Algorithm, AlgorithmInfo};

pub mod io_manager;
pub use crate::io_manager::{IoResourceManager, IoStatistics, ResourceQueueState};

mod simulation;
pub use crate::simulation::{validate, Simulation, SimulationResult};

mod statistics;
pub use crate::statistics::Statistics;

pub mod timeline;
pub use crate::timeline::ExecutionBlock;

/// Returns a First-Come-First-Served policy
pub fn fcfs() -> impl DispatchPolicy {
    FcfsScheduler::new()
}

/// Returns a First-Come-First-Served policy where processes leave the CPU
/// for their I/O operations
pub fn fcfs_with_io() -> impl DispatchPolicy {
    FcfsIoScheduler::new()
}

/// Returns a non-preemptive Shortest-Job-First policy
pub fn sjf() -> impl DispatchPolicy {
    SjfScheduler::new()
}

/// Returns a Round Robin policy
///
/// * `timeslice` - the time quanta that a process can run before it is preempted
pub fn round_robin(timeslice: NonZeroUsize) -> impl DispatchPolicy {
    RoundRobinScheduler::new(timeslice)
}

/// Returns a non-preemptive priority policy, lower values run first
pub fn priority() -> impl DispatchPolicy {
    PriorityScheduler::new()
}

/// Returns a preemptive priority policy, lower values run first
pub fn priority_preemptive() -> impl DispatchPolicy {
    PreemptivePriorityScheduler::new()
}

/// Runs a workload through one algorithm
///
/// The input is never modified, every call starts from a clean state.
///
/// * `algorithm` - the scheduling algorithm
/// * `processes` - the workload
pub fn simulate(algorithm: Algorithm, processes: &[ProcessRecord]) -> SchedResult<SimulationResult> {
    Simulation::new(algorithm.policy(), processes)?.run()
}

/// Runs a workload through any dispatch policy
///
/// * `policy` - the dispatch rule
/// * `processes` - the workload
pub fn simulate_with<P: DispatchPolicy + 'static>(policy: P, processes: &[ProcessRecord]) -> SchedResult<SimulationResult> {
    Simulation::new(Box::new(policy), processes)?.run()
}

#[cfg(test)]
mod tests;

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::{Algorithm, ProcessRecord};

/// The identity of a simulated process
///
/// Pids are supplied by the caller and must be positive and unique
/// inside one workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pid(usize);

impl Pid {
    pub fn new(pid: usize) -> Pid {
        Pid(pid)
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The state of a simulated process
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessState {
    /// Waiting in the CPU ready queue (or not arrived yet)
    #[default]
    Ready,
    /// Holding the CPU
    Running,
    /// Waiting for, or being served by, an I/O resource
    Blocked,
    /// Finished its whole CPU burst
    Terminated,
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessState::Ready => "ready",
            ProcessState::Running => "running",
            ProcessState::Blocked => "blocked",
            ProcessState::Terminated => "terminated",
        };

        write!(f, "{}", name)
    }
}

/// A read-only view of a process, used by reports and snapshots
pub trait Process {
    /// The pid of the process
    fn pid(&self) -> Pid;

    /// The display label of the process
    fn name(&self) -> &str;

    /// The current state of the process
    fn state(&self) -> ProcessState;

    /// Returns the timings of the process
    ///
    /// The tuple contains the response (turnaround) time, the wait time
    /// and the CPU time consumed so far. Response and wait are 0 until
    /// the process terminates.
    fn timings(&self) -> (usize, usize, usize);

    /// The priority declared by the process, if any
    fn priority(&self) -> Option<i32>;

    /// Algorithm specific information about the process
    fn extra(&self) -> String;
}

/// The dispatch rule of one scheduling algorithm
///
/// The simulation engine owns the clock, the queues and the I/O devices.
/// A policy only answers the questions the engine asks at each time unit:
/// which ready process runs next, whether the running one must yield,
/// and how long a dispatch may last.
pub trait DispatchPolicy {
    /// The algorithm this policy implements
    fn algorithm(&self) -> Algorithm;

    /// Tie-break comparator between two ready processes
    ///
    /// `Ordering::Less` means `a` should run before `b`. Equal processes
    /// keep their ready queue order.
    fn compare(&self, _a: &ProcessRecord, _b: &ProcessRecord) -> Ordering {
        Ordering::Equal
    }

    /// Returns the position in the ready queue of the process to dispatch
    ///
    /// * `ready` - the ready queue, in insertion order
    fn select_next(&self, ready: &VecDeque<ProcessRecord>) -> Option<usize> {
        let mut best: Option<usize> = None;

        for (index, candidate) in ready.iter().enumerate() {
            match best {
                None => best = Some(index),
                Some(current) => {
                    if self.compare(candidate, &ready[current]) == Ordering::Less {
                        best = Some(index);
                    }
                }
            }
        }

        best
    }

    /// Decides if the running process has to be put back in the ready queue
    ///
    /// * `ready` - the ready queue, after this unit's arrivals
    /// * `running` - the process currently holding the CPU
    fn should_preempt(&self, _ready: &VecDeque<ProcessRecord>, _running: &ProcessRecord) -> bool {
        false
    }

    /// The maximum number of contiguous units granted per dispatch
    fn time_slice(&self) -> Option<NonZeroUsize> {
        None
    }

    /// Whether every process must declare a priority
    fn requires_priority(&self) -> bool {
        false
    }

    /// Whether processes leave the CPU to perform their I/O operations
    fn handles_io(&self) -> bool {
        false
    }
}

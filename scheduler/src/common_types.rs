use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::{Pid, ProcessState};

/// Quantum used by Round Robin when the caller gives none
pub const DEFAULT_QUANTUM: usize = 2;

/// Extra units added to the loop bound of every simulation
///
/// The bound is only a defect detector, a correct policy always finishes
/// well before it.
pub const SAFETY_MARGIN: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Timestamp(usize);

impl Timestamp {
    /// Creates a new Timestamp object
    ///
    /// * `time` - inital value of the Timestamp
    pub fn new(time: usize) -> Timestamp {
        Timestamp(time)
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Add<usize> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: usize) -> Self::Output {
        Timestamp::new(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}

/// What happened to a process during one time unit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// The process held the CPU for the unit
    CpuExecution,
    /// The process was served by an I/O resource for the unit
    IoExecution,
    /// The process finished an I/O operation and went back to the ready queue
    IoComplete,
    /// The process finished its last CPU unit
    ProcessComplete,
}

/// One entry of the append-only execution log
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub time: usize,
    pub process_id: Pid,
    pub process_name: String,
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ProcessState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

impl TimelineEvent {
    /// Creates a new entry without a resource
    ///
    /// * `time` - the time unit of the entry
    /// * `pid` - the process the entry refers to
    /// * `name` - display label of the process
    /// * `action` - what the process did
    /// * `state` - the state of the process after the action
    pub fn new(time: usize, pid: Pid, name: &str, action: Action, state: ProcessState) -> TimelineEvent {
        TimelineEvent {
            time,
            process_id: pid,
            process_name: name.to_string(),
            action,
            state: Some(state),
            resource: None,
        }
    }

    pub fn with_resource(mut self, resource: &str) -> TimelineEvent {
        self.resource = Some(resource.to_string());
        self
    }

    /// Returns true if the entry proves CPU occupancy
    pub fn is_cpu(&self) -> bool {
        self.action == Action::CpuExecution
    }
}

use serde::{Deserialize, Serialize};

use crate::{Pid, Process, ProcessControlBlock, ProcessState};

/// One I/O demand of a process
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IoOperation {
    /// The device the operation runs on
    pub resource: String,
    /// CPU units the process must consume before issuing the operation
    #[serde(rename = "cpuTimeBeforeIO")]
    pub cpu_time_before_io: usize,
    /// Units of service the operation needs
    pub duration: usize,
    /// Set once the device finished serving the operation
    #[serde(default)]
    pub completed: bool,
}

impl IoOperation {
    pub fn new(resource: &str, cpu_time_before_io: usize, duration: usize) -> IoOperation {
        IoOperation {
            resource: resource.to_string(),
            cpu_time_before_io,
            duration,
            completed: false,
        }
    }
}

/// A simulated process
///
/// The caller fills the input fields. The simulation works on its own
/// copy and fills the derived fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRecord {
    /// The pid of the process
    pub id: Pid,
    /// Display label
    pub name: String,
    /// Total CPU burst
    pub cpu_time: usize,
    /// The time unit when the process becomes eligible
    pub arrival_time: usize,
    /// Lower value means more urgent, only read by the priority policies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Ordered I/O demands, only read by FCFS with I/O
    #[serde(default)]
    pub io_operations: Vec<IoOperation>,

    /// First dispatch time
    #[serde(default)]
    pub start_time: Option<usize>,
    /// Completion time, exclusive
    #[serde(default)]
    pub finish_time: Option<usize>,
    /// `finish_time - arrival_time`
    #[serde(default)]
    pub response_time: Option<usize>,
    /// Time spent in the ready queue
    #[serde(default)]
    pub wait_time: Option<usize>,
    /// CPU units still needed
    #[serde(default)]
    pub remaining_time: usize,
    /// CPU units consumed so far
    #[serde(default)]
    pub cpu_time_used: usize,
    /// Units spent between I/O requests and their completion
    #[serde(default)]
    pub blocked_time: usize,
    #[serde(default)]
    pub current_state: ProcessState,

    /// Position of the process in the caller's list
    #[serde(skip)]
    slot: usize,
    /// Index of the next I/O operation not yet issued
    #[serde(skip)]
    next_io: usize,
}

impl ProcessRecord {
    /// Creates a new CPU-only process
    ///
    /// * `id` - pid of the process
    /// * `name` - display label
    /// * `cpu_time` - total CPU burst
    /// * `arrival_time` - time unit when the process arrives
    pub fn new(id: usize, name: &str, cpu_time: usize, arrival_time: usize) -> ProcessRecord {
        ProcessRecord {
            id: Pid::new(id),
            name: name.to_string(),
            cpu_time,
            arrival_time,
            priority: None,
            io_operations: Vec::new(),
            start_time: None,
            finish_time: None,
            response_time: None,
            wait_time: None,
            remaining_time: cpu_time,
            cpu_time_used: 0,
            blocked_time: 0,
            current_state: ProcessState::Ready,
            slot: 0,
            next_io: 0,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> ProcessRecord {
        self.priority = Some(priority);
        self
    }

    pub fn with_io(mut self, operation: IoOperation) -> ProcessRecord {
        self.io_operations.push(operation);
        self
    }

    /// Returns a copy with every derived field reset
    ///
    /// * `slot` - position of the process in the caller's list
    pub(crate) fn fresh_copy(&self, slot: usize) -> ProcessRecord {
        let mut copy = self.clone();

        copy.start_time = None;
        copy.finish_time = None;
        copy.response_time = None;
        copy.wait_time = None;
        copy.remaining_time = self.cpu_time;
        copy.cpu_time_used = 0;
        copy.blocked_time = 0;
        copy.current_state = ProcessState::Ready;
        copy.slot = slot;
        copy.next_io = 0;

        for operation in copy.io_operations.iter_mut() {
            operation.completed = false;
        }

        copy
    }

    pub(crate) fn slot(&self) -> usize {
        self.slot
    }

    /// The priority used for ordering, processes without one sort last
    pub fn effective_priority(&self) -> i32 {
        self.priority.unwrap_or(i32::MAX)
    }

    pub fn is_finished(&self) -> bool {
        self.finish_time.is_some()
    }

    /// Total I/O service the process asks for, `None` if it overflows
    pub fn io_time(&self) -> Option<usize> {
        self.io_operations
            .iter()
            .try_fold(0usize, |total, operation| total.checked_add(operation.duration))
    }
}

impl Process for ProcessRecord {
    fn pid(&self) -> Pid {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> ProcessState {
        self.current_state
    }

    fn timings(&self) -> (usize, usize, usize) {
        (
            self.response_time.unwrap_or(0),
            self.wait_time.unwrap_or(0),
            self.cpu_time_used,
        )
    }

    fn priority(&self) -> Option<i32> {
        self.priority
    }

    fn extra(&self) -> String {
        self.io_operations
            .iter()
            .map(|operation| {
                format!(
                    "{}@{}x{}",
                    operation.resource, operation.cpu_time_before_io, operation.duration
                )
            })
            .collect::<Vec<String>>()
            .join(",")
    }
}

impl ProcessControlBlock for ProcessRecord {
    fn set_state(&mut self, state: ProcessState) {
        self.current_state = state;
    }

    fn dispatch(&mut self, now: usize) -> bool {
        self.set_running();

        if self.start_time.is_none() {
            self.start_time = Some(now);
            return true;
        }

        false
    }

    fn execute(&mut self, time: usize) {
        self.cpu_time_used += time;
        self.remaining_time = self.remaining_time.saturating_sub(time);
    }

    fn pending_io(&self) -> Option<&IoOperation> {
        match self.io_operations.get(self.next_io) {
            Some(operation) if operation.cpu_time_before_io == self.cpu_time_used => Some(operation),
            _ => None,
        }
    }

    fn issue_io(&mut self) -> Option<usize> {
        if self.pending_io().is_none() {
            return None;
        }

        let index = self.next_io;
        self.next_io += 1;
        self.set_state(ProcessState::Blocked);

        Some(index)
    }

    fn finish_io(&mut self, index: usize, blocked_for: usize) {
        if let Some(operation) = self.io_operations.get_mut(index) {
            operation.completed = true;
        }

        self.blocked_time += blocked_for;
        self.set_state(ProcessState::Ready);
    }

    fn complete(&mut self, finish_time: usize) {
        let response = finish_time - self.arrival_time;

        self.finish_time = Some(finish_time);
        self.response_time = Some(response);
        self.wait_time = Some(response.saturating_sub(self.cpu_time + self.blocked_time));
        self.set_state(ProcessState::Terminated);
    }
}

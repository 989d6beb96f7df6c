use crate::{IoOperation, ProcessState};

/// The state transitions the engine applies to a process
pub trait ProcessControlBlock {
    fn set_state(&mut self, state: ProcessState);

    fn set_running(&mut self) {
        self.set_state(ProcessState::Running);
    }

    fn set_ready(&mut self) {
        self.set_state(ProcessState::Ready);
    }

    /// Gives the CPU to the process
    ///
    /// Returns true if this is the first dispatch of the process, in which
    /// case its start time is recorded.
    ///
    /// * `now` - the current time unit
    fn dispatch(&mut self, now: usize) -> bool;

    /// Adds `time` units of CPU consumption
    fn execute(&mut self, time: usize);

    /// Returns the I/O operation that is due at the current CPU consumption
    fn pending_io(&self) -> Option<&IoOperation>;

    /// Marks the due I/O operation as issued and blocks the process
    ///
    /// Returns the index of the issued operation.
    fn issue_io(&mut self) -> Option<usize>;

    /// Marks an I/O operation as completed and makes the process ready
    ///
    /// * `index` - the operation returned by `issue_io`
    /// * `blocked_for` - units off the cpu after the requesting unit, queueing included
    fn finish_io(&mut self, index: usize, blocked_for: usize);

    /// Records completion and derives response and wait times
    ///
    /// * `finish_time` - the first unit after the last CPU unit
    fn complete(&mut self, finish_time: usize);
}

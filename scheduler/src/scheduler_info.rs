use std::collections::VecDeque;

use log::debug;

use crate::{DispatchPolicy, Pid, Process, ProcessControlBlock, ProcessRecord, Timestamp, TimelineEvent};

pub trait SchedulerInfo {
    fn get_timestamp(&self) -> Timestamp;
    fn make_timeskip(&mut self, time: usize);

    fn get_policy(&self) -> &dyn DispatchPolicy;

    fn get_running(&self) -> Option<&ProcessRecord>;
    fn take_running(&mut self) -> Option<ProcessRecord>;
    fn set_running(&mut self, proc: Option<ProcessRecord>);

    fn get_ready(&self) -> &VecDeque<ProcessRecord>;
    fn get_ready_mut(&mut self) -> &mut VecDeque<ProcessRecord>;

    fn get_slice_left(&self) -> usize;
    fn set_slice_left(&mut self, time: usize);

    fn record(&mut self, event: TimelineEvent);

    fn has_running_process(&self) -> bool {
        self.get_running().is_some()
    }

    fn has_ready_processes(&self) -> bool {
        !self.get_ready().is_empty()
    }
}

pub trait ProcessManager: SchedulerInfo {
    /// Appends a process to the back of the ready queue
    fn enqueue_process(&mut self, mut proc: ProcessRecord) {
        proc.set_ready();
        self.get_ready_mut().push_back(proc);
    }

    /// Gives the CPU to the ready process chosen by the policy
    ///
    /// Returns the pid of the dispatched process.
    fn dequeue_process(&mut self) -> Option<Pid> {
        let index = self.get_policy().select_next(self.get_ready())?;
        let mut proc = self.get_ready_mut().remove(index)?;

        let now = self.get_timestamp().get();
        let first = proc.dispatch(now);

        if let Some(slice) = self.get_policy().time_slice() {
            self.set_slice_left(slice.get());
        }

        if first {
            debug!("{}: {} starts", now, proc.name());
        } else {
            debug!("{}: {} resumes ({} left)", now, proc.name(), proc.remaining_time);
        }

        let pid = proc.pid();
        self.set_running(Some(proc));

        Some(pid)
    }

    /// Puts the running process back in the ready queue
    ///
    /// It keeps its remaining time.
    fn preempt_running(&mut self) -> Option<Pid> {
        let proc = self.take_running()?;
        let pid = proc.pid();

        self.set_slice_left(0);
        self.enqueue_process(proc);

        Some(pid)
    }

    /// Moves newly arrived processes to the ready queue
    fn admit_arrivals(&mut self);

    /// Moves processes that finished their I/O to the ready queue
    fn release_io(&mut self);

    /// Hands a process to the I/O devices
    ///
    /// * `proc` - the process, already blocked
    /// * `operation` - the index of the issued operation
    fn block_process(&mut self, proc: ProcessRecord, operation: usize);

    /// Stores a process that finished its burst
    fn terminate_process(&mut self, proc: ProcessRecord);
}

use std::fmt;

use crate::{Pid, Process};

pub trait Collector {
    // Returns the process holding the CPU, if any
    fn collect_running(&self) -> Vec<&dyn Process>;

    // Returns the ready queue, in queue order
    fn collect_ready(&self) -> Vec<&dyn Process>;

    // Returns the processes waiting for, or using, an I/O resource
    fn collect_blocked(&self) -> Vec<&dyn Process>;

    // Returns the processes that already finished
    fn collect_terminated(&self) -> Vec<&dyn Process>;
}

/// Where every admitted process is at a given unit
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueueSnapshot {
    pub running: Option<Pid>,
    /// Queue order
    pub ready: Vec<Pid>,
    /// In service first, then queued requests
    pub blocked: Vec<Pid>,
    pub terminated: usize,
}

impl QueueSnapshot {
    pub fn of(scheduler: &dyn Collector) -> QueueSnapshot {
        let pids = |procs: Vec<&dyn Process>| procs.iter().map(|proc| proc.pid()).collect::<Vec<Pid>>();

        QueueSnapshot {
            running: scheduler.collect_running().first().map(|proc| proc.pid()),
            ready: pids(scheduler.collect_ready()),
            blocked: pids(scheduler.collect_blocked()),
            terminated: scheduler.collect_terminated().len(),
        }
    }

    /// Admitted processes that have not finished
    pub fn live(&self) -> usize {
        self.running.iter().count() + self.ready.len() + self.blocked.len()
    }
}

fn write_pids(f: &mut fmt::Formatter<'_>, pids: &[Pid]) -> fmt::Result {
    write!(f, "[")?;
    for (index, pid) in pids.iter().enumerate() {
        if index > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", pid)?;
    }
    write!(f, "]")
}

impl fmt::Display for QueueSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.running {
            Some(pid) => write!(f, "cpu {} ready ", pid)?,
            None => write!(f, "cpu - ready ")?,
        }
        write_pids(f, &self.ready)?;
        write!(f, " blocked ")?;
        write_pids(f, &self.blocked)?;
        write!(f, " done {}", self.terminated)
    }
}

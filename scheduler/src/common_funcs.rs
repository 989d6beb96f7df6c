use log::{debug, trace};

use crate::scheduler_info::ProcessManager;
use crate::{Action, Process, ProcessControlBlock, ProcessState, TimelineEvent};

/// Sends the running process to the back of the ready queue if it used its
/// whole time slice
///
/// Returns true if a context switch was forced.
pub fn execute_expired(scheduler: &mut dyn ProcessManager) -> bool {
    if scheduler.get_policy().time_slice().is_none() || scheduler.get_slice_left() != 0 {
        return false;
    }

    return if let Some(pid) = scheduler.preempt_running() {
        debug!("{}: pid {} used its quantum", scheduler.get_timestamp(), pid);
        true
    } else {
        false
    };
}

/// Preempts the running process if the policy asks for it
///
/// Returns true if the running process lost the CPU.
pub fn execute_preemption(scheduler: &mut dyn ProcessManager) -> bool {
    let preempt = match scheduler.get_running() {
        Some(running) => scheduler
            .get_policy()
            .should_preempt(scheduler.get_ready(), running),
        None => false,
    };

    if !preempt {
        return false;
    }

    if let Some(pid) = scheduler.preempt_running() {
        debug!("{}: pid {} preempted", scheduler.get_timestamp(), pid);
    }

    true
}

/// Runs the CPU for one time unit
///
/// After the unit the process either keeps the CPU, leaves it for its next
/// I/O operation, or terminates.
pub fn execute_unit(scheduler: &mut dyn ProcessManager) {
    let now = scheduler.get_timestamp().get();

    let mut proc = match scheduler.take_running() {
        Some(proc) => proc,
        None => {
            trace!("{}: cpu idle", now);
            return;
        }
    };

    scheduler.record(TimelineEvent::new(
        now,
        proc.pid(),
        proc.name(),
        Action::CpuExecution,
        ProcessState::Running,
    ));

    proc.execute(1);

    let slice = scheduler.get_slice_left();
    if slice > 0 {
        scheduler.set_slice_left(slice - 1);
    }

    trace!("{}: {} runs ({}/{})", now, proc.name(), proc.cpu_time_used, proc.cpu_time);

    if scheduler.get_policy().handles_io() {
        if let Some(operation) = proc.issue_io() {
            scheduler.set_slice_left(0);
            scheduler.block_process(proc, operation);
            return;
        }
    }

    if proc.remaining_time == 0 {
        proc.complete(now + 1);
        scheduler.set_slice_left(0);

        scheduler.record(TimelineEvent::new(
            now,
            proc.pid(),
            proc.name(),
            Action::ProcessComplete,
            ProcessState::Terminated,
        ));

        debug!("{}: {} terminated, turnaround {:?}", now + 1, proc.name(), proc.response_time);
        scheduler.terminate_process(proc);
        return;
    }

    scheduler.set_running(Some(proc));
}

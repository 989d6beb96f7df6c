use std::num::NonZeroUsize;

use crate::{Algorithm, DispatchPolicy};

/// Round Robin with a fixed time quanta
///
/// The head of the circular ready queue runs for at most `quanta` units.
/// A process that used its whole quanta goes to the back of the queue,
/// behind the processes that arrived while it was running.
#[derive(Clone, Copy, Debug)]
pub struct RoundRobinScheduler {
    quanta: NonZeroUsize,
}

impl RoundRobinScheduler {
    /// Creates a new Round Robin policy
    ///
    /// * `timeslice` - the time quanta that a process can run before it is preempted
    pub fn new(timeslice: NonZeroUsize) -> RoundRobinScheduler {
        RoundRobinScheduler { quanta: timeslice }
    }
}

impl DispatchPolicy for RoundRobinScheduler {
    fn algorithm(&self) -> Algorithm {
        Algorithm::RoundRobin { quantum: self.quanta }
    }

    fn time_slice(&self) -> Option<NonZeroUsize> {
        Some(self.quanta)
    }
}

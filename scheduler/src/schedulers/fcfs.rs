use crate::{Algorithm, DispatchPolicy};

/// First-Come-First-Served
///
/// Non-preemptive. The ready queue is filled in arrival order and its head
/// is always dispatched, so no comparator is needed.
#[derive(Clone, Copy, Debug, Default)]
pub struct FcfsScheduler;

impl FcfsScheduler {
    pub fn new() -> FcfsScheduler {
        FcfsScheduler
    }
}

impl DispatchPolicy for FcfsScheduler {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Fcfs
    }
}

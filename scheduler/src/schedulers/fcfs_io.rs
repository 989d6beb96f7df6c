use crate::{Algorithm, DispatchPolicy};

/// First-Come-First-Served with I/O operations
///
/// The CPU is never taken from a running process, but the process gives it
/// up when its CPU consumption reaches the offset of its next I/O operation.
/// It joins the back of the ready queue again once the I/O finishes.
#[derive(Clone, Copy, Debug, Default)]
pub struct FcfsIoScheduler;

impl FcfsIoScheduler {
    pub fn new() -> FcfsIoScheduler {
        FcfsIoScheduler
    }
}

impl DispatchPolicy for FcfsIoScheduler {
    fn algorithm(&self) -> Algorithm {
        Algorithm::FcfsIo
    }

    fn handles_io(&self) -> bool {
        true
    }
}

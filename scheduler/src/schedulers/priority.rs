use std::cmp::Ordering;

use crate::{Algorithm, DispatchPolicy, ProcessRecord};

/// Orders two processes by priority (lower value first), then by arrival
/// time, then by pid
pub(crate) fn priority_order(a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
    a.effective_priority()
        .cmp(&b.effective_priority())
        .then(a.arrival_time.cmp(&b.arrival_time))
        .then(a.id.cmp(&b.id))
}

/// Priority scheduling, non-preemptive
///
/// The most urgent ready process is dispatched whenever the CPU is free and
/// then runs its whole burst, even if a more urgent process arrives.
#[derive(Clone, Copy, Debug, Default)]
pub struct PriorityScheduler;

impl PriorityScheduler {
    pub fn new() -> PriorityScheduler {
        PriorityScheduler
    }
}

impl DispatchPolicy for PriorityScheduler {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Priority
    }

    fn compare(&self, a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
        priority_order(a, b)
    }

    fn requires_priority(&self) -> bool {
        true
    }
}

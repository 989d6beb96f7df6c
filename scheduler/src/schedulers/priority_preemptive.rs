use std::cmp::Ordering;
use std::collections::VecDeque;

use super::priority::priority_order;
use crate::{Algorithm, DispatchPolicy, ProcessRecord};

/// Priority scheduling, preemptive
///
/// Same ordering as the non-preemptive variant, but a running process loses
/// the CPU in the very unit a strictly more urgent process is ready. Equal
/// priorities never preempt each other.
#[derive(Clone, Copy, Debug, Default)]
pub struct PreemptivePriorityScheduler;

impl PreemptivePriorityScheduler {
    pub fn new() -> PreemptivePriorityScheduler {
        PreemptivePriorityScheduler
    }
}

impl DispatchPolicy for PreemptivePriorityScheduler {
    fn algorithm(&self) -> Algorithm {
        Algorithm::PriorityPreemptive
    }

    fn compare(&self, a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
        priority_order(a, b)
    }

    fn should_preempt(&self, ready: &VecDeque<ProcessRecord>, running: &ProcessRecord) -> bool {
        ready
            .iter()
            .map(|proc| proc.effective_priority())
            .min()
            .map_or(false, |best| best < running.effective_priority())
    }

    fn requires_priority(&self) -> bool {
        true
    }
}

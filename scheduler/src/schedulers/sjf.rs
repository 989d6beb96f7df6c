use std::cmp::Ordering;

use crate::{Algorithm, DispatchPolicy, ProcessRecord};

/// Shortest-Job-First, non-preemptive
///
/// The shortest burst is picked only when the CPU is free. A shorter job
/// arriving later waits for the running one to finish.
#[derive(Clone, Copy, Debug, Default)]
pub struct SjfScheduler;

impl SjfScheduler {
    pub fn new() -> SjfScheduler {
        SjfScheduler
    }
}

impl DispatchPolicy for SjfScheduler {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Sjf
    }

    /// Shorter burst first, then earlier arrival
    fn compare(&self, a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
        a.cpu_time
            .cmp(&b.cpu_time)
            .then(a.arrival_time.cmp(&b.arrival_time))
    }
}

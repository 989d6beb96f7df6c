//! The dispatch policies, one per scheduling algorithm
//!
//! Each policy only decides who runs. The clock, the queues and the I/O
//! devices belong to the `Simulation` engine.

mod process_block;
pub use process_block::{IoOperation, ProcessRecord};

mod fcfs;
pub use fcfs::FcfsScheduler;

mod fcfs_io;
pub use fcfs_io::FcfsIoScheduler;

mod sjf;
pub use sjf::SjfScheduler;

mod round_robin;
pub use round_robin::RoundRobinScheduler;

mod priority;
pub use priority::PriorityScheduler;

mod priority_preemptive;
pub use priority_preemptive::PreemptivePriorityScheduler;

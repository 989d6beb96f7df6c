//! The discrete-time simulation engine
//!
//! One engine drives every algorithm. At each time unit it completes I/O
//! requests, admits arrivals, applies quantum expiry and preemption, fills
//! an idle CPU and runs one unit. The `DispatchPolicy` decides who runs.

use std::collections::{BTreeMap, HashSet, VecDeque};

use log::{debug, info, trace};
use serde::Serialize;

use crate::collector::QueueSnapshot;
use crate::common_funcs::{execute_expired, execute_preemption, execute_unit};
use crate::common_types::SAFETY_MARGIN;
use crate::error::{SchedError, SchedResult};
use crate::io_manager::{IoResourceManager, ResourceQueueState};
use crate::scheduler_info::{ProcessManager, SchedulerInfo};
use crate::statistics::Statistics;
use crate::timeline::{cpu_occupancy, group_blocks, ExecutionBlock};
use crate::Collector;
use crate::{Action, DispatchPolicy, Pid, Process, ProcessRecord, ProcessState, Timestamp, TimelineEvent};

/// Everything a finished run produced
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// The algorithm tag, e.g. `ROUND_ROBIN`
    pub algorithm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantum: Option<usize>,
    /// The processes with their derived fields, in input order
    pub processes: Vec<ProcessRecord>,
    pub timeline: Vec<TimelineEvent>,
    /// Ids waiting in the ready queue after each unit's dispatch
    pub ready_queue: BTreeMap<usize, Vec<Pid>>,
    /// Final state of the I/O resources, only for runs with I/O
    #[serde(skip_serializing_if = "Option::is_none")]
    pub io_queues: Option<Vec<ResourceQueueState>>,
    pub statistics: Statistics,
}

impl SimulationResult {
    pub fn process(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.processes.iter().find(|proc| proc.id == pid)
    }

    /// The pids in the order they first got the CPU
    pub fn dispatch_order(&self) -> Vec<Pid> {
        let mut order: Vec<Pid> = Vec::new();

        for (_, pid) in cpu_occupancy(&self.timeline) {
            if !order.contains(&pid) {
                order.push(pid);
            }
        }

        order
    }

    /// The pid holding the CPU at every busy unit
    pub fn cpu_occupancy(&self) -> Vec<(usize, Pid)> {
        cpu_occupancy(&self.timeline)
    }

    pub fn blocks(&self) -> Vec<ExecutionBlock> {
        group_blocks(&self.timeline)
    }
}

/// Rejects a workload the engine cannot run
///
/// * `policy` - decides which checks apply
/// * `processes` - the caller's workload
pub fn validate(policy: &dyn DispatchPolicy, processes: &[ProcessRecord]) -> SchedResult<()> {
    if processes.is_empty() {
        return Err(SchedError::EmptyWorkload);
    }

    let mut seen: HashSet<Pid> = HashSet::new();

    for proc in processes {
        if proc.id.get() == 0 {
            return Err(SchedError::InvalidPid {
                process: proc.name.clone(),
            });
        }

        if !seen.insert(proc.id) {
            return Err(SchedError::DuplicatePid(proc.id));
        }

        if proc.name.trim().is_empty() {
            return Err(SchedError::InvalidField {
                process: proc.id.to_string(),
                field: "name",
                reason: "must not be empty",
            });
        }

        if proc.cpu_time == 0 {
            return Err(SchedError::InvalidField {
                process: proc.name.clone(),
                field: "cpuTime",
                reason: "must be at least 1",
            });
        }

        if policy.requires_priority() {
            match proc.priority {
                None => {
                    return Err(SchedError::MissingPriority {
                        process: proc.name.clone(),
                    })
                }
                Some(priority) if priority < 0 => {
                    return Err(SchedError::InvalidPriority {
                        process: proc.name.clone(),
                        priority,
                    })
                }
                Some(_) => {}
            }
        }

        if policy.handles_io() {
            validate_io(proc)?;
        }
    }

    Ok(())
}

fn validate_io(proc: &ProcessRecord) -> SchedResult<()> {
    let mut last_offset = 0;

    for (index, operation) in proc.io_operations.iter().enumerate() {
        let reason = if operation.resource.trim().is_empty() {
            Some("resource name must not be empty")
        } else if operation.duration == 0 {
            Some("duration must be at least 1")
        } else if operation.cpu_time_before_io == 0 {
            Some("cpuTimeBeforeIO must be at least 1")
        } else if operation.cpu_time_before_io >= proc.cpu_time {
            Some("cpuTimeBeforeIO must be lower than cpuTime")
        } else if operation.cpu_time_before_io <= last_offset {
            Some("cpuTimeBeforeIO must be strictly increasing")
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(SchedError::InvalidIoOperation {
                process: proc.name.clone(),
                index,
                reason,
            });
        }

        last_offset = operation.cpu_time_before_io;
    }

    Ok(())
}

/// The safety bound of a run
///
/// Every instant the engine computes stays below twice the bound, so a
/// bound whose double does not fit is refused up front.
///
/// * `last_arrival` - the latest arrival time
/// * `spans` - cpu bursts and I/O totals, `None` for a total that overflowed
fn horizon(last_arrival: usize, spans: &[Option<usize>]) -> SchedResult<usize> {
    spans
        .iter()
        .copied()
        .chain(std::iter::once(Some(SAFETY_MARGIN)))
        .try_fold(last_arrival, |bound, span| bound.checked_add(span?))
        .filter(|bound| bound.checked_mul(2).is_some())
        .ok_or(SchedError::HorizonOverflow { last_arrival })
}

pub struct Simulation {
    policy: Box<dyn DispatchPolicy>,
    /// Not arrived yet, sorted by arrival time
    incoming: VecDeque<ProcessRecord>,
    ready: VecDeque<ProcessRecord>,
    running: Option<ProcessRecord>,
    finished: Vec<ProcessRecord>,
    io: IoResourceManager,
    timeline: Vec<TimelineEvent>,
    ready_snapshots: BTreeMap<usize, Vec<Pid>>,
    timestamp: Timestamp,
    slice_left: usize,
    limit: usize,
    total: usize,
}

impl Simulation {
    /// Validates the workload and prepares a run
    ///
    /// The caller's records are copied, never modified.
    ///
    /// * `policy` - the dispatch rule of the algorithm
    /// * `processes` - the workload
    pub fn new(policy: Box<dyn DispatchPolicy>, processes: &[ProcessRecord]) -> SchedResult<Simulation> {
        validate(policy.as_ref(), processes)?;

        let mut incoming: Vec<ProcessRecord> = processes
            .iter()
            .enumerate()
            .map(|(slot, proc)| proc.fresh_copy(slot))
            .collect();

        /* stable, so simultaneous arrivals keep input order */
        incoming.sort_by_key(|proc| proc.arrival_time);

        let last_arrival = incoming.iter().map(|proc| proc.arrival_time).max().unwrap_or(0);
        let mut spans: Vec<Option<usize>> = incoming.iter().map(|proc| Some(proc.cpu_time)).collect();

        let mut io = IoResourceManager::new();
        if policy.handles_io() {
            io.initialize(processes);
            spans.extend(incoming.iter().map(|proc| proc.io_time()));
        }

        let limit = horizon(last_arrival, &spans)?;

        Ok(Simulation {
            policy,
            total: incoming.len(),
            incoming: incoming.into(),
            ready: VecDeque::new(),
            running: None,
            finished: Vec::new(),
            io,
            timeline: Vec::new(),
            ready_snapshots: BTreeMap::new(),
            timestamp: Timestamp::new(0),
            slice_left: 0,
            limit,
        })
    }

    /// The time unit past which the run is considered stuck
    pub fn limit(&self) -> usize {
        self.limit
    }

    fn is_done(&self) -> bool {
        self.finished.len() == self.total
    }

    /// Moves the clock to the next unit, or straight to the next arrival
    /// when nothing can happen before it
    fn advance(&mut self) {
        let idle = !self.has_running_process() && !self.has_ready_processes() && self.io.is_idle();

        let step = match self.incoming.front() {
            Some(next) if idle && next.arrival_time > self.timestamp.get() + 1 => {
                next.arrival_time - self.timestamp.get()
            }
            _ => 1,
        };

        if step > 1 {
            trace!("{}: idle until {}", self.timestamp.get(), self.timestamp.get() + step);
        }

        self.make_timeskip(step);
    }

    fn snapshot_ready(&mut self) {
        if self.ready.is_empty() {
            return;
        }

        let pids = self.ready.iter().map(|proc| proc.pid()).collect();
        self.ready_snapshots.insert(self.timestamp.get(), pids);
    }

    /// Runs the workload to completion
    pub fn run(mut self) -> SchedResult<SimulationResult> {
        let algorithm = self.policy.algorithm();
        info!("running {} over {} processes", algorithm, self.total);

        loop {
            let now = self.timestamp.get();
            if now > self.limit {
                return Err(SchedError::Timeout {
                    time: now,
                    limit: self.limit,
                });
            }

            self.release_io();
            self.admit_arrivals();

            execute_expired(&mut self);
            execute_preemption(&mut self);

            if !self.has_running_process() {
                self.dequeue_process();
            }

            execute_unit(&mut self);
            self.snapshot_ready();

            trace!("{}: {}", now, QueueSnapshot::of(&self));

            if self.is_done() {
                break;
            }

            self.advance();
        }

        for proc in self.collect_terminated() {
            let (turnaround, wait, used) = proc.timings();
            debug!(
                "pid {} ({}) {}: turnaround {}, wait {}, cpu {}, priority {:?} {}",
                proc.pid(),
                proc.name(),
                proc.state(),
                turnaround,
                wait,
                used,
                proc.priority(),
                proc.extra()
            );
        }

        let mut processes = self.finished;
        processes.sort_by_key(|proc| proc.slot());

        let io_stats = if self.policy.handles_io() {
            Some(self.io.statistics())
        } else {
            None
        };
        let statistics = Statistics::compute(&processes, &self.timeline, io_stats.as_ref());

        info!(
            "{} finished at {} with {} context switches",
            algorithm, statistics.simulation_time, statistics.context_switches
        );

        Ok(SimulationResult {
            algorithm: algorithm.tag().to_string(),
            quantum: algorithm.quantum(),
            processes,
            timeline: self.timeline,
            ready_queue: self.ready_snapshots,
            io_queues: io_stats.map(|_| self.io.queues_state()),
            statistics,
        })
    }
}

impl SchedulerInfo for Simulation {
    fn get_timestamp(&self) -> Timestamp {
        self.timestamp
    }

    fn make_timeskip(&mut self, time: usize) {
        self.timestamp = self.timestamp + time;
    }

    fn get_policy(&self) -> &dyn DispatchPolicy {
        self.policy.as_ref()
    }

    fn get_running(&self) -> Option<&ProcessRecord> {
        self.running.as_ref()
    }

    fn take_running(&mut self) -> Option<ProcessRecord> {
        self.running.take()
    }

    fn set_running(&mut self, proc: Option<ProcessRecord>) {
        self.running = proc;
    }

    fn get_ready(&self) -> &VecDeque<ProcessRecord> {
        &self.ready
    }

    fn get_ready_mut(&mut self) -> &mut VecDeque<ProcessRecord> {
        &mut self.ready
    }

    fn get_slice_left(&self) -> usize {
        self.slice_left
    }

    fn set_slice_left(&mut self, time: usize) {
        self.slice_left = time;
    }

    fn record(&mut self, event: TimelineEvent) {
        self.timeline.push(event);
    }
}

impl ProcessManager for Simulation {
    fn admit_arrivals(&mut self) {
        let now = self.timestamp.get();

        while let Some(next) = self.incoming.front() {
            if next.arrival_time > now {
                break;
            }

            if let Some(proc) = self.incoming.pop_front() {
                debug!("{}: {} arrives", now, proc.name());
                self.enqueue_process(proc);
            }
        }
    }

    fn release_io(&mut self) {
        if !self.policy.handles_io() {
            return;
        }

        let now = self.timestamp.get();

        for completion in self.io.process_io_operations(now) {
            let proc = completion.process;

            self.record(
                TimelineEvent::new(now, proc.pid(), proc.name(), Action::IoComplete, ProcessState::Ready)
                    .with_resource(&completion.resource),
            );

            if let Some(service) = completion.promoted {
                self.timeline.extend(service.timeline_events());
            }

            self.enqueue_process(proc);
        }
    }

    fn block_process(&mut self, proc: ProcessRecord, operation: usize) {
        let now = self.timestamp.get();

        debug!("{}: {} leaves the cpu for I/O", now, proc.name());

        if let Some(service) = self.io.start_io(proc, operation, now) {
            self.timeline.extend(service.timeline_events());
        }
    }

    fn terminate_process(&mut self, proc: ProcessRecord) {
        self.finished.push(proc);
    }
}

impl Collector for Simulation {
    fn collect_running(&self) -> Vec<&dyn Process> {
        match &self.running {
            Some(proc) => vec![proc as &dyn Process],
            None => Vec::new(),
        }
    }

    fn collect_ready(&self) -> Vec<&dyn Process> {
        self.ready.iter().map(|proc| proc as &dyn Process).collect()
    }

    fn collect_blocked(&self) -> Vec<&dyn Process> {
        self.io
            .blocked()
            .into_iter()
            .map(|proc| proc as &dyn Process)
            .collect()
    }

    fn collect_terminated(&self) -> Vec<&dyn Process> {
        self.finished.iter().map(|proc| proc as &dyn Process).collect()
    }
}

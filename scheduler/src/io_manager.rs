//! I/O Resource Manager
//!
//! Every resource is a single server with its own FIFO queue. A request is
//! served as soon as its resource is free; otherwise it waits behind the
//! requests issued before it, whatever the CPU priority of their processes.

use std::collections::{BTreeMap, VecDeque};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{Action, Pid, Process, ProcessControlBlock, ProcessRecord, ProcessState, TimelineEvent};

/// A request waiting for, or being served by, a resource
#[derive(Clone, Debug)]
pub struct IoRequest {
    /// The blocked process
    pub process: ProcessRecord,
    /// Index of the operation in `process.io_operations`
    pub operation: usize,
    /// The instant the request was issued
    pub requested_at: usize,
    /// Set when the request is promoted to "in service"
    pub start_time: Option<usize>,
    pub end_time: Option<usize>,
}

impl IoRequest {
    fn duration(&self) -> usize {
        self.process
            .io_operations
            .get(self.operation)
            .map(|operation| operation.duration)
            .unwrap_or(0)
    }
}

/// A request that just entered service
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IoService {
    pub pid: Pid,
    pub name: String,
    pub resource: String,
    pub start_time: usize,
    pub end_time: usize,
}

impl IoService {
    /// One `io_execution` entry per unit of the service interval
    pub fn timeline_events(&self) -> Vec<TimelineEvent> {
        (self.start_time..self.end_time)
            .map(|time| {
                TimelineEvent::new(time, self.pid, &self.name, Action::IoExecution, ProcessState::Blocked)
                    .with_resource(&self.resource)
            })
            .collect()
    }
}

/// A process released by a resource
#[derive(Clone, Debug)]
pub struct IoCompletion {
    pub process: ProcessRecord,
    pub resource: String,
    /// The request promoted in its place, if the queue was not empty
    pub promoted: Option<IoService>,
}

/// Display state of one resource
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceQueueState {
    pub resource: String,
    pub in_use: Option<String>,
    pub queue: Vec<String>,
    pub queue_length: usize,
}

/// Aggregated I/O activity of a run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IoStatistics {
    pub total_io_operations: usize,
    pub total_io_time: usize,
    /// Busy units per resource
    pub resource_utilization: BTreeMap<String, usize>,
}

struct ResourceQueue {
    name: String,
    queue: VecDeque<IoRequest>,
    in_service: Option<IoRequest>,
    requests: usize,
    busy_time: usize,
}

impl ResourceQueue {
    fn new(name: &str) -> ResourceQueue {
        ResourceQueue {
            name: name.to_string(),
            queue: VecDeque::new(),
            in_service: None,
            requests: 0,
            busy_time: 0,
        }
    }

    /// Moves the head of the queue to service if the resource is free
    ///
    /// * `now` - the instant service starts
    fn promote(&mut self, now: usize) -> Option<IoService> {
        if self.in_service.is_some() {
            return None;
        }

        let mut request = self.queue.pop_front()?;
        let duration = request.duration();
        let end = now.saturating_add(duration);

        request.start_time = Some(now);
        request.end_time = Some(end);
        self.busy_time += duration;

        debug!(
            "{}: resource {} assigned to {} until {}",
            now,
            self.name,
            request.process.name(),
            end
        );

        let service = IoService {
            pid: request.process.pid(),
            name: request.process.name().to_string(),
            resource: self.name.clone(),
            start_time: now,
            end_time: end,
        };
        self.in_service = Some(request);

        Some(service)
    }
}

#[derive(Default)]
pub struct IoResourceManager {
    resources: Vec<ResourceQueue>,
}

impl IoResourceManager {
    pub fn new() -> IoResourceManager {
        IoResourceManager { resources: Vec::new() }
    }

    /// Discovers the resources named by the processes' I/O operations
    ///
    /// Any previous state is dropped. Resources keep the order in which
    /// they are first named.
    pub fn initialize(&mut self, processes: &[ProcessRecord]) {
        self.resources.clear();

        for process in processes {
            for operation in process.io_operations.iter() {
                if self.find(&operation.resource).is_none() {
                    self.resources.push(ResourceQueue::new(&operation.resource));
                }
            }
        }

        debug!("I/O manager initialized with resources {:?}", self.resources());
    }

    pub fn resources(&self) -> Vec<&str> {
        self.resources.iter().map(|resource| resource.name.as_str()).collect()
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.resources.iter().position(|resource| resource.name == name)
    }

    /// Enqueues an I/O request and serves it at once if its resource is free
    ///
    /// Returns the service interval when the request started immediately.
    ///
    /// * `process` - the process issuing the request, already blocked
    /// * `operation` - index of the operation in the process' list
    /// * `now` - the instant the request is issued
    pub fn start_io(&mut self, process: ProcessRecord, operation: usize, now: usize) -> Option<IoService> {
        let name = process.io_operations.get(operation)?.resource.clone();

        let index = match self.find(&name) {
            Some(index) => index,
            None => {
                self.resources.push(ResourceQueue::new(&name));
                self.resources.len() - 1
            }
        };

        debug!("{}: {} requests resource {}", now, process.name(), name);

        let resource = &mut self.resources[index];
        resource.requests += 1;
        resource.queue.push_back(IoRequest {
            process,
            operation,
            requested_at: now,
            start_time: None,
            end_time: None,
        });

        resource.promote(now)
    }

    /// Completes every request whose service ended by `now`
    ///
    /// Freed resources immediately promote their next queued request.
    ///
    /// * `now` - the current time unit
    pub fn process_io_operations(&mut self, now: usize) -> Vec<IoCompletion> {
        let mut completions = Vec::new();

        for resource in self.resources.iter_mut() {
            let finished = match &resource.in_service {
                Some(request) => request.end_time.map_or(false, |end| end <= now),
                None => false,
            };

            if !finished {
                continue;
            }

            if let Some(request) = resource.in_service.take() {
                let mut process = request.process;
                /* the requesting unit was spent on the cpu */
                let blocked_for = now.saturating_sub(request.requested_at).saturating_sub(1);
                process.finish_io(request.operation, blocked_for);

                debug!("{}: {} completes I/O on {}", now, process.name(), resource.name);

                let promoted = resource.promote(now);
                completions.push(IoCompletion {
                    process,
                    resource: resource.name.clone(),
                    promoted,
                });
            }
        }

        completions
    }

    /// Returns true when no request is queued or in service
    pub fn is_idle(&self) -> bool {
        self.resources
            .iter()
            .all(|resource| resource.in_service.is_none() && resource.queue.is_empty())
    }

    /// The processes currently blocked on I/O, in service first
    pub fn blocked(&self) -> Vec<&ProcessRecord> {
        let mut procs: Vec<&ProcessRecord> = Vec::new();

        for resource in self.resources.iter() {
            if let Some(request) = &resource.in_service {
                procs.push(&request.process);
            }

            for request in resource.queue.iter() {
                procs.push(&request.process);
            }
        }

        procs
    }

    pub fn queues_state(&self) -> Vec<ResourceQueueState> {
        self.resources
            .iter()
            .map(|resource| ResourceQueueState {
                resource: resource.name.clone(),
                in_use: resource
                    .in_service
                    .as_ref()
                    .map(|request| request.process.name.clone()),
                queue: resource
                    .queue
                    .iter()
                    .map(|request| request.process.name.clone())
                    .collect(),
                queue_length: resource.queue.len(),
            })
            .collect()
    }

    pub fn statistics(&self) -> IoStatistics {
        let mut stats = IoStatistics::default();

        for resource in self.resources.iter() {
            stats.total_io_operations += resource.requests;
            stats.total_io_time += resource.busy_time;
            stats
                .resource_utilization
                .insert(resource.name.clone(), resource.busy_time);
        }

        stats
    }
}

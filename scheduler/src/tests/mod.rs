use crate::{Pid, ProcessRecord, SimulationResult};

mod fcfs;
mod fcfs_io;

pub(crate) fn proc(id: usize, cpu_time: usize, arrival_time: usize) -> ProcessRecord {
    ProcessRecord::new(id, &format!("P{}", id), cpu_time, arrival_time)
}

pub(crate) fn pids(ids: &[usize]) -> Vec<Pid> {
    ids.iter().map(|id| Pid::new(*id)).collect()
}

/// The pid at every busy CPU unit, in time order
pub(crate) fn occupancy(result: &SimulationResult) -> Vec<usize> {
    result
        .cpu_occupancy()
        .into_iter()
        .map(|(_, pid)| pid.get())
        .collect()
}

pub(crate) fn finish(result: &SimulationResult, id: usize) -> usize {
    result
        .process(Pid::new(id))
        .and_then(|proc| proc.finish_time)
        .unwrap()
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::io_manager::IoStatistics;
use crate::timeline::context_switches;
use crate::{ProcessRecord, TimelineEvent};

/// Aggregates of a finished run
///
/// Floating values are rounded to two decimals.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub average_response_time: f64,
    pub average_wait_time: f64,
    pub average_turnaround_time: f64,
    /// Completed processes per unit, between the first arrival and the last finish
    pub throughput: f64,
    /// Percentage of `[0, simulation_time)` the CPU was busy
    pub cpu_utilization: f64,
    pub total_processes: usize,
    /// The latest finish time
    pub simulation_time: usize,
    pub context_switches: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub io_utilization: Option<f64>,
    #[serde(default, rename = "totalIOOperations", skip_serializing_if = "Option::is_none")]
    pub total_io_operations: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_utilization: Option<BTreeMap<String, usize>>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn average(values: impl Iterator<Item = usize>, count: usize) -> f64 {
    values.map(|value| value as f64).sum::<f64>() / count as f64
}

impl Statistics {
    /// Derives the aggregates from the completed processes
    ///
    /// * `processes` - the processes of the run, unfinished ones are ignored
    /// * `timeline` - the execution log of the run
    /// * `io` - I/O activity, only for runs with I/O
    pub fn compute(processes: &[ProcessRecord], timeline: &[TimelineEvent], io: Option<&IoStatistics>) -> Statistics {
        let completed: Vec<&ProcessRecord> = processes.iter().filter(|proc| proc.is_finished()).collect();

        let mut stats = Statistics {
            context_switches: context_switches(timeline),
            ..Statistics::default()
        };

        if let Some(io) = io {
            stats.io_utilization = Some(0.0);
            stats.total_io_operations = Some(io.total_io_operations);
            stats.resource_utilization = Some(io.resource_utilization.clone());
        }

        if completed.is_empty() {
            return stats;
        }

        let count = completed.len();
        let end = completed
            .iter()
            .filter_map(|proc| proc.finish_time)
            .max()
            .unwrap_or(0);
        let start = processes.iter().map(|proc| proc.arrival_time).min().unwrap_or(0);

        let average_turnaround = average(completed.iter().filter_map(|proc| proc.response_time), count);
        let average_wait = average(completed.iter().filter_map(|proc| proc.wait_time), count);
        let busy: usize = completed.iter().map(|proc| proc.cpu_time).sum();

        stats.average_response_time = round2(average_turnaround);
        stats.average_turnaround_time = round2(average_turnaround);
        stats.average_wait_time = round2(average_wait);
        stats.total_processes = count;
        stats.simulation_time = end;

        if end > start {
            stats.throughput = round2(count as f64 / (end - start) as f64);
        }

        if end > 0 {
            stats.cpu_utilization = round2(busy as f64 / end as f64 * 100.0);

            if let Some(io) = io {
                stats.io_utilization = Some(round2(io.total_io_time as f64 / end as f64 * 100.0));
            }
        }

        stats
    }
}

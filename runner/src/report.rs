use std::fmt::{self, Write};

use cpu_scheduler::{Action, AlgorithmInfo, SimulationResult};

fn cell(value: Option<usize>) -> String {
    value.map_or_else(|| "-".to_string(), |value| value.to_string())
}

/// Renders the per-process table and the statistics of a run
pub fn format_report(result: &SimulationResult, info: &AlgorithmInfo) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "{} ({})", info.name, info.kind)?;
    writeln!(out, "{}", info.description)?;
    writeln!(out)?;
    writeln!(
        out,
        "{:>4} {:<10} {:>7} {:>4} {:>4} {:>6} {:>6} {:>10} {:>5} {:>7}",
        "ID", "NAME", "ARRIVAL", "CPU", "PRI", "START", "FINISH", "TURNAROUND", "WAIT", "BLOCKED"
    )?;

    for proc in result.processes.iter() {
        writeln!(
            out,
            "{:>4} {:<10} {:>7} {:>4} {:>4} {:>6} {:>6} {:>10} {:>5} {:>7}",
            proc.id.get(),
            proc.name,
            proc.arrival_time,
            proc.cpu_time,
            proc.priority.map_or_else(|| "-".to_string(), |priority| priority.to_string()),
            cell(proc.start_time),
            cell(proc.finish_time),
            cell(proc.response_time),
            cell(proc.wait_time),
            proc.blocked_time
        )?;
    }

    let stats = &result.statistics;
    writeln!(out)?;
    writeln!(out, "average turnaround time: {:.2}", stats.average_turnaround_time)?;
    writeln!(out, "average wait time:       {:.2}", stats.average_wait_time)?;
    writeln!(out, "throughput:              {:.2}", stats.throughput)?;
    writeln!(out, "cpu utilization:         {:.2}%", stats.cpu_utilization)?;
    writeln!(out, "context switches:        {}", stats.context_switches)?;
    write!(out, "simulation time:         {}", stats.simulation_time)?;

    if let (Some(operations), Some(utilization)) = (stats.total_io_operations, stats.io_utilization) {
        write!(out, "\nI/O operations:          {}", operations)?;
        write!(out, "\nI/O utilization:         {:.2}%", utilization)?;
    }

    if let Some(resources) = &stats.resource_utilization {
        for (resource, busy) in resources.iter() {
            write!(out, "\n  {:<21}  {} units busy", resource, busy)?;
        }
    }

    Ok(out)
}

/// Draws one row per process, `#` for CPU units and the first letter of
/// the resource for I/O units
pub fn format_gantt(result: &SimulationResult) -> Result<String, fmt::Error> {
    let width = result.statistics.simulation_time;
    let blocks = result.blocks();
    let mut out = String::new();

    for proc in result.processes.iter() {
        let mut row = vec!['.'; width];

        for block in blocks.iter().filter(|block| block.process_id == proc.id) {
            let mark = match (block.action, &block.resource) {
                (Action::IoExecution, Some(resource)) => resource.chars().next().unwrap_or('i'),
                _ => '#',
            };

            for slot in row.iter_mut().take(block.end_time.min(width)).skip(block.start_time) {
                *slot = mark;
            }
        }

        writeln!(out, "{:<10} |{}|", proc.name, row.into_iter().collect::<String>())?;
    }

    Ok(out.trim_end().to_string())
}

//! Helpers over the execution log
//!
//! The log interleaves CPU units, pre-expanded I/O service units and
//! completion markers. CPU occupancy is the `cpu_execution` subsequence.

use serde::{Deserialize, Serialize};

use crate::{Action, Pid, TimelineEvent};

/// A run of contiguous units of one process on one lane (CPU or resource)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionBlock {
    pub process_id: Pid,
    pub process_name: String,
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    pub start_time: usize,
    pub end_time: usize,
    pub duration: usize,
}

/// Counts the changes of process between consecutive CPU units
pub fn context_switches(timeline: &[TimelineEvent]) -> usize {
    let mut switches = 0;
    let mut last: Option<Pid> = None;

    for event in timeline.iter().filter(|event| event.is_cpu()) {
        if let Some(pid) = last {
            if pid != event.process_id {
                switches += 1;
            }
        }

        last = Some(event.process_id);
    }

    switches
}

/// Number of CPU units given to `pid`
pub fn cpu_units(timeline: &[TimelineEvent], pid: Pid) -> usize {
    timeline
        .iter()
        .filter(|event| event.is_cpu() && event.process_id == pid)
        .count()
}

/// The pid holding the CPU at each unit, in time order
pub fn cpu_occupancy(timeline: &[TimelineEvent]) -> Vec<(usize, Pid)> {
    timeline
        .iter()
        .filter(|event| event.is_cpu())
        .map(|event| (event.time, event.process_id))
        .collect()
}

/// Folds the log into contiguous blocks, the shape a Gantt chart draws
///
/// CPU blocks come first, then the blocks of each resource. Completion
/// markers are not part of any block.
pub fn group_blocks(timeline: &[TimelineEvent]) -> Vec<ExecutionBlock> {
    let mut lanes: Vec<&TimelineEvent> = timeline
        .iter()
        .filter(|event| matches!(event.action, Action::CpuExecution | Action::IoExecution))
        .collect();

    /* stable: CPU lane (no resource) first, then resources by name, each in time order */
    lanes.sort_by(|a, b| a.resource.cmp(&b.resource).then(a.time.cmp(&b.time)));

    let mut blocks: Vec<ExecutionBlock> = Vec::new();

    for event in lanes {
        if let Some(block) = blocks.last_mut() {
            if block.process_id == event.process_id
                && block.action == event.action
                && block.resource == event.resource
                && block.end_time == event.time
            {
                block.end_time += 1;
                block.duration += 1;
                continue;
            }
        }

        blocks.push(ExecutionBlock {
            process_id: event.process_id,
            process_name: event.process_name.clone(),
            action: event.action,
            resource: event.resource.clone(),
            start_time: event.time,
            end_time: event.time + 1,
            duration: 1,
        });
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProcessState;

    fn cpu(time: usize, pid: usize) -> TimelineEvent {
        TimelineEvent::new(time, Pid::new(pid), &format!("P{}", pid), Action::CpuExecution, ProcessState::Running)
    }

    #[test]
    fn switches_ignore_markers_and_io() {
        let timeline = vec![
            cpu(0, 1),
            cpu(1, 1),
            TimelineEvent::new(1, Pid::new(1), "P1", Action::ProcessComplete, ProcessState::Terminated),
            TimelineEvent::new(2, Pid::new(3), "P3", Action::IoExecution, ProcessState::Blocked)
                .with_resource("disk"),
            cpu(2, 2),
            cpu(3, 1),
        ];

        assert_eq!(context_switches(&timeline), 2);
        assert_eq!(cpu_units(&timeline, Pid::new(1)), 3);
        assert_eq!(
            cpu_occupancy(&timeline),
            vec![(0, Pid::new(1)), (1, Pid::new(1)), (2, Pid::new(2)), (3, Pid::new(1))]
        );
    }

    #[test]
    fn blocks_split_on_gaps_and_lanes() {
        let timeline = vec![
            cpu(0, 1),
            cpu(1, 1),
            TimelineEvent::new(2, Pid::new(1), "P1", Action::IoExecution, ProcessState::Blocked)
                .with_resource("disk"),
            TimelineEvent::new(3, Pid::new(1), "P1", Action::IoExecution, ProcessState::Blocked)
                .with_resource("disk"),
            cpu(2, 2),
            cpu(5, 2),
        ];

        let blocks = group_blocks(&timeline);

        assert_eq!(blocks.len(), 4);
        assert_eq!((blocks[0].process_id, blocks[0].start_time, blocks[0].duration), (Pid::new(1), 0, 2));
        assert_eq!((blocks[1].process_id, blocks[1].start_time, blocks[1].duration), (Pid::new(2), 2, 1));
        assert_eq!((blocks[2].process_id, blocks[2].start_time, blocks[2].duration), (Pid::new(2), 5, 1));
        assert_eq!(blocks[3].resource.as_deref(), Some("disk"));
        assert_eq!((blocks[3].start_time, blocks[3].end_time), (2, 4));
    }
}

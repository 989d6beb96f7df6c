use super::{finish, occupancy, proc};
use crate::{simulate, Action, Algorithm, IoOperation, Pid, ProcessRecord, ProcessState, SchedError};

fn io_units(result: &crate::SimulationResult, resource: &str) -> Vec<(usize, usize)> {
    result
        .timeline
        .iter()
        .filter(|event| event.action == Action::IoExecution && event.resource.as_deref() == Some(resource))
        .map(|event| (event.time, event.process_id.get()))
        .collect()
}

#[test]
fn without_io_behaves_like_fcfs() {
    let input = vec![proc(1, 9, 0), proc(2, 5, 1), proc(3, 3, 2), proc(4, 7, 3)];

    let with_io = simulate(Algorithm::FcfsIo, &input).unwrap();
    let plain = simulate(Algorithm::Fcfs, &input).unwrap();

    assert_eq!(with_io.algorithm, "FCFS_IO");
    assert_eq!(with_io.cpu_occupancy(), plain.cpu_occupancy());
    assert_eq!(finish(&with_io, 4), 24);
    assert_eq!(with_io.statistics.total_io_operations, Some(0));
    assert_eq!(with_io.io_queues, Some(Vec::new()));
}

#[test]
fn process_leaves_cpu_for_io() {
    let input = vec![proc(1, 4, 0).with_io(IoOperation::new("disk", 2, 3))];

    let result = simulate(Algorithm::FcfsIo, &input).unwrap();
    let p1 = result.process(Pid::new(1)).unwrap();

    assert_eq!(
        result.cpu_occupancy(),
        vec![(0, Pid::new(1)), (1, Pid::new(1)), (4, Pid::new(1)), (5, Pid::new(1))]
    );
    assert_eq!(io_units(&result, "disk"), vec![(1, 1), (2, 1), (3, 1)]);

    assert_eq!(p1.finish_time, Some(6));
    assert_eq!(p1.response_time, Some(6));
    assert_eq!(p1.blocked_time, 2);
    assert_eq!(p1.wait_time, Some(0));
    assert_eq!(p1.cpu_time_used, 4);
    assert_eq!(p1.current_state, ProcessState::Terminated);
    assert!(p1.io_operations[0].completed);

    let complete = result
        .timeline
        .iter()
        .find(|event| event.action == Action::IoComplete)
        .unwrap();
    assert_eq!(complete.time, 4);
    assert_eq!(complete.resource.as_deref(), Some("disk"));
    assert_eq!(complete.state, Some(ProcessState::Ready));

    let stats = &result.statistics;
    assert_eq!(stats.total_io_operations, Some(1));
    assert_eq!(stats.io_utilization, Some(50.0));
    assert_eq!(stats.cpu_utilization, 66.67);
    assert_eq!(stats.resource_utilization.as_ref().unwrap().get("disk"), Some(&3));

    let queues = result.io_queues.unwrap();
    assert_eq!(queues.len(), 1);
    assert_eq!(queues[0].resource, "disk");
    assert_eq!(queues[0].in_use, None);
    assert_eq!(queues[0].queue_length, 0);
}

#[test]
fn io_starts_in_the_unit_that_reaches_the_offset() {
    let input = vec![proc(1, 4, 0).with_io(IoOperation::new("disk", 2, 3)), proc(2, 2, 1)];

    let result = simulate(Algorithm::FcfsIo, &input).unwrap();

    /* P2 fills the cpu while P1 is served */
    assert_eq!(occupancy(&result), vec![1, 1, 2, 2, 1, 1]);
    assert_eq!(io_units(&result, "disk"), vec![(1, 1), (2, 1), (3, 1)]);

    let request = result
        .timeline
        .iter()
        .find(|event| event.action == Action::IoExecution)
        .unwrap();
    assert!(result.timeline.iter().any(|event| event.action == Action::CpuExecution
        && event.time == request.time
        && event.process_id == request.process_id));

    let p1 = result.process(Pid::new(1)).unwrap();
    assert_eq!((p1.finish_time, p1.blocked_time, p1.wait_time), (Some(6), 2, Some(0)));

    let p2 = result.process(Pid::new(2)).unwrap();
    assert_eq!((p2.start_time, p2.finish_time, p2.wait_time), (Some(2), Some(4), Some(1)));
}

#[test]
fn contended_resource_serves_in_request_order() {
    let input = vec![
        proc(1, 3, 0).with_io(IoOperation::new("disk", 1, 3)),
        proc(2, 3, 0).with_io(IoOperation::new("disk", 1, 2)),
    ];

    let result = simulate(Algorithm::FcfsIo, &input).unwrap();

    assert_eq!(io_units(&result, "disk"), vec![(0, 1), (1, 1), (2, 1), (3, 2), (4, 2)]);
    assert_eq!(occupancy(&result), vec![1, 2, 1, 1, 2, 2]);

    let p1 = result.process(Pid::new(1)).unwrap();
    assert_eq!((p1.finish_time, p1.blocked_time, p1.wait_time), (Some(5), 2, Some(0)));

    let p2 = result.process(Pid::new(2)).unwrap();
    assert_eq!((p2.finish_time, p2.blocked_time, p2.wait_time), (Some(7), 3, Some(1)));

    assert_eq!(result.statistics.context_switches, 3);
    assert_eq!(result.statistics.total_io_operations, Some(2));
    assert_eq!(result.statistics.resource_utilization.unwrap().get("disk"), Some(&5));
}

#[test]
fn distinct_resources_work_in_parallel() {
    let input = vec![
        proc(1, 2, 0).with_io(IoOperation::new("disk", 1, 2)),
        proc(2, 2, 0).with_io(IoOperation::new("net", 1, 2)),
    ];

    let result = simulate(Algorithm::FcfsIo, &input).unwrap();

    assert_eq!(io_units(&result, "disk"), vec![(0, 1), (1, 1)]);
    assert_eq!(io_units(&result, "net"), vec![(1, 2), (2, 2)]);
    assert_eq!(finish(&result, 1), 3);
    assert_eq!(finish(&result, 2), 4);

    let names: Vec<String> = result
        .io_queues
        .unwrap()
        .into_iter()
        .map(|state| state.resource)
        .collect();
    assert_eq!(names, vec!["disk".to_string(), "net".to_string()]);
}

#[test]
fn several_operations_of_one_process() {
    let input = vec![proc(1, 3, 0)
        .with_io(IoOperation::new("disk", 1, 1))
        .with_io(IoOperation::new("disk", 2, 1))];

    let result = simulate(Algorithm::FcfsIo, &input).unwrap();
    let p1 = result.process(Pid::new(1)).unwrap();

    assert_eq!(
        result.cpu_occupancy(),
        vec![(0, Pid::new(1)), (1, Pid::new(1)), (2, Pid::new(1))]
    );
    assert_eq!(p1.finish_time, Some(3));
    assert_eq!(p1.blocked_time, 0);
    assert_eq!(p1.wait_time, Some(0));
    assert!(p1.io_operations.iter().all(|operation| operation.completed));
    assert_eq!(result.statistics.total_io_operations, Some(2));
}

fn invalid(operation: IoOperation) -> SchedError {
    let input = vec![proc(1, 4, 0).with_io(operation)];
    simulate(Algorithm::FcfsIo, &input).unwrap_err()
}

#[test]
fn malformed_operations_are_rejected() {
    for operation in vec![
        IoOperation::new("disk", 0, 2),
        IoOperation::new("disk", 4, 2),
        IoOperation::new("disk", 1, 0),
        IoOperation::new(" ", 1, 1),
    ] {
        match invalid(operation) {
            SchedError::InvalidIoOperation { process, index, .. } => {
                assert_eq!(process, "P1");
                assert_eq!(index, 0);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}

#[test]
fn offsets_must_increase() {
    let input = vec![proc(1, 5, 0)
        .with_io(IoOperation::new("disk", 2, 1))
        .with_io(IoOperation::new("net", 2, 1))];

    match simulate(Algorithm::FcfsIo, &input).unwrap_err() {
        SchedError::InvalidIoOperation { index, .. } => assert_eq!(index, 1),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn other_algorithms_ignore_io() {
    let input: Vec<ProcessRecord> = vec![proc(1, 3, 0).with_io(IoOperation::new("disk", 0, 5))];

    let result = simulate(Algorithm::Fcfs, &input).unwrap();

    assert_eq!(occupancy(&result), vec![1, 1, 1]);
    assert_eq!(result.io_queues, None);
    assert_eq!(result.statistics.io_utilization, None);
    assert!(result
        .timeline
        .iter()
        .all(|event| event.action != Action::IoExecution));
}

use super::{finish, occupancy, pids, proc};
use crate::{simulate, Action, Algorithm, Pid, ProcessState};

fn workload() -> Vec<crate::ProcessRecord> {
    vec![proc(1, 9, 0), proc(2, 5, 1), proc(3, 3, 2), proc(4, 7, 3)]
}

#[test]
fn dispatches_in_arrival_order() {
    let result = simulate(Algorithm::Fcfs, &workload()).unwrap();

    assert_eq!(result.algorithm, "FCFS");
    assert_eq!(result.dispatch_order(), pids(&[1, 2, 3, 4]));
    assert_eq!(finish(&result, 1), 9);
    assert_eq!(finish(&result, 2), 14);
    assert_eq!(finish(&result, 3), 17);
    assert_eq!(finish(&result, 4), 24);

    let waits: Vec<usize> = result.processes.iter().map(|p| p.wait_time.unwrap()).collect();
    assert_eq!(waits, vec![0, 8, 12, 14]);

    let starts: Vec<usize> = result.processes.iter().map(|p| p.start_time.unwrap()).collect();
    assert_eq!(starts, vec![0, 9, 14, 17]);
}

#[test]
fn statistics_of_the_classic_workload() {
    let stats = simulate(Algorithm::Fcfs, &workload()).unwrap().statistics;

    assert_eq!(stats.average_turnaround_time, 14.5);
    assert_eq!(stats.average_response_time, 14.5);
    assert_eq!(stats.average_wait_time, 8.5);
    assert_eq!(stats.throughput, 0.17);
    assert_eq!(stats.cpu_utilization, 100.0);
    assert_eq!(stats.total_processes, 4);
    assert_eq!(stats.simulation_time, 24);
    assert_eq!(stats.context_switches, 3);
    assert_eq!(stats.total_io_operations, None);
}

#[test]
fn simultaneous_arrivals_keep_input_order() {
    let input = vec![proc(3, 2, 0), proc(1, 1, 0), proc(2, 1, 0)];

    let result = simulate(Algorithm::Fcfs, &input).unwrap();

    assert_eq!(result.dispatch_order(), pids(&[3, 1, 2]));
    let ids: Vec<Pid> = result.processes.iter().map(|p| p.id).collect();
    assert_eq!(ids, pids(&[3, 1, 2]));
}

#[test]
fn idle_gap_between_arrivals() {
    let result = simulate(Algorithm::Fcfs, &[proc(1, 2, 0), proc(2, 3, 5)]).unwrap();

    assert_eq!(
        result.cpu_occupancy(),
        vec![
            (0, Pid::new(1)),
            (1, Pid::new(1)),
            (5, Pid::new(2)),
            (6, Pid::new(2)),
            (7, Pid::new(2))
        ]
    );
    assert_eq!(finish(&result, 2), 8);
    assert_eq!(result.statistics.cpu_utilization, 62.5);
    assert_eq!(result.statistics.throughput, 0.25);
}

#[test]
fn single_late_process() {
    let result = simulate(Algorithm::Fcfs, &[proc(1, 5, 3)]).unwrap();
    let p1 = result.process(Pid::new(1)).unwrap();

    assert_eq!(p1.start_time, Some(3));
    assert_eq!(p1.finish_time, Some(8));
    assert_eq!(p1.response_time, Some(5));
    assert_eq!(p1.wait_time, Some(0));
    assert_eq!(p1.current_state, ProcessState::Terminated);
    assert!(result.ready_queue.is_empty());
    assert_eq!(occupancy(&result), vec![1; 5]);
}

#[test]
fn ready_queue_snapshots() {
    let result = simulate(Algorithm::Fcfs, &workload()).unwrap();

    assert_eq!(result.ready_queue.get(&0), None);
    assert_eq!(result.ready_queue.get(&1), Some(&pids(&[2])));
    assert_eq!(result.ready_queue.get(&3), Some(&pids(&[2, 3, 4])));
    assert_eq!(result.ready_queue.get(&9), Some(&pids(&[3, 4])));
    assert_eq!(result.ready_queue.get(&17), None);
}

#[test]
fn completion_marker_at_last_unit() {
    let result = simulate(Algorithm::Fcfs, &workload()).unwrap();

    let markers: Vec<(usize, usize)> = result
        .timeline
        .iter()
        .filter(|event| event.action == Action::ProcessComplete)
        .map(|event| (event.time, event.process_id.get()))
        .collect();

    assert_eq!(markers, vec![(8, 1), (13, 2), (16, 3), (23, 4)]);
    assert!(result
        .timeline
        .iter()
        .filter(|event| event.action == Action::ProcessComplete)
        .all(|event| event.state == Some(ProcessState::Terminated)));
}

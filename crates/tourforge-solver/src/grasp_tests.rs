//! Tests for the GRASP driver.

use super::*;
use crate::construction::FixedStartSelector;
use crate::event::{CountingEventListener, RecordingEventListener};
use crate::termination::{
    IterationCountTermination, OrTermination, TimeTermination, UnimprovedIterationCountTermination,
};
use tourforge_test::cities::{four_cities_optimal_length, FOUR_CITIES_OPTIMAL_ORDER};
use tourforge_test::{assert_permutation, four_cities, has_improving_reversal, random_cities};

#[test]
fn test_four_cities_scenario() {
    let cities = four_cities();
    let recorder = Arc::new(RecordingEventListener::new());
    let mut solver = GraspSolver::with_selector(5, FixedStartSelector::always(0))
        .with_listener(recorder.clone());

    let result = solver.solve(&cities).unwrap();

    assert_eq!(result.best_tour.order(), &FOUR_CITIES_OPTIMAL_ORDER);
    assert!((result.best_length - four_cities_optimal_length()).abs() < 1e-6);
    assert_eq!(result.iterations, 5);
    assert!(!result.terminated_early);
    assert_eq!(
        result.best_city_ids(&cities),
        vec![CityId(1), CityId(3), CityId(4), CityId(2)]
    );
    assert_eq!(recorder.iterations(), vec![0, 1, 2, 3, 4]);
    assert_eq!(recorder.best_change_count(), 1);
}

#[test]
fn test_best_cities_in_visiting_order() {
    let cities = four_cities();
    let result = GraspSolver::with_selector(1, FixedStartSelector::always(0))
        .solve(&cities)
        .unwrap();

    let coords: Vec<(f64, f64)> = result
        .best_cities(&cities)
        .into_iter()
        .map(|c| (c.x(), c.y()))
        .collect();
    assert_eq!(coords, vec![(0.0, 0.0), (2.0, 7.0), (3.0, 4.0), (5.0, 1.0)]);
}

#[test]
fn test_incumbent_is_monotone() {
    let cities = random_cities(30, 3);
    let recorder = Arc::new(RecordingEventListener::new());
    let mut solver = GraspSolver::with_seed(12, 3).with_listener(recorder.clone());

    let result = solver.solve(&cities).unwrap();

    let lengths = recorder.lengths();
    assert_eq!(lengths.len(), 12);
    for pair in lengths.windows(2) {
        assert!(pair[1] <= pair[0]);
    }
    assert_eq!(lengths.last().copied(), Some(result.best_length));
    assert_eq!(result.statistics.best_length_trace(), lengths);
}

#[test]
fn test_incumbent_is_best_refined_tour() {
    let cities = random_cities(25, 9);
    let result = GraspSolver::with_seed(10, 9).solve(&cities).unwrap();

    let min_refined = result
        .statistics
        .iterations
        .iter()
        .map(|r| r.refined_length)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(result.best_length, min_refined);

    let first_best = result
        .statistics
        .iterations
        .iter()
        .find(|r| r.refined_length == min_refined)
        .unwrap();
    assert_eq!(result.best_tour.start(), Some(first_best.start_index));
}

#[test]
fn test_result_is_permutation_and_local_optimum() {
    let cities = random_cities(28, 4);
    let result = GraspSolver::with_seed(6, 4).solve(&cities).unwrap();

    assert_permutation(&result.best_tour, cities.len());
    assert_eq!(has_improving_reversal(&result.best_tour, &cities, 0.0), None);
    assert_eq!(
        result.best_tour.total_distance(&cities).unwrap(),
        result.best_length
    );
}

#[test]
fn test_same_seed_same_result() {
    let cities = random_cities(40, 17);

    let first = GraspSolver::with_seed(8, 1234).solve(&cities).unwrap();
    let second = GraspSolver::with_seed(8, 1234).solve(&cities).unwrap();

    assert_eq!(first.best_tour, second.best_tour);
    assert_eq!(first.best_length.to_bits(), second.best_length.to_bits());
    assert_eq!(
        first.statistics.best_length_trace(),
        second.statistics.best_length_trace()
    );
}

#[test]
fn test_fixed_start_sequence_is_deterministic() {
    let cities = random_cities(20, 2);
    let starts = vec![5, 11, 0, 19];

    let first = GraspSolver::with_selector(4, FixedStartSelector::new(starts.clone()))
        .solve(&cities)
        .unwrap();
    let second = GraspSolver::with_selector(4, FixedStartSelector::new(starts.clone()))
        .solve(&cities)
        .unwrap();

    assert_eq!(first.best_tour, second.best_tour);
    assert_eq!(first.best_length.to_bits(), second.best_length.to_bits());
    let used: Vec<usize> = first
        .statistics
        .iterations
        .iter()
        .map(|r| r.start_index)
        .collect();
    assert_eq!(used, starts);
}

#[test]
fn test_matrix_and_direct_agree() {
    let cities = random_cities(30, 6);
    let starts = vec![1, 2, 3];

    let direct = GraspSolver::with_selector(3, FixedStartSelector::new(starts.clone()))
        .solve(&cities)
        .unwrap();
    let matrix = GraspSolver::with_selector(3, FixedStartSelector::new(starts))
        .with_distance_calculation(DistanceCalculation::Matrix)
        .solve(&cities)
        .unwrap();

    assert_eq!(direct.best_tour, matrix.best_tour);
    assert_eq!(direct.best_length.to_bits(), matrix.best_length.to_bits());
}

#[test]
fn test_single_city() {
    let cities = CityRegistry::from_points([(3.0, -2.0)]);
    let result = GraspSolver::with_seed(3, 0).solve(&cities).unwrap();

    assert_eq!(result.best_tour.order(), &[0]);
    assert_eq!(result.best_length, 0.0);
}

#[test]
fn test_two_cities() {
    let cities = CityRegistry::from_points([(0.0, 0.0), (3.0, 4.0)]);
    let result = GraspSolver::with_seed(3, 0).solve(&cities).unwrap();

    assert_eq!(result.best_tour.len(), 2);
    assert_eq!(result.best_length, 10.0);
}

#[test]
fn test_coincident_cities() {
    let cities = CityRegistry::from_points([(1.5, 1.5); 6]);
    let result = GraspSolver::with_seed(4, 8).solve(&cities).unwrap();

    assert_eq!(result.best_length, 0.0);
    assert_permutation(&result.best_tour, 6);
}

#[test]
fn test_empty_cities_is_invalid_input() {
    let listener = Arc::new(CountingEventListener::new());
    let mut solver = GraspSolver::with_seed(5, 1).with_listener(listener.clone());

    let err = solver.solve(&CityRegistry::new()).unwrap_err();

    assert!(err.is_invalid_input());
    assert!(listener.is_silent());
    assert_eq!(solver.state(), SolverState::Idle);
}

#[test]
fn test_zero_iterations_is_invalid_input() {
    let listener = Arc::new(CountingEventListener::new());
    let mut solver = GraspSolver::with_seed(0, 1).with_listener(listener.clone());

    let err = solver.solve(&four_cities()).unwrap_err();

    assert!(err.is_invalid_input());
    assert!(listener.is_silent());
    assert_eq!(solver.state(), SolverState::Idle);
}

#[test]
fn test_out_of_range_start_is_invalid_input() {
    let listener = Arc::new(CountingEventListener::new());
    let mut solver = GraspSolver::with_selector(3, FixedStartSelector::always(9))
        .with_listener(listener.clone());

    let err = solver.solve(&four_cities()).unwrap_err();

    assert!(err.is_invalid_input());
    assert!(listener.is_silent());
    assert_eq!(solver.state(), SolverState::Idle);
}

#[test]
fn test_out_of_range_start_mid_run_returns_to_idle() {
    let listener = Arc::new(CountingEventListener::new());
    let mut solver = GraspSolver::with_selector(3, FixedStartSelector::new(vec![0, 9]))
        .with_listener(listener.clone());

    let err = solver.solve(&four_cities()).unwrap_err();

    assert!(err.is_invalid_input());
    assert_eq!(listener.iteration_count(), 1);
    assert_eq!(listener.solving_ended_count(), 0);
    assert_eq!(solver.state(), SolverState::Idle);
}

#[test]
fn test_state_transitions() {
    let mut solver = GraspSolver::with_seed(2, 1);
    assert_eq!(solver.state(), SolverState::Idle);

    solver.solve(&four_cities()).unwrap();
    assert_eq!(solver.state(), SolverState::Done);

    // A finished solver can run again.
    let again = solver.solve(&four_cities()).unwrap();
    assert_eq!(again.iterations, 2);
    assert_eq!(solver.state(), SolverState::Done);
}

#[test]
fn test_listener_events_per_run() {
    let cities = random_cities(12, 5);
    let listener = Arc::new(CountingEventListener::new());
    let mut solver = GraspSolver::with_seed(7, 5).with_listener(listener.clone());

    let result = solver.solve(&cities).unwrap();

    assert_eq!(listener.solving_started_count(), 1);
    assert_eq!(listener.iteration_count(), 7);
    assert_eq!(listener.solving_ended_count(), 1);
    assert_eq!(
        listener.best_tour_count(),
        result.statistics.improvement_count()
    );
    assert!(listener.best_tour_count() >= 1);
}

#[test]
fn test_unimproved_termination_stops_early() {
    let cities = four_cities();
    let listener = Arc::new(CountingEventListener::new());
    let mut solver = GraspSolver::with_selector(10, FixedStartSelector::always(0))
        .with_termination(UnimprovedIterationCountTermination::new(1))
        .with_listener(listener.clone());

    let result = solver.solve(&cities).unwrap();

    assert_eq!(result.iterations, 2);
    assert!(result.terminated_early);
    assert_eq!(listener.iteration_count(), 2);
    assert_eq!(listener.solving_ended_count(), 1);
}

#[test]
fn test_iteration_cap_combined_with_time_limit() {
    let listener = Arc::new(CountingEventListener::new());
    let mut solver = GraspSolver::with_seed(100, 4)
        .with_termination(OrTermination((
            IterationCountTermination::new(4),
            TimeTermination::seconds(3600),
        )))
        .with_listener(listener.clone());

    let result = solver.solve(&random_cities(12, 4)).unwrap();

    assert_eq!(result.iterations, 4);
    assert!(result.terminated_early);
    assert_eq!(listener.iteration_count(), 4);
}

#[test]
fn test_termination_cannot_extend_max_iterations() {
    let mut solver = GraspSolver::with_seed(2, 1)
        .with_termination(IterationCountTermination::new(10));

    let result = solver.solve(&four_cities()).unwrap();

    assert_eq!(result.iterations, 2);
    assert!(!result.terminated_early);
}

#[test]
fn test_termination_checked_only_after_first_iteration() {
    let mut solver = GraspSolver::with_seed(5, 1)
        .with_termination(IterationCountTermination::new(0));

    let result = solver.solve(&four_cities()).unwrap();

    assert_eq!(result.iterations, 1);
    assert!(result.terminated_early);
}

#[test]
fn test_statistics_recorded() {
    let cities = random_cities(15, 12);
    let result = GraspSolver::with_seed(4, 12).solve(&cities).unwrap();
    let stats = &result.statistics;

    assert_eq!(stats.iteration_count, 4);
    assert_eq!(stats.iterations.len(), 4);
    assert_eq!(stats.improvement_history[0].iteration, 0);
    assert_eq!(stats.best_length(), Some(result.best_length));
    for record in &stats.iterations {
        assert!(record.refined_length <= record.constructed_length);
    }
    let evaluated: u64 = stats
        .iterations
        .iter()
        .map(|r| r.local_search.moves_evaluated)
        .sum();
    assert_eq!(stats.moves_evaluated, evaluated);
}

#[test]
fn test_epsilon_is_applied() {
    let cities = four_cities();
    let mut solver = GraspSolver::with_selector(1, FixedStartSelector::always(0))
        .with_local_search(TwoOptLocalSearch::with_epsilon(1.0).unwrap());

    let result = solver.solve(&cities).unwrap();

    // The only improving move saves about 0.82, below the threshold.
    assert_eq!(result.best_tour.order(), &[0, 3, 2, 1]);
}

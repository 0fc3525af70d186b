//! Tests for the event system.

use super::*;
use tourforge_test::four_cities;

#[test]
fn test_event_support_new() {
    let support = GraspEventSupport::new();

    assert_eq!(support.listener_count(), 0);
    assert!(!support.has_listeners());
}

#[test]
fn test_event_support_fire_events() {
    let cities = four_cities();
    let tour = Tour::identity(4);
    let mut support = GraspEventSupport::new();
    let listener = Arc::new(CountingEventListener::new());
    support.add_listener(listener.clone());

    support.fire_solving_started(&cities, 3);
    support.fire_best_tour_changed(&cities, &tour, 20.0, 0);
    support.fire_iteration_ended(&cities, &tour, 20.0, 0);
    support.fire_iteration_ended(&cities, &tour, 20.0, 1);
    support.fire_solving_ended(&cities, &tour, 20.0, false);

    assert_eq!(listener.solving_started_count(), 1);
    assert_eq!(listener.best_tour_count(), 1);
    assert_eq!(listener.iteration_count(), 2);
    assert_eq!(listener.solving_ended_count(), 1);
}

#[test]
fn test_event_support_clear_listeners() {
    let mut support = GraspEventSupport::new();
    support.add_listener(Arc::new(CountingEventListener::new()));
    support.add_listener(Arc::new(LoggingEventListener::new()));
    assert_eq!(support.listener_count(), 2);

    support.clear_listeners();
    assert!(!support.has_listeners());
}

#[test]
fn test_listeners_called_in_registration_order() {
    let cities = four_cities();
    let order = Arc::new(Mutex::new(Vec::new()));
    let mut support = GraspEventSupport::new();
    for name in ["first", "second"] {
        let order = Arc::clone(&order);
        support.add_listener(Arc::new(FnIterationListener::new(move |_, _, _, _| {
            order.lock().unwrap().push(name);
        })));
    }

    support.fire_iteration_ended(&cities, &Tour::identity(4), 1.0, 0);

    assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
}

#[test]
fn test_counting_listener_reset() {
    let cities = four_cities();
    let listener = CountingEventListener::new();
    assert!(listener.is_silent());

    listener.on_iteration_ended(&cities, &Tour::identity(4), 1.0, 0);
    assert!(!listener.is_silent());

    listener.reset();
    assert!(listener.is_silent());
}

#[test]
fn test_recording_listener() {
    let cities = four_cities();
    let listener = RecordingEventListener::new();
    let first = Tour::identity(4);
    let second = Tour::from_order_unchecked(vec![0, 2, 3, 1]);

    listener.on_best_tour_changed(&cities, &first, 21.0, 0);
    listener.on_iteration_ended(&cities, &first, 21.0, 0);
    listener.on_iteration_ended(&cities, &second, 19.5, 1);

    assert_eq!(listener.iterations(), vec![0, 1]);
    assert_eq!(listener.lengths(), vec![21.0, 19.5]);
    assert_eq!(listener.snapshots()[1].tour, second);
    assert_eq!(listener.best_change_count(), 1);
}

#[test]
fn test_recording_listener_survives_poisoned_lock() {
    let cities = four_cities();
    let listener = Arc::new(RecordingEventListener::new());
    listener.on_iteration_ended(&cities, &Tour::identity(4), 21.0, 0);

    let poisoner = Arc::clone(&listener);
    let joined = std::thread::spawn(move || {
        let _guard = poisoner.snapshots.lock().unwrap();
        panic!("poison the snapshot lock");
    })
    .join();
    assert!(joined.is_err());
    assert!(listener.snapshots.is_poisoned());

    listener.on_iteration_ended(&cities, &Tour::identity(4), 20.0, 1);
    assert_eq!(listener.iterations(), vec![0, 1]);
    assert_eq!(listener.lengths(), vec![21.0, 20.0]);
}

#[test]
fn test_logging_listener_does_not_panic() {
    let cities = four_cities();
    let tour = Tour::identity(4);
    let listener = LoggingEventListener::with_prefix("[test] ");

    listener.on_solving_started(&cities, 5);
    listener.on_best_tour_changed(&cities, &tour, 20.0, 0);
    listener.on_iteration_ended(&cities, &tour, 20.0, 0);
    listener.on_solving_ended(&cities, &tour, 20.0, true);
}

#[test]
fn test_support_debug_shows_count() {
    let mut support = GraspEventSupport::new();
    support.add_listener(Arc::new(CountingEventListener::new()));
    assert_eq!(
        format!("{support:?}"),
        "GraspEventSupport { listeners: 1 }"
    );
}

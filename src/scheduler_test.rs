use super::*;

fn tick(n: usize) -> Task {
    Task::CounterTick(ElementId(n))
}

#[test]
fn one_shot_fires_once_at_its_due_time() {
    let mut timers = ManualScheduler::new();
    let id = timers.after(300, tick(1));
    assert!(timers.pop_due(299).is_none());
    assert_eq!(timers.pop_due(300), Some((id, tick(1))));
    assert_eq!(timers.now(), 300);
    assert!(timers.pop_due(10_000).is_none());
    assert_eq!(timers.pending(), 0);
}

#[test]
fn due_timers_pop_in_time_then_id_order() {
    let mut timers = ManualScheduler::new();
    let late = timers.after(200, tick(1));
    let early_a = timers.after(100, tick(2));
    let early_b = timers.after(100, tick(3));
    let order: Vec<TimerId> = std::iter::from_fn(|| timers.pop_due(1_000)).map(|(id, _)| id).collect();
    assert_eq!(order, vec![early_a, early_b, late]);
}

#[test]
fn interval_rearms_until_cleared() {
    let mut timers = ManualScheduler::new();
    let id = timers.every(30, tick(1));
    let fired = std::iter::from_fn(|| timers.pop_due(95)).count();
    assert_eq!(fired, 3);
    assert!(timers.is_pending(id));

    timers.clear(id);
    assert!(!timers.is_pending(id));
    assert!(timers.pop_due(10_000).is_none());
}

#[test]
fn zero_interval_is_clamped_to_one_millisecond() {
    let mut timers = ManualScheduler::new();
    timers.every(0, tick(1));
    let fired = std::iter::from_fn(|| timers.pop_due(5)).count();
    assert_eq!(fired, 5);
}

#[test]
fn delays_are_relative_to_the_current_clock() {
    let mut timers = ManualScheduler::new();
    timers.set_now(1_000);
    let id = timers.after(300, tick(1));
    assert!(timers.pop_due(1_299).is_none());
    assert_eq!(timers.pop_due(1_300).map(|(fired, _)| fired), Some(id));
}

#[test]
fn clearing_an_unknown_id_is_ignored() {
    let mut timers = ManualScheduler::new();
    timers.after(10, tick(1));
    timers.clear(TimerId(42));
    assert_eq!(timers.pending(), 1);
}

// tests/clock_tests.rs
//
// Часы одного игрока без машины состояний:
//  1) reset идемпотентен и банкует Фишера;
//  2) pause/tick на стоящих часах: ошибка без порчи остатка;
//  3) окно Бронштейна: пауза внутри окна ничего не списывает;
//  4) тик считает фактически прошедшее время, а не запрошенную задержку;
//  5) устаревший тик отбрасывается.

use game_clock::time_ctrl::{Clock, ClockError, DelayType, TimeControlConfig};

fn fischer_5_3() -> TimeControlConfig {
    TimeControlConfig::new(300_000, 3, DelayType::Fischer, false)
}

#[test]
fn reset_twice_equals_reset_once() {
    let cfg = fischer_5_3();
    let mut clock = Clock::new(&cfg);
    clock.start_after_delay(0, 0).unwrap();
    clock.tick(1_000).unwrap();
    clock.record_move();

    let mut once = clock.clone();
    once.reset(&cfg);
    let mut twice = once.clone();
    twice.reset(&cfg);

    assert_eq!(once, twice);
    assert_eq!(once.remaining_ms(), 303_000);
    assert_eq!(once.move_number(), 1);
    assert!(!once.is_running());
    assert_eq!(once.last_tick(), None);
    assert_eq!(once.pending_tick(), None);
}

#[test]
fn pause_and_tick_on_idle_clock_are_rejected() {
    let cfg = fischer_5_3();
    let mut clock = Clock::new(&cfg);

    assert_eq!(clock.pause(10_000), Err(ClockError::NotRunning));
    assert_eq!(clock.tick(10_000), Err(ClockError::NotRunning));
    assert_eq!(clock.remaining_ms(), 303_000);

    clock.start_after_delay(0, 0).unwrap();
    assert_eq!(clock.start_after_delay(5, 0), Err(ClockError::AlreadyRunning));
}

#[test]
fn bronstein_window_absorbs_short_pause() {
    let cfg = TimeControlConfig::new(300_000, 5, DelayType::Bronstein, false);
    let mut clock = Clock::new(&cfg);

    let first = clock.start_after_delay(10_000, 5_000).unwrap();
    assert_eq!(first.due_at, 15_000);
    assert_eq!(clock.last_tick(), Some(15_000));

    let report = clock.pause(13_000).unwrap();
    assert_eq!(report.charged_ms, 0);
    assert!(!report.expired);
    assert_eq!(clock.remaining_ms(), 300_000);
}

#[test]
fn bronstein_boundary_charges_nothing() {
    let cfg = TimeControlConfig::new(300_000, 5, DelayType::Bronstein, false);
    let mut clock = Clock::new(&cfg);
    clock.start_after_delay(0, 5_000).unwrap();

    let report = clock.pause(5_000).unwrap();
    assert_eq!(report.charged_ms, 0);
    assert_eq!(clock.remaining_ms(), 300_000);
}

#[test]
fn tick_uses_actual_elapsed_time() {
    let cfg = fischer_5_3();
    let mut clock = Clock::new(&cfg);
    clock.start_after_delay(0, 0).unwrap();

    let r1 = clock.tick(0).unwrap();
    assert_eq!(r1.remaining_ms, 303_000);
    assert_eq!(r1.next_tick.map(|t| t.due_at), Some(1_000));

    // Тик опоздал на 37 мс: списываем ровно 1037, следующий: от фактического now.
    let r2 = clock.tick(1_037).unwrap();
    assert_eq!(r2.remaining_ms, 303_000 - 1_037);
    assert_eq!(r2.next_tick.map(|t| t.due_at), Some(2_037));
    assert_eq!(clock.last_tick(), Some(1_037));
}

#[test]
fn tick_switches_to_fine_period_under_ten_seconds() {
    let cfg = TimeControlConfig::new(10_500, 0, DelayType::Fischer, false);
    let mut clock = Clock::new(&cfg);
    clock.start_after_delay(0, 0).unwrap();

    let report = clock.tick(500).unwrap();
    assert_eq!(report.remaining_ms, 10_000);
    assert_eq!(report.next_tick.map(|t| t.due_at), Some(600));
}

#[test]
fn expiry_without_negative_time_clamps_to_zero_and_stops() {
    let cfg = TimeControlConfig::new(1_000, 0, DelayType::Fischer, false);
    let mut clock = Clock::new(&cfg);
    clock.start_after_delay(0, 0).unwrap();

    let report = clock.tick(1_040).unwrap();
    assert!(report.expired);
    assert_eq!(report.remaining_ms, 0);
    assert_eq!(report.next_tick, None);
    assert!(!clock.is_running());
    assert_eq!(clock.pending_tick(), None);
}

#[test]
fn negative_time_keeps_ticking_every_second() {
    let cfg = TimeControlConfig::new(1_000, 0, DelayType::Fischer, true);
    let mut clock = Clock::new(&cfg);
    clock.start_after_delay(0, 0).unwrap();

    let report = clock.tick(1_500).unwrap();
    assert!(!report.expired);
    assert_eq!(report.remaining_ms, -500);
    assert_eq!(report.next_tick.map(|t| t.due_at), Some(2_500));
}

#[test]
fn stale_tick_after_pause_is_discarded() {
    let cfg = fischer_5_3();
    let mut clock = Clock::new(&cfg);
    let tick = clock.start_after_delay(0, 0).unwrap();

    clock.pause(400).unwrap();
    let remaining = clock.remaining_ms();

    assert_eq!(clock.fire(1_000, tick.generation), Ok(None));
    assert_eq!(clock.remaining_ms(), remaining);
}

#[test]
fn cancel_drops_pending_tick_without_reconciling() {
    let cfg = fischer_5_3();
    let mut clock = Clock::new(&cfg);
    let tick = clock.start_after_delay(0, 0).unwrap();

    clock.cancel();
    assert!(!clock.is_running());
    assert_eq!(clock.remaining_ms(), 303_000);
    assert_eq!(clock.fire(50_000, tick.generation), Ok(None));
}

#[test]
fn apply_increment_is_unconditional() {
    let cfg = TimeControlConfig::new(1_000, 0, DelayType::Bronstein, true);
    let mut clock = Clock::new(&cfg);
    clock.apply_increment(30 * 60);
    assert_eq!(clock.remaining_ms(), 1_000 + 1_800_000);
}

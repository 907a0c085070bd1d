// tests/display_tests.rs
//
// Что видит слой отображения:
//  - текст циферблата для разных остатков;
//  - "0.0" у игрока, чей флажок упал;
//  - флаг low_time меньше 10 секунд;
//  - JSON-форма GameViewDto.

use game_clock::api::{execute_command, execute_query, Command, Query, QueryResponse};
use game_clock::domain::{GameState, PlayerSlot};
use game_clock::engine::GameEngine;
use game_clock::infra::{map_clock_to_dto, map_engine_to_view};
use game_clock::time_ctrl::{format_remaining, DelayType, TimeControlConfig};

#[test]
fn dial_text_examples() {
    assert_eq!(format_remaining(7_300), "7.3");
    assert_eq!(format_remaining(-500), "0");
    assert_eq!(format_remaining(-3_400), "-3");
    assert_eq!(format_remaining(3_725_000), "1:02:05");
}

#[test]
fn idle_view_shows_full_time_for_both() {
    let engine = GameEngine::new(TimeControlConfig::new(300_000, 0, DelayType::Fischer, false)).unwrap();
    let view = map_engine_to_view(&engine);

    assert_eq!(view.state, GameState::Idle);
    assert_eq!(view.active_player_id, None);
    for p in &view.players {
        assert_eq!(p.display, "5:00");
        assert!(!p.is_running);
        assert!(!p.is_active);
        assert!(!p.low_time);
    }
}

#[test]
fn flagged_player_shows_zero_point_zero() {
    let cfg = TimeControlConfig::new(1_000, 0, DelayType::Fischer, false);
    let mut engine = GameEngine::new(cfg).unwrap();
    engine.press_move(PlayerSlot::Two, 0).unwrap();

    while let Some(tick) = engine.next_wakeup() {
        engine.on_tick(tick.player, tick.generation, tick.due_at).unwrap();
    }
    assert_eq!(engine.state(), GameState::Done);

    let view = map_engine_to_view(&engine);
    let one = view.player(1).unwrap();
    assert_eq!(one.display, "0.0");
    assert_eq!(one.remaining_ms, 0);
    assert!(one.is_active);
    assert!(one.low_time);

    let two = view.player(2).unwrap();
    assert_eq!(two.display, "1.0");
    assert!(!two.is_active);
}

#[test]
fn low_time_flag_follows_ten_second_threshold() {
    let cfg = TimeControlConfig::new(12_000, 0, DelayType::Fischer, false);
    let mut engine = GameEngine::new(cfg).unwrap();
    engine.press_move(PlayerSlot::Two, 0).unwrap();

    engine.toggle_pause(2_000).unwrap();
    let dto = map_clock_to_dto(&engine, PlayerSlot::One);
    assert_eq!(dto.remaining_ms, 10_000);
    assert_eq!(dto.display, "10");
    assert!(!dto.low_time);

    engine.toggle_pause(2_000).unwrap();
    engine.toggle_pause(2_500).unwrap();
    let dto = map_clock_to_dto(&engine, PlayerSlot::One);
    assert_eq!(dto.display, "9.5");
    assert!(dto.low_time);
    assert!(!map_clock_to_dto(&engine, PlayerSlot::Two).low_time);
}

#[test]
fn negative_clock_is_rendered_with_sign() {
    let cfg = TimeControlConfig::new(1_000, 0, DelayType::Fischer, true);
    let mut engine = GameEngine::new(cfg).unwrap();
    engine.press_move(PlayerSlot::Two, 0).unwrap();
    engine.toggle_pause(66_000).unwrap();

    let dto = map_clock_to_dto(&engine, PlayerSlot::One);
    assert_eq!(dto.remaining_ms, -65_000);
    assert_eq!(dto.display, "-1:05");
    assert!(dto.low_time);
}

#[test]
fn command_returns_fresh_view() {
    let mut engine = GameEngine::new(TimeControlConfig::default()).unwrap();
    let view = execute_command(
        &mut engine,
        Command::MoveRequested {
            player: PlayerSlot::One,
        },
        0,
    )
    .unwrap();

    assert_eq!(view.state, GameState::Running);
    assert_eq!(view.active_player_id, Some(2));
    assert!(view.player(2).unwrap().is_running);
    assert_eq!(
        execute_query(&engine, Query::GetGameView),
        QueryResponse::GameView(view)
    );
}

#[test]
fn view_serializes_for_frontend() {
    let engine = GameEngine::new(TimeControlConfig::default()).unwrap();
    let json = serde_json::to_value(map_engine_to_view(&engine)).unwrap();

    assert_eq!(json["state"], "Idle");
    assert_eq!(json["active_player_id"], serde_json::Value::Null);
    assert_eq!(json["players"][0]["player_id"], 1);
    assert_eq!(json["players"][1]["display"], "5:03");
}

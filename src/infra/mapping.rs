use crate::api::dto::{GameViewDto, PlayerClockDto};
use crate::domain::{GameState, PlayerSlot};
use crate::engine::game_loop::GameEngine;
use crate::time_ctrl::{format_remaining, EXPIRED_DISPLAY, LOW_TIME_THRESHOLD_MS};

/// Маппинг часов одного игрока в DTO.
pub fn map_clock_to_dto(engine: &GameEngine, player: PlayerSlot) -> PlayerClockDto {
    let clock = engine.clock(player);
    let remaining_ms = clock.remaining_ms();

    // Упавший флажок показывает ровно ноль.
    let expired =
        engine.state() == GameState::Done && engine.active_player() == Some(player);
    let display = if expired {
        EXPIRED_DISPLAY.to_string()
    } else {
        format_remaining(remaining_ms)
    };

    PlayerClockDto {
        player_id: player.id(),
        remaining_ms,
        move_number: clock.move_number(),
        is_running: clock.is_running(),
        display,
        low_time: remaining_ms < LOW_TIME_THRESHOLD_MS,
        is_active: engine.active_player() == Some(player),
    }
}

/// Маппинг всей партии в `GameViewDto`.
pub fn map_engine_to_view(engine: &GameEngine) -> GameViewDto {
    GameViewDto {
        state: engine.state(),
        active_player_id: engine.active_player().map(PlayerSlot::id),
        players: [
            map_clock_to_dto(engine, PlayerSlot::One),
            map_clock_to_dto(engine, PlayerSlot::Two),
        ],
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::{DurationMs, GameState};

/// DTO часов одного игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerClockDto {
    /// 1 или 2.
    pub player_id: u8,
    pub remaining_ms: DurationMs,
    pub move_number: u32,
    pub is_running: bool,
    /// Готовый текст циферблата.
    pub display: String,
    /// Меньше 10 секунд: фронт красит циферблат.
    pub low_time: bool,
    /// Это игрок, чьи часы идут / шли / упали.
    pub is_active: bool,
}

/// DTO всей партии: то, что получает слой отображения после каждого изменения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameViewDto {
    pub state: GameState,
    pub active_player_id: Option<u8>,
    pub players: [PlayerClockDto; 2],
}

impl GameViewDto {
    pub fn player(&self, player_id: u8) -> Option<&PlayerClockDto> {
        self.players.iter().find(|p| p.player_id == player_id)
    }
}

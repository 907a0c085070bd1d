// src/domain/game_state.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// Состояние партии.
///
/// - `Idle`: ждём первого нажатия, ни одни часы не идут;
/// - `Running`: идут часы активного игрока;
/// - `Paused`: часы стоят, активный игрок запомнен и продолжит после resume;
/// - `Done`: у активного игрока кончилось время, партия окончена.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Idle,
    Running,
    Paused,
    Done,
}

impl GameState {
    /// Нужен ли в этом состоянии активный игрок.
    pub const fn has_active_player(self) -> bool {
        !matches!(self, GameState::Idle)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameState::Idle => "IDLE",
            GameState::Running => "RUNNING",
            GameState::Paused => "PAUSED",
            GameState::Done => "DONE",
        };
        f.write_str(s)
    }
}

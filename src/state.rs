use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{DurationMs, GameState, PlayerSlot, TimestampMs};
use crate::engine::{EngineError, GameEngine};
use crate::time_ctrl::{Clock, TimeControlConfig};

/// Снапшот партии для сохранения между запусками процесса.
///
/// Это «замороженная» партия: остатки, номера ходов, состояние и активный
/// игрок. Правила сюда не входят, их поставляет слой настроек.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub state: GameState,
    pub remaining_ms_1: DurationMs,
    pub remaining_ms_2: DurationMs,
    pub move_number_1: u32,
    pub move_number_2: u32,
    /// 1 или 2; `None` только для `Idle`.
    pub active_player_id: Option<u8>,
}

impl GameSnapshot {
    /// Упаковать живую партию в снапшот.
    ///
    /// Для идущей партии остатки берутся на момент последнего тика; чтобы
    /// не потерять время с тех пор, используйте `GameEngine::suspend`.
    pub fn from_engine(engine: &GameEngine) -> Self {
        let one = engine.clock(PlayerSlot::One);
        let two = engine.clock(PlayerSlot::Two);
        Self {
            state: engine.state(),
            remaining_ms_1: one.remaining_ms(),
            remaining_ms_2: two.remaining_ms(),
            move_number_1: one.move_number(),
            move_number_2: two.move_number(),
            active_player_id: engine.active_player().map(PlayerSlot::id),
        }
    }

    /// Развернуть снапшот обратно в партию.
    ///
    /// Часы всегда восстанавливаются "в покое". `Running` превращается в
    /// `Paused`: сама по себе партия после перезапуска не продолжается.
    pub fn into_engine(self, config: TimeControlConfig) -> Result<GameEngine, EngineError> {
        let active = match self.active_player_id {
            Some(id) => Some(PlayerSlot::from_id(id).ok_or_else(|| {
                EngineError::InvalidSnapshot(format!("unknown player id {}", id))
            })?),
            None => None,
        };

        let state = match self.state {
            GameState::Running => GameState::Paused,
            other => other,
        };

        let allow_negative = config.allow_negative_time;
        let clocks = [
            Clock::restored(self.remaining_ms_1, self.move_number_1, allow_negative),
            Clock::restored(self.remaining_ms_2, self.move_number_2, allow_negative),
        ];

        info!(restored = %state, saved = %self.state, ?active, "game restored from snapshot");
        GameEngine::from_parts(config, clocks, state, active)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl GameEngine {
    /// Подготовить партию к остановке процесса: поставить на паузу, если идёт,
    /// и снять снапшот.
    pub fn suspend(&mut self, now: TimestampMs) -> Result<GameSnapshot, EngineError> {
        if self.state() == GameState::Running {
            self.pause(now)?;
        }
        Ok(GameSnapshot::from_engine(self))
    }
}

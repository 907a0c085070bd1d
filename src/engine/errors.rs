use thiserror::Error;

use crate::domain::GameState;
use crate::time_ctrl::{ClockError, ConfigError};

/// Ошибки движка часов.
///
/// Всё это нарушения контракта со стороны вызывающего кода: состояние партии
/// при такой ошибке не меняется.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Нарушение контракта часов: {0}")]
    Clock(#[from] ClockError),

    #[error("Нет активного игрока для перехода в {0}")]
    NoActivePlayer(GameState),

    #[error("Недопустимое состояние партии: ожидалось {expected}, сейчас {found}")]
    InvalidState {
        expected: GameState,
        found: GameState,
    },

    #[error("Некорректный контроль времени: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Некорректный снапшот: {0}")]
    InvalidSnapshot(String),
}

use serde::{Deserialize, Serialize};

use crate::domain::{PlayerSlot, TimestampMs};
use crate::engine::GameEngine;
use crate::infra::mapping::map_engine_to_view;
use crate::time_ctrl::{TimeControlConfig, TimeControlSettings};

use super::dto::GameViewDto;
use super::errors::ApiError;

/// Команды, которые меняют состояние часов.
///
/// Их шлёт слой отображения (кнопки игроков, пауза, сброс, экран настроек).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Command {
    /// Игрок нажал свою кнопку: закончил ход.
    MoveRequested { player: PlayerSlot },

    /// Пауза / продолжение.
    PauseToggleRequested,

    /// Новая партия по текущим правилам.
    ResetRequested,

    /// Загружены новые правила: партия всегда сбрасывается.
    Reconfigure(TimeControlConfig),

    /// Пользователь поменял настройки посреди партии (см. `GameEngine::apply_preferences`).
    PreferencesChanged(TimeControlSettings),
}

/// Применить команду к партии и вернуть свежий вид для отрисовки.
pub fn execute_command(
    engine: &mut GameEngine,
    command: Command,
    now: TimestampMs,
) -> Result<GameViewDto, ApiError> {
    match command {
        Command::MoveRequested { player } => engine.press_move(player, now)?,
        Command::PauseToggleRequested => engine.toggle_pause(now)?,
        Command::ResetRequested => engine.reset(),
        Command::Reconfigure(config) => engine.reconfigure(config)?,
        Command::PreferencesChanged(settings) => {
            let config = settings
                .into_config()
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            engine.apply_preferences(config)?;
        }
    }
    Ok(map_engine_to_view(engine))
}

//! Движок партии: состояние часов, переходы IDLE/RUNNING/PAUSED/DONE, тики.
//!
//! Высокоуровневый объект: `GameEngine`
//! Основные операции:
//!   - `press_move` – игрок нажал свою кнопку (закончил ход)
//!   - `toggle_pause` – пауза / продолжение
//!   - `reset` / `reconfigure` – новая партия
//!   - `on_tick` – сработал тик планировщика

pub mod errors;
pub mod game_loop;
pub mod history;

pub use errors::EngineError;
pub use game_loop::{GameEngine, ScheduledTick};
pub use history::{ClockEvent, ClockHistory};

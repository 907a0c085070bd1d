//! Шахматные часы: двое часов, идут только одни, ход передаётся нажатием кнопки.
//!
//! Ядро: машина состояний партии (`engine::GameEngine`) и адаптивный
//! планировщик тиков (`time_ctrl`). Слой настроек и отображение живут снаружи:
//! они поставляют `TimeControlConfig` и получают `api::GameViewDto`.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod runtime;
pub mod state;
pub mod time_ctrl;

pub use api::{Command, GameViewDto};
pub use domain::{GameState, PlayerSlot};
pub use engine::{EngineError, GameEngine};
pub use state::GameSnapshot;
pub use time_ctrl::{DelayType, TimeControlConfig, TimeProfile, TournamentPhase};

//! Контроль времени: правила, часы одного игрока, передача хода, планировщик тиков.
//!
//! Здесь собираем:
//! - правила (`TimeControlConfig`, пресеты `TimeProfile`, сырые `TimeControlSettings`);
//! - часы одного игрока (`Clock`);
//! - правила добавки за ход (`DelayPolicy`);
//! - адаптивный планировщик тиков (`TickScheduler`);
//! - форматирование остатка для циферблата.

pub mod clock;
pub mod delay;
pub mod format;
pub mod scheduler;
pub mod time_rules;

pub use clock::{Clock, ClockError, PauseReport, TickReport};
pub use delay::{DelayPolicy, MoveOutcome};
pub use format::{format_remaining, EXPIRED_DISPLAY};
pub use scheduler::{next_tick_delay, PendingTick, TickPlan, TickScheduler, LOW_TIME_THRESHOLD_MS};
pub use time_rules::{
    ConfigError, DelayType, TimeControlConfig, TimeControlSettings, TimeProfile, TournamentPhase,
};

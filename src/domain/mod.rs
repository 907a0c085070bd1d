//! Доменная модель шахматных часов: игроки (два слота), состояние партии, метки времени.

pub mod game_state;
pub mod player;

/// Монотонная метка времени в миллисекундах (от произвольного начала отсчёта источника).
pub type TimestampMs = u64;

/// Длительность в миллисекундах со знаком (остаток времени может уйти в минус).
pub type DurationMs = i64;

pub use game_state::*;
pub use player::*;

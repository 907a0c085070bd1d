// src/time_ctrl/time_rules.rs
//! Конфигурация контроля времени для шахматных часов.
//!
//! Здесь описываем только "правила", без состояния и без привязки к конкретным часам.
//! Настройки приходят снаружи (экран настроек), ядро получает уже готовый
//! `TimeControlConfig` и дальше его не перечитывает.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::DurationMs;

/// Как начисляется добавочное время за ход.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DelayType {
    /// Добавка начисляется сходившему игроку сразу после хода (и один раз при старте).
    #[default]
    Fischer,
    /// Игрок получает окно задержки в начале хода, списывается только превышение.
    Bronstein,
}

/// Вторая фаза турнирного контроля: после N ходов игроку один раз добавляют минуты.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TournamentPhase {
    /// После скольких сделанных ходов начинается вторая фаза (> 0).
    pub move_count_threshold: u32,
    /// Сколько минут добавляется на границе фаз.
    pub phase2_bonus_minutes: u32,
}

impl TournamentPhase {
    /// Бонус второй фазы в секундах.
    pub const fn bonus_secs(&self) -> u32 {
        self.phase2_bonus_minutes.saturating_mul(60)
    }
}

/// Правила контроля времени для одной партии.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeControlConfig {
    /// Стартовое время каждого игрока, мс.
    pub initial_duration_ms: u64,
    /// Добавка (Фишер) или окно задержки (Бронштейн), секунды.
    pub increment_secs: u32,
    pub delay_type: DelayType,
    /// Можно ли уходить в минус вместо остановки партии на нуле.
    pub allow_negative_time: bool,
    /// Есть только при турнирном (многофазном) контроле.
    #[serde(default)]
    pub tournament_phase: Option<TournamentPhase>,
}

/// Ошибки конфигурации контроля времени.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Tournament phase must start after at least one move")]
    ZeroMovesThreshold,

    #[error("Malformed time control: {0}")]
    Malformed(String),
}

impl TimeControlConfig {
    /// Строгий конструктор для базового (однофазного) контроля.
    pub const fn new(
        initial_duration_ms: u64,
        increment_secs: u32,
        delay_type: DelayType,
        allow_negative_time: bool,
    ) -> Self {
        Self {
            initial_duration_ms,
            increment_secs,
            delay_type,
            allow_negative_time,
            tournament_phase: None,
        }
    }

    /// Добавить вторую турнирную фазу.
    pub const fn with_tournament_phase(self, phase: TournamentPhase) -> Self {
        Self {
            tournament_phase: Some(phase),
            ..self
        }
    }

    /// Добавка в миллисекундах.
    pub const fn increment_ms(&self) -> DurationMs {
        self.increment_secs as DurationMs * 1000
    }

    /// Стартовый остаток часов: начальное время плюс банк Фишера, если он включён.
    pub const fn starting_remaining_ms(&self) -> DurationMs {
        let base = if self.initial_duration_ms > DurationMs::MAX as u64 {
            DurationMs::MAX
        } else {
            self.initial_duration_ms as DurationMs
        };
        match self.delay_type {
            DelayType::Fischer => base.saturating_add(self.increment_ms()),
            DelayType::Bronstein => base,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(phase) = &self.tournament_phase {
            if phase.move_count_threshold == 0 {
                return Err(ConfigError::ZeroMovesThreshold);
            }
        }
        Ok(())
    }

    /// Разобрать и провалидировать конфиг из JSON.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Меняет ли переход на `other` стартовое время часов.
    ///
    /// Если нет (поменялись только добавка/тип задержки/минус), партию можно
    /// не сбрасывать и подменить правила на лету.
    pub fn requires_reset(&self, other: &TimeControlConfig) -> bool {
        self.initial_duration_ms != other.initial_duration_ms
            || self.tournament_phase != other.tournament_phase
    }

    /// Пресет по профилю.
    pub const fn from_profile(profile: TimeProfile) -> Self {
        match profile {
            TimeProfile::Blitz => Self::new(5 * 60 * 1000, 3, DelayType::Fischer, false),
            TimeProfile::Rapid => Self::new(15 * 60 * 1000, 10, DelayType::Fischer, false),
            TimeProfile::BronsteinBlitz => {
                Self::new(5 * 60 * 1000, 5, DelayType::Bronstein, false)
            }
            TimeProfile::Fide => Self::new(90 * 60 * 1000, 30, DelayType::Fischer, false)
                .with_tournament_phase(TournamentPhase {
                    move_count_threshold: 40,
                    phase2_bonus_minutes: 30,
                }),
        }
    }
}

impl Default for TimeControlConfig {
    fn default() -> Self {
        Self::from_profile(TimeProfile::Blitz)
    }
}

/// Готовые профили контроля.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeProfile {
    /// 5 минут + 3 секунды Фишера.
    Blitz,
    /// 15 минут + 10 секунд Фишера.
    Rapid,
    /// 5 минут + 5 секунд Бронштейна.
    BronsteinBlitz,
    /// 90 минут на 40 ходов, затем +30 минут, 30 секунд Фишера на ход.
    Fide,
}

/// "Сырые" настройки в том виде, как их заполняет пользователь.
///
/// Базовый контроль задаётся минутами и секундами, турнирный: минутами
/// первой фазы, числом ходов и минутами второй фазы.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimeControlSettings {
    Basic {
        minutes: u32,
        seconds: u32,
        increment_secs: u32,
        delay_type: DelayType,
        allow_negative_time: bool,
    },
    Tournament {
        phase1_minutes: u32,
        phase1_moves: u32,
        phase2_minutes: u32,
        increment_secs: u32,
        delay_type: DelayType,
        allow_negative_time: bool,
    },
}

impl TimeControlSettings {
    /// Собрать и провалидировать `TimeControlConfig`.
    pub fn into_config(self) -> Result<TimeControlConfig, ConfigError> {
        let config = match self {
            TimeControlSettings::Basic {
                minutes,
                seconds,
                increment_secs,
                delay_type,
                allow_negative_time,
            } => {
                let total_secs = u64::from(minutes) * 60 + u64::from(seconds);
                TimeControlConfig::new(
                    total_secs * 1000,
                    increment_secs,
                    delay_type,
                    allow_negative_time,
                )
            }
            TimeControlSettings::Tournament {
                phase1_minutes,
                phase1_moves,
                phase2_minutes,
                increment_secs,
                delay_type,
                allow_negative_time,
            } => TimeControlConfig::new(
                u64::from(phase1_minutes) * 60 * 1000,
                increment_secs,
                delay_type,
                allow_negative_time,
            )
            .with_tournament_phase(TournamentPhase {
                move_count_threshold: phase1_moves,
                phase2_bonus_minutes: phase2_minutes,
            }),
        };
        config.validate()?;
        Ok(config)
    }
}

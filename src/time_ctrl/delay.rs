// src/time_ctrl/delay.rs
//! Передача хода между часами: счётчик ходов, турнирный бонус, Фишер/Бронштейн.
//!
//! Живёт отдельно от `Clock`, потому что ей нужны оба участника сразу:
//! тот, кто закончил ход, и тот, кто начинает.

use serde::{Deserialize, Serialize};

use crate::domain::TimestampMs;

use super::clock::{Clock, ClockError, PauseReport};
use super::scheduler::PendingTick;
use super::{DelayType, TimeControlConfig};

/// Что произошло при передаче хода.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Ход передан, часы соперника пошли.
    Handed {
        /// Номер хода закончившего игрока после инкремента.
        move_number: u32,
        /// На этом ходу сработала граница турнирных фаз.
        phase_bonus_applied: bool,
        /// Сколько списали с закончившего игрока.
        charged_ms: i64,
        /// Окно задержки, с которым стартовали часы соперника.
        start_delay_ms: u64,
        next_tick: PendingTick,
    },
    /// Время закончившего игрока вышло до того, как он нажал кнопку.
    Flagged { charged_ms: i64 },
}

/// Правила начисления добавки. Чистые функции от конфига.
pub struct DelayPolicy;

impl DelayPolicy {
    /// С какой задержкой стартуют часы игрока, начинающего ход.
    pub const fn start_delay_ms(config: &TimeControlConfig) -> u64 {
        match config.delay_type {
            DelayType::Bronstein => config.increment_secs as u64 * 1000,
            DelayType::Fischer => 0,
        }
    }

    /// Бонус за ход, который получает закончивший игрок (только Фишер).
    pub const fn post_move_increment_secs(config: &TimeControlConfig) -> u32 {
        match config.delay_type {
            DelayType::Fischer => config.increment_secs,
            DelayType::Bronstein => 0,
        }
    }

    /// Передать ход от `finishing` к `starting`.
    ///
    /// Порядок важен: сначала счётчик и турнирный бонус, потом пауза
    /// (со списанием), потом Фишер, и только затем старт соперника.
    pub fn on_move(
        config: &TimeControlConfig,
        finishing: &mut Clock,
        starting: &mut Clock,
        now: TimestampMs,
    ) -> Result<MoveOutcome, ClockError> {
        if !finishing.is_running() {
            return Err(ClockError::NotRunning);
        }
        if starting.is_running() {
            return Err(ClockError::AlreadyRunning);
        }

        let move_number = finishing.record_move();

        let mut phase_bonus_applied = false;
        if let Some(phase) = &config.tournament_phase {
            if phase.move_count_threshold.checked_add(1) == Some(move_number) {
                finishing.apply_increment(phase.bonus_secs());
                phase_bonus_applied = true;
            }
        }

        let PauseReport {
            charged_ms,
            expired,
        } = finishing.pause(now)?;
        if expired {
            return Ok(MoveOutcome::Flagged { charged_ms });
        }

        let increment = Self::post_move_increment_secs(config);
        if increment > 0 {
            finishing.apply_increment(increment);
        }

        let start_delay_ms = Self::start_delay_ms(config);
        let next_tick = starting.start_after_delay(now, start_delay_ms)?;

        Ok(MoveOutcome::Handed {
            move_number,
            phase_bonus_applied,
            charged_ms,
            start_delay_ms,
            next_tick,
        })
    }
}

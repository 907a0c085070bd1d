// src/time_ctrl/clock.rs
//! Часы одного игрока: остаток времени, флаг хода и ожидающий тик.
//!
//! Часы ничего не знают о сопернике. Прошедшее время считается как
//! `now - last_tick`, поэтому опоздавший или преждевременный тик не
//! приводит к накоплению ошибки.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{DurationMs, TimestampMs};

use super::scheduler::{next_tick_delay, PendingTick, TickPlan, TickScheduler};
use super::TimeControlConfig;

/// Нарушения контракта часов. Остаток времени при этом не меняется.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockError {
    #[error("Clock is not running")]
    NotRunning,

    #[error("Clock is already running")]
    AlreadyRunning,
}

/// Результат применённого тика.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Остаток после тика.
    pub remaining_ms: DurationMs,
    /// Время вышло (минус запрещён, остаток дошёл до нуля).
    pub expired: bool,
    /// Следующий взведённый тик, если часы продолжают идти.
    pub next_tick: Option<PendingTick>,
}

/// Результат постановки часов на паузу.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseReport {
    /// Сколько списали при паузе (0, если ход уложился в окно Бронштейна).
    pub charged_ms: DurationMs,
    /// Остаток дошёл до нуля раньше, чем успел прийти тик.
    pub expired: bool,
}

/// Часы одного игрока.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clock {
    remaining_ms: DurationMs,
    is_running: bool,
    /// `None`: время сейчас не копится (пауза, ожидание, только что восстановлены).
    last_tick: Option<TimestampMs>,
    move_number: u32,
    allow_negative_time: bool,
    scheduler: TickScheduler,
}

impl Clock {
    /// Новые часы в стартовом состоянии по конфигу.
    pub fn new(config: &TimeControlConfig) -> Self {
        Self {
            remaining_ms: config.starting_remaining_ms(),
            is_running: false,
            last_tick: None,
            move_number: 1,
            allow_negative_time: config.allow_negative_time,
            scheduler: TickScheduler::new(),
        }
    }

    /// Часы "в покое" с сохранёнными значениями (восстановление после перезапуска).
    pub fn restored(remaining_ms: DurationMs, move_number: u32, allow_negative_time: bool) -> Self {
        Self {
            remaining_ms,
            is_running: false,
            last_tick: None,
            move_number: move_number.max(1),
            allow_negative_time,
            scheduler: TickScheduler::new(),
        }
    }

    /// Вернуть часы в стартовое состояние.
    ///
    /// Для Фишера добавка сразу попадает в остаток. Ожидающий тик снимается.
    pub fn reset(&mut self, config: &TimeControlConfig) {
        self.scheduler.cancel();
        self.remaining_ms = config.starting_remaining_ms();
        self.is_running = false;
        self.last_tick = None;
        self.move_number = 1;
        self.allow_negative_time = config.allow_negative_time;
    }

    /// Запустить часы; первый тик придёт через `delay_ms`.
    ///
    /// Для Бронштейна `last_tick` сдвигается в будущее на окно задержки:
    /// время внутри окна просто не считается, к остатку ничего не добавляется.
    pub fn start_after_delay(
        &mut self,
        now: TimestampMs,
        delay_ms: u64,
    ) -> Result<PendingTick, ClockError> {
        if self.is_running {
            return Err(ClockError::AlreadyRunning);
        }
        self.is_running = true;
        self.last_tick = Some(now.saturating_add(delay_ms));
        Ok(self.scheduler.arm(now, delay_ms))
    }

    /// Остановить часы и списать время с последнего тика.
    ///
    /// Отрицательный интервал (пауза внутри окна Бронштейна) ничего не списывает.
    pub fn pause(&mut self, now: TimestampMs) -> Result<PauseReport, ClockError> {
        if !self.is_running {
            return Err(ClockError::NotRunning);
        }
        self.scheduler.cancel();

        let elapsed = self.elapsed_since_last_tick(now);
        let mut charged_ms = 0;
        if elapsed > 0 {
            self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
            charged_ms = elapsed;
        }

        self.is_running = false;
        self.last_tick = None;

        let expired = charged_ms > 0 && self.clamp_if_expired();
        Ok(PauseReport {
            charged_ms,
            expired,
        })
    }

    /// Снять ожидающий тик без пересчёта остатка (часы выбрасываются или сбрасываются).
    pub fn cancel(&mut self) {
        self.scheduler.cancel();
        self.is_running = false;
        self.last_tick = None;
    }

    /// Безусловно добавить `secs` секунд.
    pub fn apply_increment(&mut self, secs: u32) {
        self.remaining_ms = self
            .remaining_ms
            .saturating_add(DurationMs::from(secs) * 1000);
    }

    /// Игрок закончил очередной ход.
    pub fn record_move(&mut self) -> u32 {
        self.move_number = self.move_number.saturating_add(1);
        self.move_number
    }

    /// Применить тик: списать прошедшее время и перевзвести следующий.
    pub fn tick(&mut self, now: TimestampMs) -> Result<TickReport, ClockError> {
        if !self.is_running {
            return Err(ClockError::NotRunning);
        }

        let elapsed = self.elapsed_since_last_tick(now);
        if elapsed > 0 {
            self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
        }
        // last_tick не должен уезжать назад (тик внутри окна Бронштейна).
        self.last_tick = self.last_tick.map(|last| last.max(now)).or(Some(now));

        match next_tick_delay(self.remaining_ms, self.allow_negative_time) {
            TickPlan::Rearm { delay_ms } => {
                let next = self.scheduler.arm(now, delay_ms);
                Ok(TickReport {
                    remaining_ms: self.remaining_ms,
                    expired: false,
                    next_tick: Some(next),
                })
            }
            TickPlan::Expire => {
                self.clamp_if_expired();
                self.cancel();
                Ok(TickReport {
                    remaining_ms: self.remaining_ms,
                    expired: true,
                    next_tick: None,
                })
            }
        }
    }

    /// Сработал тик из планировщика.
    ///
    /// `Ok(None)`: тик устарел (часы успели встать на паузу, сброситься или
    /// перевзвестись), его просто отбрасываем.
    pub fn fire(
        &mut self,
        now: TimestampMs,
        generation: u64,
    ) -> Result<Option<TickReport>, ClockError> {
        if !self.scheduler.accept(generation) {
            return Ok(None);
        }
        self.tick(now).map(Some)
    }

    pub fn remaining_ms(&self) -> DurationMs {
        self.remaining_ms
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn last_tick(&self) -> Option<TimestampMs> {
        self.last_tick
    }

    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    pub fn allow_negative_time(&self) -> bool {
        self.allow_negative_time
    }

    pub fn set_allow_negative_time(&mut self, allow: bool) {
        self.allow_negative_time = allow;
    }

    pub fn pending_tick(&self) -> Option<PendingTick> {
        self.scheduler.pending()
    }

    fn elapsed_since_last_tick(&self, now: TimestampMs) -> DurationMs {
        match self.last_tick {
            Some(last) => now as DurationMs - last as DurationMs,
            None => 0,
        }
    }

    /// Без права на минус остаток не опускается ниже нуля.
    fn clamp_if_expired(&mut self) -> bool {
        if self.allow_negative_time || self.remaining_ms > 0 {
            return false;
        }
        self.remaining_ms = 0;
        true
    }
}

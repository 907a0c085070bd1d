// src/time_ctrl/scheduler.rs
//! Планировщик тиков для идущих часов.
//!
//! Частота тиков зависит от остатка времени: раз в секунду большую часть партии,
//! десять раз в секунду в последние 10 секунд, раз в секунду в минусе (если он
//! разрешён). Следующий тик всегда отсчитывается от фактического `now`, а не
//! накапливается фиксированным периодом, поэтому дрожание таймеров не копится.

use serde::{Deserialize, Serialize};

use crate::domain::{DurationMs, TimestampMs};

/// Порог "мало времени": ниже него тикаем часто.
pub const LOW_TIME_THRESHOLD_MS: DurationMs = 10_000;
/// Обычный период тика.
pub const COARSE_TICK_MS: u64 = 1_000;
/// Период тика при малом остатке.
pub const FINE_TICK_MS: u64 = 100;

/// Что делать после очередного применённого тика.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickPlan {
    /// Перевзвести тик через указанное число миллисекунд.
    Rearm { delay_ms: u64 },
    /// Время вышло: тиков больше не будет, нужно сигналить об истечении.
    Expire,
}

/// Задержка до следующего тика по остатку *после* тика.
pub fn next_tick_delay(remaining_ms: DurationMs, allow_negative_time: bool) -> TickPlan {
    if remaining_ms > LOW_TIME_THRESHOLD_MS {
        TickPlan::Rearm {
            delay_ms: COARSE_TICK_MS,
        }
    } else if remaining_ms > 0 {
        TickPlan::Rearm {
            delay_ms: FINE_TICK_MS,
        }
    } else if allow_negative_time {
        TickPlan::Rearm {
            delay_ms: COARSE_TICK_MS,
        }
    } else {
        TickPlan::Expire
    }
}

/// Взведённый тик: когда сработать и к какому поколению он относится.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTick {
    pub due_at: TimestampMs,
    pub generation: u64,
}

/// Единственный ожидающий тик для одних часов.
///
/// - `arm` заменяет предыдущий тик (у нового всегда новое поколение);
/// - `cancel` снимает тик и тоже двигает поколение, так что запоздавший
///   тик со старым поколением будет отброшен в `accept`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickScheduler {
    pending: Option<PendingTick>,
    generation: u64,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Взвести тик на `now + delay_ms`.
    pub fn arm(&mut self, now: TimestampMs, delay_ms: u64) -> PendingTick {
        self.generation += 1;
        let tick = PendingTick {
            due_at: now.saturating_add(delay_ms),
            generation: self.generation,
        };
        self.pending = Some(tick);
        tick
    }

    /// Снять ожидающий тик, если он был.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            self.generation += 1;
        }
    }

    pub fn pending(&self) -> Option<PendingTick> {
        self.pending
    }

    /// Принять сработавший тик: `true`, только если это тот самый взведённый тик.
    ///
    /// Принятый тик снимается; перевзвод: забота вызывающего.
    pub fn accept(&mut self, generation: u64) -> bool {
        match self.pending {
            Some(tick) if tick.generation == generation => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

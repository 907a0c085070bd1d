use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::domain::TimestampMs;

/// Источник монотонного времени.
///
/// Движок сам время не читает: `now` всегда приходит снаружи, поэтому тики
/// детерминированы и тестируемы.
pub trait TimeSource {
    fn now_ms(&self) -> TimestampMs;
}

/// Время tokio (`tokio::time::Instant`).
///
/// Под `tokio::time::pause()` оно двигается только вместе с виртуальными
/// таймерами, что позволяет гонять рантайм в тестах без реальных задержек.
#[derive(Clone, Debug)]
pub struct TokioTimeSource {
    origin: tokio::time::Instant,
}

impl TokioTimeSource {
    pub fn new() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
        }
    }

    /// Момент tokio, соответствующий метке `at`.
    pub fn instant_at(&self, at: TimestampMs) -> tokio::time::Instant {
        self.origin + std::time::Duration::from_millis(at)
    }
}

impl Default for TokioTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for TokioTimeSource {
    fn now_ms(&self) -> TimestampMs {
        self.origin.elapsed().as_millis() as TimestampMs
    }
}

/// Ручные часы для тестов и реплея: время двигается только через `advance`/`set`.
#[derive(Clone, Debug, Default)]
pub struct ManualTimeSource {
    now: Arc<AtomicU64>,
}

impl ManualTimeSource {
    pub fn new(start: TimestampMs) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start)),
        }
    }

    /// Сдвинуть время вперёд, вернуть новое значение.
    pub fn advance(&self, delta_ms: u64) -> TimestampMs {
        self.now.fetch_add(delta_ms, Ordering::Relaxed) + delta_ms
    }

    pub fn set(&self, at: TimestampMs) {
        self.now.store(at, Ordering::Relaxed);
    }
}

impl TimeSource for ManualTimeSource {
    fn now_ms(&self) -> TimestampMs {
        self.now.load(Ordering::Relaxed)
    }
}

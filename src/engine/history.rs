use serde::{Deserialize, Serialize};

use crate::domain::{DurationMs, GameState, PlayerSlot};
use crate::time_ctrl::TimeControlConfig;

/// Что произошло с часами. Слой отображения перерисовывается по этим событиям.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum ClockEvent {
    /// Переход между состояниями партии.
    StateChanged {
        from: GameState,
        to: GameState,
        active: Option<PlayerSlot>,
    },

    /// Игрок закончил ход, часы переключены на соперника.
    MoveCompleted {
        player: PlayerSlot,
        move_number: u32,
        phase_bonus_applied: bool,
        remaining_ms: DurationMs,
    },

    /// Применён тик идущих часов.
    Ticked {
        player: PlayerSlot,
        remaining_ms: DurationMs,
    },

    /// У игрока вышло время.
    Expired { player: PlayerSlot },

    /// Правила поменялись; `reset`: пришлось ли сбросить партию.
    RulesChanged {
        config: TimeControlConfig,
        reset: bool,
    },
}

/// Сколько событий держим, пока их никто не забрал.
pub const MAX_EVENTS: usize = 1024;

/// Буфер событий, который забирает внешний слой.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ClockHistory {
    events: Vec<ClockEvent>,
}

impl ClockHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Добавить событие.
    ///
    /// Подряд идущие тики одних часов схлопываются в последний. Если буфер
    /// никто не забирает, старые события вытесняются после `MAX_EVENTS`.
    pub fn push(&mut self, event: ClockEvent) {
        let repeats_last_tick = matches!(
            (&event, self.events.last()),
            (
                ClockEvent::Ticked { player, .. },
                Some(ClockEvent::Ticked { player: last, .. }),
            ) if player == last
        );
        if repeats_last_tick {
            self.events.pop();
        }
        if self.events.len() >= MAX_EVENTS {
            let overflow = self.events.len() + 1 - MAX_EVENTS;
            self.events.drain(..overflow);
        }
        self.events.push(event);
    }

    pub fn events(&self) -> &[ClockEvent] {
        &self.events
    }

    /// Забрать накопленные события, оставив буфер пустым.
    pub fn drain(&mut self) -> Vec<ClockEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(player: PlayerSlot, remaining_ms: DurationMs) -> ClockEvent {
        ClockEvent::Ticked {
            player,
            remaining_ms,
        }
    }

    #[test]
    fn consecutive_ticks_collapse_into_last() {
        let mut history = ClockHistory::new();
        for remaining in (0..10_000).rev() {
            history.push(tick(PlayerSlot::One, remaining));
        }
        assert_eq!(history.events(), &[tick(PlayerSlot::One, 0)]);

        history.push(ClockEvent::Expired {
            player: PlayerSlot::One,
        });
        history.push(tick(PlayerSlot::Two, 5));
        assert_eq!(history.events().len(), 3);
    }

    #[test]
    fn undrained_buffer_is_bounded() {
        let mut history = ClockHistory::new();
        for n in 0..(MAX_EVENTS as u32 + 10) {
            history.push(ClockEvent::Expired {
                player: if n % 2 == 0 { PlayerSlot::One } else { PlayerSlot::Two },
            });
            history.push(tick(PlayerSlot::One, DurationMs::from(n)));
        }
        assert_eq!(history.events().len(), MAX_EVENTS);
        assert_eq!(
            history.events().last(),
            Some(&tick(PlayerSlot::One, DurationMs::from(MAX_EVENTS as u32 + 9)))
        );
    }
}

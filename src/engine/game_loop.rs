use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{GameState, PlayerSlot, TimestampMs};
use crate::engine::errors::EngineError;
use crate::engine::history::{ClockEvent, ClockHistory};
use crate::time_ctrl::{Clock, DelayPolicy, MoveOutcome, TickReport, TimeControlConfig};

/// Ближайший взведённый тик партии.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTick {
    pub player: PlayerSlot,
    pub due_at: TimestampMs,
    pub generation: u64,
}

/// Состояние партии: двое часов по значению, активный слот и правила.
///
/// Инварианты:
/// - `active == None` тогда и только тогда, когда `state == Idle`;
/// - идут максимум одни часы, это часы `active`, и только в `Running`.
#[derive(Clone, Debug)]
pub struct GameEngine {
    config: TimeControlConfig,
    clocks: [Clock; 2],
    state: GameState,
    active: Option<PlayerSlot>,
    history: ClockHistory,
}

impl GameEngine {
    /// Новая партия в `Idle` по провалидированному конфигу.
    pub fn new(config: TimeControlConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            clocks: [Clock::new(&config), Clock::new(&config)],
            config,
            state: GameState::Idle,
            active: None,
            history: ClockHistory::new(),
        })
    }

    /// Собрать партию из восстановленных частей (см. `GameSnapshot::into_engine`).
    pub(crate) fn from_parts(
        config: TimeControlConfig,
        clocks: [Clock; 2],
        state: GameState,
        active: Option<PlayerSlot>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        if state.has_active_player() != active.is_some() {
            return Err(EngineError::InvalidSnapshot(format!(
                "state {} with active player {:?}",
                state, active
            )));
        }
        if state == GameState::Running || clocks.iter().any(Clock::is_running) {
            return Err(EngineError::InvalidSnapshot(
                "restored game must be at rest".into(),
            ));
        }
        if !config.allow_negative_time && clocks.iter().any(|c| c.remaining_ms() < 0) {
            return Err(EngineError::InvalidSnapshot(
                "negative remaining time without negative time allowance".into(),
            ));
        }
        Ok(Self {
            config,
            clocks,
            state,
            active,
            history: ClockHistory::new(),
        })
    }

    pub fn config(&self) -> &TimeControlConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn active_player(&self) -> Option<PlayerSlot> {
        self.active
    }

    pub fn clock(&self, player: PlayerSlot) -> &Clock {
        &self.clocks[player.index()]
    }

    pub fn history(&self) -> &ClockHistory {
        &self.history
    }

    /// Забрать накопленные события для отображения.
    pub fn drain_events(&mut self) -> Vec<ClockEvent> {
        self.history.drain()
    }

    /// Ближайший тик, который должен прийти от планировщика.
    pub fn next_wakeup(&self) -> Option<ScheduledTick> {
        if self.state != GameState::Running {
            return None;
        }
        let player = self.active?;
        self.clock(player).pending_tick().map(|t| ScheduledTick {
            player,
            due_at: t.due_at,
            generation: t.generation,
        })
    }

    /// Игрок нажал свою кнопку: "я сходил".
    pub fn press_move(&mut self, player: PlayerSlot, now: TimestampMs) -> Result<(), EngineError> {
        match self.state {
            GameState::Idle => {
                // Первое нажатие запускает часы соперника.
                let starting = player.opponent();
                self.clocks[starting.index()].start_after_delay(now, 0)?;
                self.active = Some(starting);
                self.transition_to(GameState::Running);
            }
            GameState::Running => {
                if self.active != Some(player) {
                    debug!(%player, "move pressed by waiting player, ignored");
                    return Ok(());
                }
                self.hand_over(player, now)?;
            }
            // Кнопка игрока на паузе работает как "продолжить".
            GameState::Paused => self.resume(now)?,
            GameState::Done => {}
        }
        self.debug_check_invariants();
        Ok(())
    }

    /// Пауза/продолжение. В `Idle` и `Done` ничего не делает.
    pub fn toggle_pause(&mut self, now: TimestampMs) -> Result<(), EngineError> {
        match self.state {
            GameState::Running => self.pause(now),
            GameState::Paused => self.resume(now),
            GameState::Idle | GameState::Done => Ok(()),
        }
    }

    /// Остановить часы активного игрока.
    pub fn pause(&mut self, now: TimestampMs) -> Result<(), EngineError> {
        self.expect_state(GameState::Running)?;
        let player = self.require_active(GameState::Paused)?;

        let report = self.clocks[player.index()].pause(now)?;
        if report.expired {
            self.expire(player)?;
        } else {
            self.transition_to(GameState::Paused);
        }
        self.debug_check_invariants();
        Ok(())
    }

    /// Продолжить после паузы: часы активного игрока идут без задержки.
    pub fn resume(&mut self, now: TimestampMs) -> Result<(), EngineError> {
        self.expect_state(GameState::Paused)?;
        let player = self.require_active(GameState::Running)?;

        self.clocks[player.index()].start_after_delay(now, 0)?;
        self.transition_to(GameState::Running);
        self.debug_check_invariants();
        Ok(())
    }

    /// Сбросить партию в `Idle` по текущим правилам.
    pub fn reset(&mut self) {
        for clock in self.clocks.iter_mut() {
            clock.reset(&self.config);
        }
        self.active = None;
        self.transition_to(GameState::Idle);
        self.debug_check_invariants();
    }

    /// Новые правила: всегда сбрасывает партию.
    pub fn reconfigure(&mut self, config: TimeControlConfig) -> Result<(), EngineError> {
        config.validate()?;
        info!(?config, "time control reconfigured");
        self.config = config;
        self.history.push(ClockEvent::RulesChanged {
            config,
            reset: true,
        });
        self.reset();
        Ok(())
    }

    /// Пользователь поменял настройки посреди партии.
    ///
    /// Если поменялись только добавка, тип задержки или право на минус,
    /// правила подменяются на лету, часы не трогаем. Смена стартового
    /// времени или турнирной фазы сбрасывает партию. Запрет минуса, когда
    /// чьи-то часы уже ушли ниже нуля, тоже сбрасывает партию.
    ///
    /// Возвращает `true`, если партия была сброшена.
    pub fn apply_preferences(&mut self, config: TimeControlConfig) -> Result<bool, EngineError> {
        config.validate()?;

        let disallows_negative = self.config.allow_negative_time && !config.allow_negative_time;
        let negative_clock = self.clocks.iter().any(|c| c.remaining_ms() < 0);
        let needs_reset =
            self.config.requires_reset(&config) || (disallows_negative && negative_clock);

        if needs_reset {
            self.reconfigure(config)?;
            return Ok(true);
        }

        debug!(?config, "time control rules swapped in place");
        self.config = config;
        for clock in self.clocks.iter_mut() {
            clock.set_allow_negative_time(config.allow_negative_time);
        }
        self.history.push(ClockEvent::RulesChanged {
            config,
            reset: false,
        });
        Ok(false)
    }

    /// Сработал тик планировщика для часов `player`.
    ///
    /// Устаревший тик (часы уже на паузе/сброшены/перевзведены) отбрасывается: `Ok(None)`.
    pub fn on_tick(
        &mut self,
        player: PlayerSlot,
        generation: u64,
        now: TimestampMs,
    ) -> Result<Option<TickReport>, EngineError> {
        let report = match self.clocks[player.index()].fire(now, generation)? {
            Some(report) => report,
            None => {
                debug!(%player, generation, "stale tick discarded");
                return Ok(None);
            }
        };

        self.history.push(ClockEvent::Ticked {
            player,
            remaining_ms: report.remaining_ms,
        });

        if report.expired {
            self.expire(player)?;
        }
        self.debug_check_invariants();
        Ok(Some(report))
    }

    /// Инвариант "идут максимум одни часы, и это часы активного игрока в `Running`".
    pub fn check_invariants(&self) -> bool {
        let running: Vec<PlayerSlot> = PlayerSlot::BOTH
            .into_iter()
            .filter(|p| self.clock(*p).is_running())
            .collect();

        let running_ok = match running.as_slice() {
            [] => self.state != GameState::Running,
            [p] => self.state == GameState::Running && self.active == Some(*p),
            _ => false,
        };
        let active_ok = self.state.has_active_player() == self.active.is_some();
        let negative_ok = self.config.allow_negative_time
            || self.clocks.iter().all(|c| c.remaining_ms() >= 0);

        running_ok && active_ok && negative_ok
    }

    fn hand_over(&mut self, finishing: PlayerSlot, now: TimestampMs) -> Result<(), EngineError> {
        let [one, two] = &mut self.clocks;
        let (finishing_clock, starting_clock) = match finishing {
            PlayerSlot::One => (one, two),
            PlayerSlot::Two => (two, one),
        };

        match DelayPolicy::on_move(&self.config, finishing_clock, starting_clock, now)? {
            MoveOutcome::Handed {
                move_number,
                phase_bonus_applied,
                charged_ms,
                start_delay_ms,
                ..
            } => {
                let remaining_ms = finishing_clock.remaining_ms();
                debug!(
                    player = %finishing,
                    move_number,
                    charged_ms,
                    start_delay_ms,
                    remaining_ms,
                    "move completed"
                );
                if phase_bonus_applied {
                    info!(player = %finishing, move_number, "tournament phase 2 bonus applied");
                }
                self.history.push(ClockEvent::MoveCompleted {
                    player: finishing,
                    move_number,
                    phase_bonus_applied,
                    remaining_ms,
                });
                self.active = Some(finishing.opponent());
                Ok(())
            }
            MoveOutcome::Flagged { charged_ms } => {
                debug!(player = %finishing, charged_ms, "flag fell before the move was pressed");
                self.expire(finishing)
            }
        }
    }

    fn expire(&mut self, player: PlayerSlot) -> Result<(), EngineError> {
        if self.active != Some(player) {
            debug_assert!(false, "expiry for {player} while active is {:?}", self.active);
            return Err(EngineError::NoActivePlayer(GameState::Done));
        }
        info!(%player, "time expired");
        self.history.push(ClockEvent::Expired { player });
        self.transition_to(GameState::Done);
        Ok(())
    }

    fn transition_to(&mut self, to: GameState) {
        let from = self.state;
        self.state = to;
        debug!(%from, %to, active = ?self.active, "transition");
        self.history.push(ClockEvent::StateChanged {
            from,
            to,
            active: self.active,
        });
    }

    fn expect_state(&self, expected: GameState) -> Result<(), EngineError> {
        if self.state != expected {
            return Err(EngineError::InvalidState {
                expected,
                found: self.state,
            });
        }
        Ok(())
    }

    fn require_active(&self, target: GameState) -> Result<PlayerSlot, EngineError> {
        self.active.ok_or(EngineError::NoActivePlayer(target))
    }

    fn debug_check_invariants(&self) {
        debug_assert!(self.check_invariants(), "clock invariants broken: {:?}", self);
    }
}

// src/runtime/driver.rs

use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::{execute_command, ApiError, Command, GameViewDto};
use crate::engine::{ClockEvent, GameEngine, ScheduledTick};
use crate::infra::mapping::map_engine_to_view;
use crate::infra::time_source::{TimeSource, TokioTimeSource};
use crate::state::GameSnapshot;

const REQUEST_QUEUE: usize = 32;
const EVENT_QUEUE: usize = 256;

/// Запрос к задаче рантайма.
#[derive(Debug)]
pub enum RuntimeRequest {
    Command {
        command: Command,
        reply: oneshot::Sender<Result<GameViewDto, ApiError>>,
    },
    /// Поставить на паузу (если идёт) и отдать снапшот.
    Suspend {
        reply: oneshot::Sender<Result<GameSnapshot, ApiError>>,
    },
    Shutdown,
}

/// Ручка к запущенной партии.
#[derive(Clone, Debug)]
pub struct ClockRuntime {
    requests: mpsc::Sender<RuntimeRequest>,
    view: watch::Receiver<GameViewDto>,
    events: broadcast::Sender<ClockEvent>,
}

impl ClockRuntime {
    /// Запустить задачу рантайма для партии.
    ///
    /// Возвращает ручку и `JoinHandle`, который отдаёт партию обратно после `shutdown`.
    pub fn spawn(engine: GameEngine) -> (Self, JoinHandle<GameEngine>) {
        let (req_tx, req_rx) = mpsc::channel(REQUEST_QUEUE);
        let (view_tx, view_rx) = watch::channel(map_engine_to_view(&engine));
        let (events_tx, _) = broadcast::channel(EVENT_QUEUE);

        let task = tokio::spawn(run_loop(
            engine,
            TokioTimeSource::new(),
            req_rx,
            view_tx,
            events_tx.clone(),
        ));

        (
            Self {
                requests: req_tx,
                view: view_rx,
                events: events_tx,
            },
            task,
        )
    }

    /// Отправить команду и дождаться нового вида партии.
    pub async fn send(&self, command: Command) -> Result<GameViewDto, ApiError> {
        let (reply, rx) = oneshot::channel();
        self.requests
            .send(RuntimeRequest::Command { command, reply })
            .await
            .map_err(|_| ApiError::Unavailable)?;
        rx.await.map_err(|_| ApiError::Unavailable)?
    }

    /// Снапшот с предварительной паузой.
    pub async fn suspend(&self) -> Result<GameSnapshot, ApiError> {
        let (reply, rx) = oneshot::channel();
        self.requests
            .send(RuntimeRequest::Suspend { reply })
            .await
            .map_err(|_| ApiError::Unavailable)?;
        rx.await.map_err(|_| ApiError::Unavailable)?
    }

    /// Остановить задачу рантайма.
    pub async fn shutdown(&self) {
        let _ = self.requests.send(RuntimeRequest::Shutdown).await;
    }

    /// Последний опубликованный вид партии.
    pub fn view(&self) -> GameViewDto {
        self.view.borrow().clone()
    }

    /// Подписка на обновления вида партии (после каждой команды и каждого тика).
    pub fn watch(&self) -> watch::Receiver<GameViewDto> {
        self.view.clone()
    }

    /// Подписка на поток событий часов.
    pub fn subscribe_events(&self) -> broadcast::Receiver<ClockEvent> {
        self.events.subscribe()
    }
}

async fn run_loop(
    mut engine: GameEngine,
    time: TokioTimeSource,
    mut requests: mpsc::Receiver<RuntimeRequest>,
    view: watch::Sender<GameViewDto>,
    events: broadcast::Sender<ClockEvent>,
) -> GameEngine {
    loop {
        let wakeup = engine.next_wakeup();

        tokio::select! {
            request = requests.recv() => {
                match request {
                    Some(RuntimeRequest::Command { command, reply }) => {
                        let now = time.now_ms();
                        let result = execute_command(&mut engine, command, now);
                        if let Err(err) = &result {
                            warn!(?err, "command rejected");
                        }
                        publish(&mut engine, &view, &events);
                        let _ = reply.send(result);
                    }
                    Some(RuntimeRequest::Suspend { reply }) => {
                        let result = engine.suspend(time.now_ms()).map_err(ApiError::from);
                        publish(&mut engine, &view, &events);
                        let _ = reply.send(result);
                    }
                    Some(RuntimeRequest::Shutdown) | None => break,
                }
            }
            _ = sleep_until_tick(&time, wakeup) => {
                if let Some(tick) = wakeup {
                    match engine.on_tick(tick.player, tick.generation, time.now_ms()) {
                        Ok(Some(_)) => publish(&mut engine, &view, &events),
                        Ok(None) => {}
                        Err(err) => warn!(?err, player = %tick.player, "tick rejected"),
                    }
                }
            }
        }
    }

    debug!("clock runtime stopped");
    engine
}

async fn sleep_until_tick(time: &TokioTimeSource, tick: Option<ScheduledTick>) {
    match tick {
        Some(tick) => tokio::time::sleep_until(time.instant_at(tick.due_at)).await,
        None => std::future::pending::<()>().await,
    }
}

fn publish(
    engine: &mut GameEngine,
    view: &watch::Sender<GameViewDto>,
    events: &broadcast::Sender<ClockEvent>,
) {
    for event in engine.drain_events() {
        // Нет подписчиков: не ошибка.
        let _ = events.send(event);
    }
    let _ = view.send(map_engine_to_view(engine));
}

use serde::{Deserialize, Serialize};

use crate::engine::GameEngine;
use crate::infra::mapping::map_engine_to_view;
use crate::state::GameSnapshot;
use crate::time_ctrl::TimeControlConfig;

use super::dto::GameViewDto;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Текущий вид партии.
    GetGameView,

    /// Действующие правила.
    GetConfig,

    /// Снапшот для сохранения (без паузы: остатки на момент последнего тика).
    GetSnapshot,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum QueryResponse {
    GameView(GameViewDto),
    Config(TimeControlConfig),
    Snapshot(GameSnapshot),
}

pub fn execute_query(engine: &GameEngine, query: Query) -> QueryResponse {
    match query {
        Query::GetGameView => QueryResponse::GameView(map_engine_to_view(engine)),
        Query::GetConfig => QueryResponse::Config(*engine.config()),
        Query::GetSnapshot => QueryResponse::Snapshot(GameSnapshot::from_engine(engine)),
    }
}

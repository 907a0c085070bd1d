use serde::{Deserialize, Serialize};

use crate::engine::EngineError;

/// Ошибки внешнего API (то, что отдаём фронту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битые настройки).
    BadRequest(String),

    /// Команда не может быть выполнена в текущем состоянии.
    InvalidCommand(String),

    /// Рантайм часов уже остановлен.
    Unavailable,
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidConfig(_) | EngineError::InvalidSnapshot(_) => {
                ApiError::BadRequest(err.to_string())
            }
            _ => ApiError::InvalidCommand(err.to_string()),
        }
    }
}

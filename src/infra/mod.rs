//! Инфраструктурный слой вокруг движка часов:
//! - источники монотонного времени;
//! - абстракция хранения снапшотов;
//! - маппинг движка в DTO для отображения.

pub mod mapping;
pub mod persistence;
pub mod time_source;

pub use mapping::*;
pub use persistence::*;
pub use time_source::*;

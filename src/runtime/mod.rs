//! Асинхронный рантайм часов.
//!
//! Одна задача tokio владеет `GameEngine`: команды пользователя и тики
//! планировщика обрабатываются в ней строго по очереди, поэтому двух
//! одновременных мутаций партии не бывает.

pub mod driver;

pub use driver::{ClockRuntime, RuntimeRequest};

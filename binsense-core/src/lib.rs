//! # binsense-core
//!
//! Traits compartilhados pelos drivers de hardware da lixeira inteligente.
//!
//! - [`Component`]: identidade e prontidão de qualquer componente
//! - [`Sensor`]: leitura de amostras com erro comum [`SensorError`]

pub mod traits;

pub use traits::{Component, Sensor, SensorError, Timestamp, now_ns};

#[cfg(test)]
mod tests;

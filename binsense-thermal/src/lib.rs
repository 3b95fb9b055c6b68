//! # 🌡️ binsense-thermal — Câmera Térmica
//!
//! Acesso a registradores do MLX90640 (32×24 pixels) sobre qualquer
//! barramento que implemente `embedded_hal::i2c::I2c`.
//!
//! Os frames são devolvidos brutos; a conversão para temperatura por pixel
//! fica fora deste crate.
//!
//! ## Exemplo
//!
//! ```ignore
//! use binsense_thermal::Mlx90640;
//! use binsense_core::Sensor;
//!
//! let mut camera = Mlx90640::new(bus);
//! camera.init()?;
//! let frame = camera.read()?;
//! ```

pub mod error;
pub mod mlx90640;
pub mod types;

pub use error::{ThermalError, ThermalResult};
pub use mlx90640::Mlx90640;
pub use types::{
    DEFAULT_ADDRESS, DEFAULT_FREQUENCY_HZ, EEPROM_WORDS, FRAME_WORDS, RawFrame, RefreshRate,
    ThermalConfig,
};

#[cfg(test)]
mod tests;

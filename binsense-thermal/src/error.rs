//! Erros específicos do módulo térmico

use binsense_core::SensorError;
use embedded_hal::i2c::ErrorKind;
use thiserror::Error;

pub type ThermalResult<T> = Result<T, ThermalError>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ThermalError {
    #[error("I2C bus error: {0:?}")]
    I2c(ErrorKind),

    #[error("Camera not initialized")]
    NotInitialized,

    #[error("No new frame available")]
    NoData,

    #[error("Invalid I2C address 0x{0:02x}")]
    InvalidAddress(u8),

    #[error("Invalid bus frequency {0} Hz")]
    InvalidFrequency(u32),
}

impl ThermalError {
    /// Converte erro do barramento preservando só o tipo
    pub fn bus<E: embedded_hal::i2c::Error>(err: E) -> Self {
        ThermalError::I2c(err.kind())
    }
}

// Conversão para SensorError do core
impl From<ThermalError> for SensorError {
    fn from(err: ThermalError) -> Self {
        match err {
            ThermalError::NotInitialized => SensorError::NotInitialized,
            ThermalError::NoData => SensorError::NoData,
            ThermalError::I2c(_) => SensorError::Hardware(err.to_string()),
            ThermalError::InvalidAddress(_) | ThermalError::InvalidFrequency(_) => {
                SensorError::InvalidConfig(err.to_string())
            }
        }
    }
}

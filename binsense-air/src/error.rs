//! Erros específicos do módulo de qualidade do ar

use binsense_core::SensorError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type StateResult<T> = Result<T, StateError>;
pub type ProcessResult<T> = Result<T, ProcessError>;
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Falhas de I/O do armazenamento de estado.
///
/// Ausência de arquivo e cabeçalho corrompido não são erros: aparecem como
/// [`LoadOutcome`](crate::types::LoadOutcome).
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to open state file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read state file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write state file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to remove state file {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Falhas fatais de inicialização da biblioteca de fusão
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProcessError {
    #[error("Sensor initialization failed with status {0}")]
    SensorInit(i16),

    #[error("Fusion library initialization failed with status {0}")]
    FusionInit(i16),
}

impl ProcessError {
    /// Código de status inteiro, exatamente como reportado pela biblioteca
    pub fn status_code(&self) -> i32 {
        match self {
            ProcessError::SensorInit(code) | ProcessError::FusionInit(code) => i32::from(*code),
        }
    }
}

/// Erros de carregamento e validação de configuração
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// Conversão para SensorError do core
impl From<StateError> for SensorError {
    fn from(err: StateError) -> Self {
        SensorError::Hardware(err.to_string())
    }
}

impl From<ProcessError> for SensorError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::SensorInit(_) => SensorError::Hardware(err.to_string()),
            ProcessError::FusionInit(_) => SensorError::NotInitialized,
        }
    }
}

impl From<ConfigError> for SensorError {
    fn from(err: ConfigError) -> Self {
        SensorError::InvalidConfig(err.to_string())
    }
}

//! Configuração do pipeline de qualidade do ar (`binsense.toml`)
//!
//! ```toml
//! state_path = "savedState.dat"
//! sample_rate = "low_power"
//! temperature_offset = 0.0
//! save_interval = 10000
//! state_capacity = 139
//! ```

use crate::error::{ConfigError, ConfigResult};
use crate::fusion::{DEFAULT_SAVE_INTERVAL, DEFAULT_STATE_CAPACITY};
use crate::state_store::DEFAULT_STATE_FILE;
use crate::types::SampleRate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Nome padrão do arquivo de configuração
pub const CONFIG_FILE: &str = "binsense.toml";

/// Configuração do processador de qualidade do ar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirConfig {
    /// Arquivo de estado persistido
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,

    /// Modo de amostragem passado à biblioteca
    #[serde(default)]
    pub sample_rate: SampleRate,

    /// Offset de temperatura (°C) subtraído pela biblioteca
    #[serde(default)]
    pub temperature_offset: f32,

    /// Cadência de gravação do backend de referência (amostras)
    #[serde(default = "default_save_interval")]
    pub save_interval: u64,

    /// Capacidade máxima do blob de estado (bytes)
    #[serde(default = "default_state_capacity")]
    pub state_capacity: usize,
}

impl Default for AirConfig {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
            sample_rate: SampleRate::default(),
            temperature_offset: 0.0,
            save_interval: default_save_interval(),
            state_capacity: default_state_capacity(),
        }
    }
}

fn default_state_path() -> PathBuf {
    PathBuf::from(DEFAULT_STATE_FILE)
}

fn default_save_interval() -> u64 {
    DEFAULT_SAVE_INTERVAL
}

fn default_state_capacity() -> usize {
    DEFAULT_STATE_CAPACITY
}

impl AirConfig {
    /// Parse a partir de TOML
    pub fn from_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Carrega de arquivo
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_str(&content)
    }

    /// Serializa para TOML
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !self.temperature_offset.is_finite() {
            return Err(ConfigError::Invalid(
                "temperature_offset must be a finite number".into(),
            ));
        }

        if self.save_interval == 0 {
            return Err(ConfigError::Invalid("save_interval must be > 0".into()));
        }

        if self.state_capacity == 0 {
            return Err(ConfigError::Invalid("state_capacity must be > 0".into()));
        }

        if self.state_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("state_path must not be empty".into()));
        }

        Ok(())
    }
}

//! # 🎯 Traits — Abstrações Fundamentais do Binsense
//!
//! Traits base implementados pelos componentes de hardware da lixeira:
//!
//! | Grupo | Componente | Traits |
//! |:------|:-----------|:-------|
//! | Percepção | Câmera térmica, sensor de gás | [`Sensor`] |
//! | Integração | Wrapper da biblioteca de fusão | [`Component`] |
//!
//! > *"Trait no core, implementação no módulo."*
//!
//! As implementações concretas vivem nos crates específicos
//! (`binsense-air`, `binsense-thermal`).

use std::fmt::Debug;

// ═══════════════════════════════════════════════════════════════════════════════
// TIPOS COMUNS
// ═══════════════════════════════════════════════════════════════════════════════

/// Timestamp em nanossegundos desde epoch
pub type Timestamp = i64;

/// Timestamp atual em nanossegundos
pub fn now_ns() -> Timestamp {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as Timestamp)
        .unwrap_or(0)
}

// ═══════════════════════════════════════════════════════════════════════════════
// TRAIT BASE — Todo componente
// ═══════════════════════════════════════════════════════════════════════════════

/// Trait base para qualquer componente do binsense.
///
/// # Exemplo
///
/// ```ignore
/// use binsense_core::Component;
///
/// #[derive(Debug)]
/// struct MyScale;
///
/// impl Component for MyScale {
///     fn name(&self) -> &str { "my-scale" }
/// }
/// ```
pub trait Component: Debug {
    /// Nome único do componente (para logs e debug)
    fn name(&self) -> &str;

    /// Versão do componente
    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    /// Componente está pronto para uso?
    fn is_ready(&self) -> bool {
        true
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PERCEPÇÃO — Sensores
// ═══════════════════════════════════════════════════════════════════════════════

/// Erro de sensor
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SensorError {
    #[error("Sensor not initialized")]
    NotInitialized,
    #[error("No data available yet")]
    NoData,
    #[error("Sensor read failed: {0}")]
    ReadFailed(String),
    #[error("Configuration invalid: {0}")]
    InvalidConfig(String),
    #[error("Hardware error: {0}")]
    Hardware(String),
    #[error("Timeout after {0}ms")]
    Timeout(u64),
}

/// Trait para sensores físicos ligados ao host.
///
/// # Exemplo
///
/// ```ignore
/// use binsense_core::{Component, Sensor, SensorError};
///
/// #[derive(Debug)]
/// struct LidSwitch { open: bool }
///
/// impl Component for LidSwitch {
///     fn name(&self) -> &str { "lid-switch" }
/// }
///
/// impl Sensor for LidSwitch {
///     type Reading = bool;
///     type Config = ();
///
///     fn read(&mut self) -> Result<bool, SensorError> {
///         Ok(self.open)
///     }
/// }
/// ```
pub trait Sensor: Component {
    /// Tipo dos dados lidos do sensor
    type Reading;

    /// Tipo de configuração do sensor
    type Config;

    /// Configura o sensor
    fn configure(&mut self, _config: Self::Config) -> Result<(), SensorError> {
        Ok(())
    }

    /// Lê uma amostra do sensor
    fn read(&mut self) -> Result<Self::Reading, SensorError>;

    /// Taxa de amostragem em Hz (0 = sob demanda)
    fn sample_rate(&self) -> f32 {
        0.0
    }

    /// Reinicia o sensor para um estado conhecido
    fn reset(&mut self) -> Result<(), SensorError> {
        Ok(())
    }
}

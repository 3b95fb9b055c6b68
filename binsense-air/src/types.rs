//! Tipos de dados do módulo de qualidade do ar

use binsense_core::Timestamp;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// ESTADO PERSISTIDO
// ═══════════════════════════════════════════════════════════════════════════════

/// Blob opaco de estado da biblioteca de fusão
///
/// O conteúdo só tem significado para a biblioteca; o armazenamento apenas
/// garante que o comprimento gravado é o comprimento lido.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersistedState {
    bytes: Vec<u8>,
}

impl PersistedState {
    /// Cria estado a partir dos bytes brutos
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Estado vazio (nenhum estado anterior)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Número de bytes do blob
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Copia o blob para o buffer do chamador, nunca além de `buffer.len()`.
    ///
    /// Retorna o número de bytes copiados.
    pub fn copy_into(&self, buffer: &mut [u8]) -> usize {
        let count = self.bytes.len().min(buffer.len());
        buffer[..count].copy_from_slice(&self.bytes[..count]);
        count
    }
}

/// Motivo pelo qual um cabeçalho de comprimento foi rejeitado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CorruptState {
    #[error("empty length header")]
    EmptyHeader,

    #[error("non-digit byte 0x{0:02x} in length header")]
    NonDigit(u8),

    #[error("length header not terminated by a newline")]
    MissingNewline,

    #[error("length header longer than {0} digits")]
    HeaderTooLong(usize),

    #[error("declared length does not fit in memory")]
    Overflow,
}

/// Resultado explícito de uma leitura do armazenamento
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nenhum estado gravado (primeira execução)
    Missing,
    /// Blob completo, dentro da capacidade
    Restored(PersistedState),
    /// Menos bytes copiados do que declarados no cabeçalho
    ///
    /// `state.len() == min(declared, capacity, disponíveis)`
    Truncated {
        state: PersistedState,
        declared: usize,
    },
    /// Cabeçalho ilegível
    Corrupt(CorruptState),
}

impl LoadOutcome {
    /// Estado recuperado, se houver algum byte utilizável
    pub fn state(&self) -> Option<&PersistedState> {
        match self {
            LoadOutcome::Restored(state) | LoadOutcome::Truncated { state, .. } => Some(state),
            LoadOutcome::Missing | LoadOutcome::Corrupt(_) => None,
        }
    }

    /// Número de bytes efetivamente copiados
    pub fn copied_len(&self) -> usize {
        self.state().map(PersistedState::len).unwrap_or(0)
    }

    /// Comprimento declarado no cabeçalho, quando legível
    pub fn declared_len(&self) -> Option<usize> {
        match self {
            LoadOutcome::Restored(state) => Some(state.len()),
            LoadOutcome::Truncated { declared, .. } => Some(*declared),
            LoadOutcome::Missing | LoadOutcome::Corrupt(_) => None,
        }
    }

    /// Descrição curta para logs e CLI
    pub fn label(&self) -> &'static str {
        match self {
            LoadOutcome::Missing => "missing",
            LoadOutcome::Restored(_) => "restored",
            LoadOutcome::Truncated { .. } => "truncated",
            LoadOutcome::Corrupt(_) => "corrupt",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// AMOSTRAS E SAÍDAS DA FUSÃO
// ═══════════════════════════════════════════════════════════════════════════════

/// Modo de taxa de amostragem pedido à biblioteca de fusão
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleRate {
    /// Uma amostra a cada 300 s
    UltraLowPower,
    /// Uma amostra a cada 3 s
    #[default]
    LowPower,
    /// Uma amostra por segundo
    Continuous,
}

impl SampleRate {
    /// Período entre amostras
    pub fn interval(&self) -> Duration {
        match self {
            SampleRate::UltraLowPower => Duration::from_secs(300),
            SampleRate::LowPower => Duration::from_secs(3),
            SampleRate::Continuous => Duration::from_secs(1),
        }
    }

    /// Frequência em Hz
    pub fn hz(&self) -> f32 {
        1.0 / self.interval().as_secs_f32()
    }
}

/// Leitura bruta do BME68x entregue à fusão
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmeSample {
    /// Instante da leitura (ns)
    pub timestamp: Timestamp,
    /// Temperatura (°C)
    pub temperature: f32,
    /// Pressão (Pa)
    pub pressure: f32,
    /// Umidade relativa (%)
    pub humidity: f32,
    /// Resistência do sensor de gás (Ω)
    pub gas_resistance: f32,
}

/// Número de valores no vetor de saída
pub const OUTPUT_LEN: usize = 7;

/// Vetor de saída da biblioteca de fusão
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FusionOutput {
    pub values: [f32; OUTPUT_LEN],
}

impl FusionOutput {
    pub const IAQ: usize = 0;
    pub const IAQ_ACCURACY: usize = 1;
    pub const STATIC_IAQ: usize = 2;
    pub const CO2_EQUIVALENT: usize = 3;
    pub const BREATH_VOC_EQUIVALENT: usize = 4;
    pub const TEMPERATURE: usize = 5;
    pub const HUMIDITY: usize = 6;

    pub fn iaq(&self) -> f32 {
        self.values[Self::IAQ]
    }

    pub fn iaq_accuracy(&self) -> f32 {
        self.values[Self::IAQ_ACCURACY]
    }

    pub fn static_iaq(&self) -> f32 {
        self.values[Self::STATIC_IAQ]
    }

    pub fn co2_equivalent(&self) -> f32 {
        self.values[Self::CO2_EQUIVALENT]
    }

    pub fn breath_voc_equivalent(&self) -> f32 {
        self.values[Self::BREATH_VOC_EQUIVALENT]
    }

    /// Temperatura compensada (°C)
    pub fn temperature(&self) -> f32 {
        self.values[Self::TEMPERATURE]
    }

    /// Umidade compensada (%)
    pub fn humidity(&self) -> f32 {
        self.values[Self::HUMIDITY]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

/// Status devolvido pela inicialização da biblioteca de fusão
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InitStatus {
    /// Status do sensor físico (0 = ok)
    pub sensor_status: i16,
    /// Status da biblioteca de fusão (0 = ok)
    pub fusion_status: i16,
}

impl InitStatus {
    pub const OK: InitStatus = InitStatus {
        sensor_status: 0,
        fusion_status: 0,
    };

    pub fn is_ok(&self) -> bool {
        self.sensor_status == 0 && self.fusion_status == 0
    }
}

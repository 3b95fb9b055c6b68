//! Contrato com a biblioteca de fusão sensorial
//!
//! A biblioteca é externa e opaca. Ela recebe o estado salvo uma única vez,
//! na inicialização, e decide sozinha quando pedir uma nova gravação durante
//! o laço de processamento.

use crate::types::{BmeSample, FusionOutput, InitStatus, SampleRate};
use std::fmt::Debug;
use tracing::debug;

/// Tamanho máximo padrão do blob de estado
pub const DEFAULT_STATE_CAPACITY: usize = 139;

/// Cadência padrão de gravação (amostras)
pub const DEFAULT_SAVE_INTERVAL: u64 = 10_000;

/// Biblioteca de fusão sensorial consumida pelo processador
pub trait FusionLibrary: Debug {
    /// Inicializa a biblioteca.
    ///
    /// `state_load` recebe um buffer com a capacidade da biblioteca e retorna
    /// quantos bytes de estado foram copiados (0 = sem estado anterior).
    fn init(
        &mut self,
        sample_rate: SampleRate,
        temperature_offset: f32,
        state_load: &mut dyn FnMut(&mut [u8]) -> usize,
    ) -> InitStatus;

    /// Processa uma amostra, preenchendo `output`.
    ///
    /// `state_save` é chamado na cadência escolhida pela biblioteca.
    fn run(
        &mut self,
        sample: &BmeSample,
        output: &mut FusionOutput,
        state_save: &mut dyn FnMut(&[u8]),
    );

    /// Capacidade do buffer de estado usado em `init`
    fn state_capacity(&self) -> usize {
        DEFAULT_STATE_CAPACITY
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// BACKEND DE REFERÊNCIA
// ═══════════════════════════════════════════════════════════════════════════════

/// Status devolvido quando o blob restaurado não tem o tamanho esperado
pub const ECHO_E_STATE_LENGTH: i16 = -41;

/// Tamanho do blob de estado do [`EchoFusion`]
pub const ECHO_STATE_LEN: usize = 8;

/// Backend de referência sem algoritmo de qualidade do ar.
///
/// Copia temperatura compensada pelo offset e umidade para a saída, deixa os
/// campos de IAQ zerados (precisão 0) e usa o contador de amostras como blob
/// de estado. Serve para testes e para exercitar o pipeline sem a biblioteca
/// proprietária.
#[derive(Debug, Clone)]
pub struct EchoFusion {
    save_interval: u64,
    sample_count: u64,
    temperature_offset: f32,
    sample_rate: Option<SampleRate>,
}

impl EchoFusion {
    pub fn new() -> Self {
        Self::with_save_interval(DEFAULT_SAVE_INTERVAL)
    }

    /// Cria backend que pede gravação a cada `save_interval` amostras (0 = nunca)
    pub fn with_save_interval(save_interval: u64) -> Self {
        Self {
            save_interval,
            sample_count: 0,
            temperature_offset: 0.0,
            sample_rate: None,
        }
    }

    /// Amostras processadas, incluindo as restauradas do estado
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Modo recebido na inicialização
    pub fn sample_rate(&self) -> Option<SampleRate> {
        self.sample_rate
    }

    /// Blob de estado atual
    pub fn state_blob(&self) -> [u8; ECHO_STATE_LEN] {
        self.sample_count.to_le_bytes()
    }
}

impl Default for EchoFusion {
    fn default() -> Self {
        Self::new()
    }
}

impl FusionLibrary for EchoFusion {
    fn init(
        &mut self,
        sample_rate: SampleRate,
        temperature_offset: f32,
        state_load: &mut dyn FnMut(&mut [u8]) -> usize,
    ) -> InitStatus {
        self.sample_rate = Some(sample_rate);
        self.temperature_offset = temperature_offset;

        // Buffer maior que o blob para detectar estado de outra biblioteca
        let mut buffer = vec![0u8; DEFAULT_STATE_CAPACITY];
        let count = state_load(&mut buffer);

        match count {
            0 => {
                self.sample_count = 0;
                InitStatus::OK
            }
            ECHO_STATE_LEN => {
                let mut blob = [0u8; ECHO_STATE_LEN];
                blob.copy_from_slice(&buffer[..ECHO_STATE_LEN]);
                self.sample_count = u64::from_le_bytes(blob);
                debug!(samples = self.sample_count, "echo fusion state restored");
                InitStatus::OK
            }
            _ => InitStatus {
                sensor_status: 0,
                fusion_status: ECHO_E_STATE_LENGTH,
            },
        }
    }

    fn run(
        &mut self,
        sample: &BmeSample,
        output: &mut FusionOutput,
        state_save: &mut dyn FnMut(&[u8]),
    ) {
        self.sample_count += 1;

        *output = FusionOutput::default();
        output.values[FusionOutput::TEMPERATURE] = sample.temperature - self.temperature_offset;
        output.values[FusionOutput::HUMIDITY] = sample.humidity;

        if self.save_interval > 0 && self.sample_count % self.save_interval == 0 {
            state_save(&self.state_blob());
        }
    }

    fn state_capacity(&self) -> usize {
        ECHO_STATE_LEN
    }
}

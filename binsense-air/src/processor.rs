//! Ponto de entrada do processamento de qualidade do ar
//!
//! Liga a biblioteca de fusão ao armazenamento de estado:
//!
//! 1. Na primeira amostra, carrega o estado salvo e inicializa a biblioteca
//! 2. A cada amostra, repassa a leitura e coleta o vetor de saída
//! 3. Quando a biblioteca pede, grava o blob atual no armazenamento

use crate::config::AirConfig;
use crate::error::{ConfigError, ConfigResult, ProcessError, ProcessResult};
use crate::fusion::FusionLibrary;
use crate::state_store::{StateStore, log_save};
use crate::types::{BmeSample, FusionOutput};
use binsense_core::Component;
use tracing::{error, info, warn};

/// Processador de qualidade do ar
#[derive(Debug)]
pub struct AirQualityProcessor<F: FusionLibrary, S: StateStore> {
    fusion: F,
    store: S,
    config: AirConfig,
    initialized: bool,
    samples: u64,
    saves: u64,
    save_failures: u64,
    last_output: Option<FusionOutput>,
}

impl<F: FusionLibrary, S: StateStore> AirQualityProcessor<F, S> {
    /// Cria processador; a configuração é validada aqui.
    ///
    /// `state_capacity` precisa comportar o maior blob da biblioteca.
    pub fn new(fusion: F, store: S, config: AirConfig) -> ConfigResult<Self> {
        config.validate()?;

        if config.state_capacity < fusion.state_capacity() {
            return Err(ConfigError::Invalid(format!(
                "state_capacity {} is smaller than the fusion library state ({} bytes)",
                config.state_capacity,
                fusion.state_capacity()
            )));
        }

        Ok(Self {
            fusion,
            store,
            config,
            initialized: false,
            samples: 0,
            saves: 0,
            save_failures: 0,
            last_output: None,
        })
    }

    /// Inicializa a biblioteca com o estado salvo (uma única vez).
    ///
    /// Status de sensor tem precedência sobre status da fusão.
    pub fn init(&mut self) -> ProcessResult<()> {
        if self.initialized {
            return Ok(());
        }

        let capacity = self.config.state_capacity;
        let store = &mut self.store;
        let mut loaded = 0;
        let status = self.fusion.init(
            self.config.sample_rate,
            self.config.temperature_offset,
            &mut |buffer: &mut [u8]| {
                let limit = buffer.len().min(capacity);
                loaded = store.state_load(&mut buffer[..limit]);
                loaded
            },
        );

        if status.sensor_status != 0 {
            error!(status = status.sensor_status, "sensor initialization failed");
            return Err(ProcessError::SensorInit(status.sensor_status));
        }

        if status.fusion_status != 0 {
            error!(status = status.fusion_status, "fusion library initialization failed");
            return Err(ProcessError::FusionInit(status.fusion_status));
        }

        info!(
            sample_rate = ?self.config.sample_rate,
            restored_bytes = loaded,
            "air quality processor initialized"
        );
        self.initialized = true;
        Ok(())
    }

    /// Processa uma amostra, inicializando antes se preciso.
    ///
    /// Falhas de gravação de estado são contadas e logadas, nunca fatais.
    pub fn process(&mut self, sample: &BmeSample) -> ProcessResult<FusionOutput> {
        self.init()?;

        let mut output = FusionOutput::default();
        let capacity = self.config.state_capacity;
        let store = &mut self.store;
        let saves = &mut self.saves;
        let save_failures = &mut self.save_failures;

        self.fusion.run(sample, &mut output, &mut |blob: &[u8]| {
            // Blob maior que a capacidade não poderia ser restaurado inteiro
            if blob.len() > capacity {
                *save_failures += 1;
                warn!(bytes = blob.len(), capacity, "state blob exceeds capacity, not saved");
                return;
            }

            let result = store.save(blob);
            log_save(&*store, blob.len(), &result);
            match result {
                Ok(()) => *saves += 1,
                Err(_) => *save_failures += 1,
            }
        });

        self.samples += 1;
        self.last_output = Some(output);
        Ok(output)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Amostras processadas desde a criação
    pub fn samples_processed(&self) -> u64 {
        self.samples
    }

    /// Gravações de estado bem-sucedidas
    pub fn saves(&self) -> u64 {
        self.saves
    }

    /// Gravações de estado que falharam
    pub fn save_failures(&self) -> u64 {
        self.save_failures
    }

    pub fn last_output(&self) -> Option<&FusionOutput> {
        self.last_output.as_ref()
    }

    pub fn config(&self) -> &AirConfig {
        &self.config
    }

    pub fn fusion(&self) -> &F {
        &self.fusion
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<F: FusionLibrary, S: StateStore> Component for AirQualityProcessor<F, S> {
    fn name(&self) -> &str {
        "AirQualityProcessor"
    }

    fn is_ready(&self) -> bool {
        self.initialized
    }
}

/// Entrada com convenção de status inteiro.
///
/// Retorna 0 e preenche `output` em caso de sucesso; em falha de
/// inicialização retorna o status exato do subsistema e não processa a amostra.
pub fn process_bme_data<F: FusionLibrary, S: StateStore>(
    processor: &mut AirQualityProcessor<F, S>,
    sample: &BmeSample,
    output: &mut FusionOutput,
) -> i32 {
    match processor.process(sample) {
        Ok(result) => {
            *output = result;
            0
        }
        Err(err) => err.status_code(),
    }
}

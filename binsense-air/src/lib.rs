//! # 🌫️ binsense-air — Qualidade do Ar
//!
//! Integra a biblioteca proprietária de fusão do sensor de gás (BME68x) ao
//! host, persistindo o estado interno dela entre reinícios do processo.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │         AirQualityProcessor                      │
//! │  ┌────────────────────────────────────────────┐  │
//! │  │  FusionLibrary (externa, opaca)            │  │
//! │  │   init(modo, offset, state_load)           │  │
//! │  │   run(amostra, saída, state_save)          │  │
//! │  └────────────────────────────────────────────┘  │
//! │  ┌────────────────────────────────────────────┐  │
//! │  │  StateStore (slot único)                   │  │
//! │  │   "<len>\n<bytes>"                         │  │
//! │  └────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```ignore
//! use binsense_air::{AirConfig, AirQualityProcessor, EchoFusion, FileStateStore};
//!
//! let config = AirConfig::default();
//! let store = FileStateStore::new(&config.state_path);
//! let mut processor = AirQualityProcessor::new(EchoFusion::new(), store, config)?;
//! let output = processor.process(&sample)?;
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod fusion;
pub mod processor;
pub mod state_store;
pub mod types;

pub use config::{AirConfig, CONFIG_FILE};
pub use error::{
    ConfigError, ConfigResult, ProcessError, ProcessResult, StateError, StateResult,
};
pub use fusion::{
    DEFAULT_SAVE_INTERVAL, DEFAULT_STATE_CAPACITY, EchoFusion, FusionLibrary,
};
pub use processor::{AirQualityProcessor, process_bme_data};
pub use state_store::{DEFAULT_STATE_FILE, FileStateStore, MemoryStateStore, StateStore};
pub use types::{
    BmeSample, CorruptState, FusionOutput, InitStatus, LoadOutcome, OUTPUT_LEN,
    PersistedState, SampleRate,
};

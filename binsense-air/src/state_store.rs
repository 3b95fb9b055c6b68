//! Armazenamento de estado de slot único
//!
//! Persiste o blob da biblioteca de fusão entre reinícios do processo.
//! Cada gravação substitui integralmente a anterior; não há histórico.

use crate::error::{StateError, StateResult};
use crate::format;
use crate::types::LoadOutcome;
use std::fmt::Debug;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Nome padrão do arquivo de estado
pub const DEFAULT_STATE_FILE: &str = "savedState.dat";

/// Slot único de estado persistido
pub trait StateStore: Debug {
    /// Lê o estado gravado, copiando no máximo `capacity` bytes
    fn load(&mut self, capacity: usize) -> StateResult<LoadOutcome>;

    /// Substitui o estado gravado por `bytes`
    fn save(&mut self, bytes: &[u8]) -> StateResult<()>;

    /// Remove o estado gravado; slot vazio não é erro
    fn clear(&mut self) -> StateResult<()>;

    /// Descrição do local de armazenamento (para logs)
    fn location(&self) -> String;

    /// Adaptador no formato esperado pela inicialização da fusão.
    ///
    /// Capacidade = `buffer.len()`. Retorna o número de bytes copiados;
    /// qualquer condição sem estado utilizável vira 0.
    fn state_load(&mut self, buffer: &mut [u8]) -> usize {
        match self.load(buffer.len()) {
            Ok(LoadOutcome::Restored(state)) => {
                let count = state.copy_into(buffer);
                debug!(location = %self.location(), bytes = count, "state restored");
                count
            }
            Ok(LoadOutcome::Truncated { state, declared }) => {
                let count = state.copy_into(buffer);
                warn!(
                    location = %self.location(),
                    declared,
                    copied = count,
                    "state blob truncated"
                );
                count
            }
            Ok(LoadOutcome::Missing) => {
                debug!(location = %self.location(), "no prior state");
                0
            }
            Ok(LoadOutcome::Corrupt(reason)) => {
                warn!(location = %self.location(), %reason, "ignoring corrupt state");
                0
            }
            Err(err) => {
                warn!(error = %err, "state load failed, starting fresh");
                0
            }
        }
    }

    /// Adaptador no formato esperado pelo laço da fusão; falhas só são logadas
    fn state_save(&mut self, buffer: &[u8]) {
        let result = self.save(buffer);
        log_save(&*self, buffer.len(), &result);
    }
}

/// Log comum de uma gravação concluída ou falha
pub(crate) fn log_save<S: StateStore + ?Sized>(store: &S, bytes: usize, result: &StateResult<()>) {
    match result {
        Ok(()) => debug!(location = %store.location(), bytes, "state saved"),
        Err(err) => warn!(error = %err, "state save failed, keeping previous state"),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ARQUIVO
// ═══════════════════════════════════════════════════════════════════════════════

/// Estado persistido em um arquivo local
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileStateStore {
    fn default() -> Self {
        Self::new(DEFAULT_STATE_FILE)
    }
}

impl StateStore for FileStateStore {
    fn load(&mut self, capacity: usize) -> StateResult<LoadOutcome> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LoadOutcome::Missing),
            Err(source) => {
                return Err(StateError::Open {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        format::decode(BufReader::new(file), capacity).map_err(|source| StateError::Read {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&mut self, bytes: &[u8]) -> StateResult<()> {
        let write_err = |source: io::Error| StateError::Write {
            path: self.path.clone(),
            source,
        };

        let file = File::create(&self.path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        format::encode(bytes, &mut writer).map_err(write_err)?;
        writer.flush().map_err(write_err)
    }

    fn clear(&mut self) -> StateResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StateError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MEMÓRIA
// ═══════════════════════════════════════════════════════════════════════════════

/// Slot em memória com a mesma representação do arquivo
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    slot: Option<Vec<u8>>,
    writes: u64,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cria slot já preenchido com conteúdo bruto (inclusive inválido)
    pub fn with_raw(raw: Vec<u8>) -> Self {
        Self {
            slot: Some(raw),
            writes: 0,
        }
    }

    /// Conteúdo bruto do slot
    pub fn raw(&self) -> Option<&[u8]> {
        self.slot.as_deref()
    }

    /// Número de gravações realizadas
    pub fn writes(&self) -> u64 {
        self.writes
    }
}

impl StateStore for MemoryStateStore {
    fn load(&mut self, capacity: usize) -> StateResult<LoadOutcome> {
        match &self.slot {
            None => Ok(LoadOutcome::Missing),
            Some(raw) => format::decode(Cursor::new(raw.as_slice()), capacity).map_err(|source| {
                StateError::Read {
                    path: PathBuf::from(self.location()),
                    source,
                }
            }),
        }
    }

    fn save(&mut self, bytes: &[u8]) -> StateResult<()> {
        self.slot = Some(format::encode_to_vec(bytes));
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> StateResult<()> {
        self.slot = None;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

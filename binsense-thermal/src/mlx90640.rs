//! Driver de registradores do MLX90640
//!
//! O barramento pertence ao chamador e é passado ao construtor; o driver não
//! guarda nenhum descritor global. Endereços de registrador e palavras de
//! dados trafegam em big-endian.

use crate::error::{ThermalError, ThermalResult};
use crate::types::{
    EEPROM_WORDS, FRAME_WORDS, MAX_FREQUENCY_HZ, RawFrame, RefreshRate, ThermalConfig,
};
use binsense_core::{Component, Sensor, SensorError};
use embedded_hal::i2c::I2c;
use std::fmt;
use tracing::{debug, info};

/// Endereço de chamada geral do barramento
pub const GENERAL_CALL_ADDRESS: u8 = 0x00;

/// Comando de reset por chamada geral
pub const GENERAL_RESET_COMMAND: u8 = 0x06;

pub const RAM_START: u16 = 0x0400;
pub const EEPROM_START: u16 = 0x2400;
pub const STATUS_REGISTER: u16 = 0x8000;
pub const CONTROL_REGISTER: u16 = 0x800D;

const STATUS_NEW_DATA: u16 = 0x0008;
const STATUS_SUBPAGE_MASK: u16 = 0x0007;
const CONTROL_REFRESH_MASK: u16 = 0x0380;
const CONTROL_REFRESH_SHIFT: u16 = 7;

/// Câmera térmica MLX90640
pub struct Mlx90640<I> {
    i2c: I,
    config: ThermalConfig,
    initialized: bool,
    frame_count: u64,
}

impl<I: I2c> Mlx90640<I> {
    /// Cria driver com configuração padrão (endereço 0x33)
    pub fn new(i2c: I) -> Self {
        Self {
            i2c,
            config: ThermalConfig::default(),
            initialized: false,
            frame_count: 0,
        }
    }

    /// Cria driver com configuração específica
    pub fn with_config(i2c: I, config: ThermalConfig) -> ThermalResult<Self> {
        validate(&config)?;

        Ok(Self {
            i2c,
            config,
            initialized: false,
            frame_count: 0,
        })
    }

    /// Confere que o dispositivo responde e aplica a taxa configurada
    pub fn init(&mut self) -> ThermalResult<()> {
        let control = self.control()?;
        debug!(address = self.config.address, control, "mlx90640 responded");

        self.set_refresh_rate(self.config.refresh_rate)?;
        self.initialized = true;

        info!(
            address = self.config.address,
            refresh_hz = self.config.refresh_rate.hz(),
            "thermal camera initialized"
        );
        Ok(())
    }

    /// Reset por chamada geral; afeta todos os dispositivos do barramento
    pub fn general_reset(&mut self) -> ThermalResult<()> {
        self.i2c
            .write(GENERAL_CALL_ADDRESS, &[GENERAL_RESET_COMMAND])
            .map_err(ThermalError::bus)?;
        self.initialized = false;
        Ok(())
    }

    /// Lê `buffer.len()` palavras a partir de `start`
    pub fn read_words(&mut self, start: u16, buffer: &mut [u16]) -> ThermalResult<()> {
        let mut raw = vec![0u8; buffer.len() * 2];
        self.i2c
            .write_read(self.config.address, &start.to_be_bytes(), &mut raw)
            .map_err(ThermalError::bus)?;

        for (word, bytes) in buffer.iter_mut().zip(raw.chunks_exact(2)) {
            *word = u16::from_be_bytes([bytes[0], bytes[1]]);
        }
        Ok(())
    }

    /// Lê uma única palavra
    pub fn read_word(&mut self, register: u16) -> ThermalResult<u16> {
        let mut word = [0u16; 1];
        self.read_words(register, &mut word)?;
        Ok(word[0])
    }

    /// Grava uma palavra em um registrador
    pub fn write_word(&mut self, register: u16, value: u16) -> ThermalResult<()> {
        let [ra, rb] = register.to_be_bytes();
        let [va, vb] = value.to_be_bytes();
        self.i2c
            .write(self.config.address, &[ra, rb, va, vb])
            .map_err(ThermalError::bus)
    }

    /// Registra a frequência pedida.
    ///
    /// O clock pertence à implementação do barramento; o driver só guarda o
    /// valor para quem monta o transporte.
    pub fn set_frequency(&mut self, hz: u32) -> ThermalResult<()> {
        if hz == 0 || hz > MAX_FREQUENCY_HZ {
            return Err(ThermalError::InvalidFrequency(hz));
        }
        self.config.frequency_hz = hz;
        Ok(())
    }

    pub fn frequency(&self) -> u32 {
        self.config.frequency_hz
    }

    pub fn status(&mut self) -> ThermalResult<u16> {
        self.read_word(STATUS_REGISTER)
    }

    pub fn control(&mut self) -> ThermalResult<u16> {
        self.read_word(CONTROL_REGISTER)
    }

    /// Taxa de atualização atual do dispositivo
    pub fn refresh_rate(&mut self) -> ThermalResult<RefreshRate> {
        let control = self.control()?;
        Ok(RefreshRate::from_bits(
            (control & CONTROL_REFRESH_MASK) >> CONTROL_REFRESH_SHIFT,
        ))
    }

    /// Altera só os bits de taxa do registrador de controle
    pub fn set_refresh_rate(&mut self, rate: RefreshRate) -> ThermalResult<()> {
        let control = self.control()?;
        let updated = (control & !CONTROL_REFRESH_MASK) | (rate.bits() << CONTROL_REFRESH_SHIFT);
        self.write_word(CONTROL_REGISTER, updated)?;
        self.config.refresh_rate = rate;
        Ok(())
    }

    /// Dump da EEPROM de calibração
    pub fn read_eeprom(&mut self) -> ThermalResult<Vec<u16>> {
        let mut words = vec![0u16; EEPROM_WORDS];
        self.read_words(EEPROM_START, &mut words)?;
        Ok(words)
    }

    /// Lê o frame da RAM se houver dado novo
    pub fn read_frame(&mut self) -> ThermalResult<RawFrame> {
        if !self.initialized {
            return Err(ThermalError::NotInitialized);
        }

        let status = self.status()?;
        if status & STATUS_NEW_DATA == 0 {
            return Err(ThermalError::NoData);
        }

        let mut words = vec![0u16; FRAME_WORDS];
        self.read_words(RAM_START, &mut words)?;
        self.write_word(STATUS_REGISTER, status & !STATUS_NEW_DATA)?;
        self.frame_count += 1;

        Ok(RawFrame {
            subpage: (status & STATUS_SUBPAGE_MASK) as u8,
            words,
        })
    }

    pub fn config(&self) -> &ThermalConfig {
        &self.config
    }

    /// Frames lidos com sucesso
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Devolve o barramento ao chamador
    pub fn release(self) -> I {
        self.i2c
    }
}

fn validate(config: &ThermalConfig) -> ThermalResult<()> {
    if config.address == GENERAL_CALL_ADDRESS || config.address > 0x7F {
        return Err(ThermalError::InvalidAddress(config.address));
    }
    if config.frequency_hz == 0 || config.frequency_hz > MAX_FREQUENCY_HZ {
        return Err(ThermalError::InvalidFrequency(config.frequency_hz));
    }
    Ok(())
}

impl<I> fmt::Debug for Mlx90640<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mlx90640")
            .field("config", &self.config)
            .field("initialized", &self.initialized)
            .field("frame_count", &self.frame_count)
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// IMPLEMENTAÇÃO DOS TRAITS DO CORE
// ═══════════════════════════════════════════════════════════════════════════════

impl<I: I2c> Component for Mlx90640<I> {
    fn name(&self) -> &str {
        "Mlx90640"
    }

    fn is_ready(&self) -> bool {
        self.initialized
    }
}

impl<I: I2c> Sensor for Mlx90640<I> {
    type Reading = RawFrame;
    type Config = ThermalConfig;

    fn configure(&mut self, config: Self::Config) -> Result<(), SensorError> {
        validate(&config)?;
        let rate = config.refresh_rate;
        self.config = config;
        if self.initialized {
            self.set_refresh_rate(rate)?;
        }
        Ok(())
    }

    fn read(&mut self) -> Result<Self::Reading, SensorError> {
        Ok(self.read_frame()?)
    }

    fn sample_rate(&self) -> f32 {
        self.config.refresh_rate.hz()
    }

    fn reset(&mut self) -> Result<(), SensorError> {
        self.general_reset()?;
        Ok(())
    }
}

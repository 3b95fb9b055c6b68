//! Tipos de dados da câmera térmica

use serde::{Deserialize, Serialize};

/// Endereço I2C de fábrica do MLX90640
pub const DEFAULT_ADDRESS: u8 = 0x33;

/// Frequência padrão do barramento (Hz)
pub const DEFAULT_FREQUENCY_HZ: u32 = 400_000;

/// Frequência máxima suportada pelo sensor (Fast Mode Plus)
pub const MAX_FREQUENCY_HZ: u32 = 1_000_000;

/// Palavras de RAM em um frame (768 pixels + 64 auxiliares)
pub const FRAME_WORDS: usize = 832;

/// Palavras de EEPROM de calibração
pub const EEPROM_WORDS: usize = 832;

/// Taxa de atualização de subpágina (bits 7..9 do registrador de controle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RefreshRate {
    #[serde(rename = "0.5hz")]
    HalfHz = 0,
    #[serde(rename = "1hz")]
    OneHz = 1,
    #[default]
    #[serde(rename = "2hz")]
    TwoHz = 2,
    #[serde(rename = "4hz")]
    FourHz = 3,
    #[serde(rename = "8hz")]
    EightHz = 4,
    #[serde(rename = "16hz")]
    SixteenHz = 5,
    #[serde(rename = "32hz")]
    ThirtyTwoHz = 6,
    #[serde(rename = "64hz")]
    SixtyFourHz = 7,
}

impl RefreshRate {
    /// Valor de 3 bits gravado no registrador
    pub fn bits(&self) -> u16 {
        *self as u16
    }

    /// Decodifica os 3 bits do registrador
    pub fn from_bits(bits: u16) -> Self {
        match bits & 0x7 {
            0 => RefreshRate::HalfHz,
            1 => RefreshRate::OneHz,
            2 => RefreshRate::TwoHz,
            3 => RefreshRate::FourHz,
            4 => RefreshRate::EightHz,
            5 => RefreshRate::SixteenHz,
            6 => RefreshRate::ThirtyTwoHz,
            _ => RefreshRate::SixtyFourHz,
        }
    }

    /// Frequência em Hz
    pub fn hz(&self) -> f32 {
        0.5 * (1u32 << self.bits()) as f32
    }
}

/// Configuração da câmera térmica
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalConfig {
    /// Endereço I2C de 7 bits
    pub address: u8,
    /// Frequência pedida ao barramento (Hz)
    pub frequency_hz: u32,
    /// Taxa de atualização
    pub refresh_rate: RefreshRate,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            refresh_rate: RefreshRate::default(),
        }
    }
}

/// Frame bruto lido da RAM (sem compensação)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    /// Subpágina medida (0 ou 1)
    pub subpage: u8,
    /// Palavras da RAM a partir de 0x0400
    pub words: Vec<u16>,
}

impl RawFrame {
    /// Palavras de pixel (sem as auxiliares)
    pub fn pixels(&self) -> &[u16] {
        &self.words[..self.words.len().min(768)]
    }

    /// Palavras auxiliares (Ta, VDD, ganho)
    pub fn aux(&self) -> &[u16] {
        &self.words[self.words.len().min(768)..]
    }
}

//! Testes do módulo binsense-thermal

use super::*;
use crate::mlx90640::{CONTROL_REGISTER, EEPROM_START, RAM_START, STATUS_REGISTER};
use binsense_core::{Component, Sensor, SensorError};
use embedded_hal::i2c::{self, ErrorKind, NoAcknowledgeSource, Operation};
use std::collections::HashMap;

// ═══════════════════════════════════════════════════════════════════════════════
// BARRAMENTO SIMULADO
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
struct MockError(ErrorKind);

impl i2c::Error for MockError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// Mapa de registradores de 16 bits respondendo em um endereço
#[derive(Debug, Default)]
struct MockCameraBus {
    address: u8,
    registers: HashMap<u16, u16>,
    writes: Vec<(u16, u16)>,
    resets: u32,
}

impl MockCameraBus {
    fn at(address: u8) -> Self {
        let mut bus = Self {
            address,
            ..Default::default()
        };
        // Controle de fábrica: 2 Hz, modo xadrez
        bus.registers.insert(CONTROL_REGISTER, 0x1901);
        bus
    }
}

impl i2c::ErrorType for MockCameraBus {
    type Error = MockError;
}

impl i2c::I2c for MockCameraBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address == 0x00 {
            for op in operations.iter() {
                if let Operation::Write(bytes) = op {
                    if bytes.len() == 1 && bytes[0] == 0x06 {
                        self.resets += 1;
                    }
                }
            }
            return Ok(());
        }

        if address != self.address {
            return Err(MockError(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)));
        }

        let mut pointer = 0u16;
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    pointer = u16::from_be_bytes([bytes[0], bytes[1]]);
                    if bytes.len() == 4 {
                        let value = u16::from_be_bytes([bytes[2], bytes[3]]);
                        self.registers.insert(pointer, value);
                        self.writes.push((pointer, value));
                    }
                }
                Operation::Read(buffer) => {
                    for (i, chunk) in buffer.chunks_exact_mut(2).enumerate() {
                        let word = self
                            .registers
                            .get(&pointer.wrapping_add(i as u16))
                            .copied()
                            .unwrap_or(0);
                        chunk.copy_from_slice(&word.to_be_bytes());
                    }
                }
            }
        }
        Ok(())
    }
}

fn ready_camera() -> Mlx90640<MockCameraBus> {
    let mut camera = Mlx90640::new(MockCameraBus::at(DEFAULT_ADDRESS));
    camera.init().unwrap();
    camera
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTES DE DRIVER
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_camera_creation() {
    let camera = Mlx90640::new(MockCameraBus::at(DEFAULT_ADDRESS));
    assert_eq!(camera.name(), "Mlx90640");
    assert!(!camera.is_ready());
    assert_eq!(camera.config().address, 0x33);
    assert_eq!(camera.frequency(), DEFAULT_FREQUENCY_HZ);
}

#[test]
fn test_invalid_config() {
    let config = ThermalConfig {
        address: 0x00,
        ..ThermalConfig::default()
    };
    let result = Mlx90640::with_config(MockCameraBus::at(0x33), config);
    assert!(matches!(result, Err(ThermalError::InvalidAddress(0x00))));

    let config = ThermalConfig {
        frequency_hz: 0,
        ..ThermalConfig::default()
    };
    let result = Mlx90640::with_config(MockCameraBus::at(0x33), config);
    assert!(matches!(result, Err(ThermalError::InvalidFrequency(0))));
}

#[test]
fn test_init_applies_refresh_rate() {
    let config = ThermalConfig {
        refresh_rate: RefreshRate::EightHz,
        ..ThermalConfig::default()
    };
    let mut camera = Mlx90640::with_config(MockCameraBus::at(0x33), config).unwrap();
    camera.init().unwrap();

    assert!(camera.is_ready());
    assert_eq!(camera.refresh_rate().unwrap(), RefreshRate::EightHz);
    // Bits fora da taxa preservados
    assert_eq!(camera.control().unwrap() & !0x0380, 0x1901 & !0x0380);
    assert_eq!(camera.sample_rate(), 8.0);
}

#[test]
fn test_init_without_device() {
    let mut camera = Mlx90640::new(MockCameraBus::at(0x21));
    let err = camera.init().unwrap_err();
    assert_eq!(
        err,
        ThermalError::I2c(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))
    );
    assert!(!camera.is_ready());
}

#[test]
fn test_read_words_big_endian() {
    let mut bus = MockCameraBus::at(0x33);
    bus.registers.insert(EEPROM_START, 0x00AE);
    bus.registers.insert(EEPROM_START + 1, 0x499A);
    let mut camera = Mlx90640::new(bus);

    let mut words = [0u16; 2];
    camera.read_words(EEPROM_START, &mut words).unwrap();
    assert_eq!(words, [0x00AE, 0x499A]);

    let eeprom = camera.read_eeprom().unwrap();
    assert_eq!(eeprom.len(), EEPROM_WORDS);
    assert_eq!(eeprom[1], 0x499A);
}

#[test]
fn test_write_word() {
    let mut camera = Mlx90640::new(MockCameraBus::at(0x33));
    camera.write_word(0x800F, 0xBEEF).unwrap();
    assert_eq!(camera.read_word(0x800F).unwrap(), 0xBEEF);

    let bus = camera.release();
    assert_eq!(bus.writes, vec![(0x800F, 0xBEEF)]);
}

#[test]
fn test_general_reset() {
    let mut camera = ready_camera();
    camera.reset().unwrap();
    assert!(!camera.is_ready());
    assert_eq!(camera.release().resets, 1);
}

#[test]
fn test_set_frequency() {
    let mut camera = Mlx90640::new(MockCameraBus::at(0x33));
    camera.set_frequency(1_000_000).unwrap();
    assert_eq!(camera.frequency(), 1_000_000);
    assert_eq!(
        camera.set_frequency(3_400_000),
        Err(ThermalError::InvalidFrequency(3_400_000))
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTES DE FRAME
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_read_before_init() {
    let mut camera = Mlx90640::new(MockCameraBus::at(0x33));
    assert_eq!(camera.read(), Err(SensorError::NotInitialized));
}

#[test]
fn test_no_new_frame() {
    let mut camera = ready_camera();
    assert_eq!(camera.read(), Err(SensorError::NoData));
    assert_eq!(camera.frame_count(), 0);
}

#[test]
fn test_read_frame_clears_new_data() {
    let mut bus = ready_camera().release();
    bus.registers.insert(STATUS_REGISTER, 0x0009);
    bus.registers.insert(RAM_START, 0x1234);
    bus.registers.insert(RAM_START + 768, 0x4BF2);

    let mut camera = Mlx90640::new(bus);
    camera.init().unwrap();

    let frame = camera.read().unwrap();
    assert_eq!(frame.subpage, 1);
    assert_eq!(frame.words.len(), FRAME_WORDS);
    assert_eq!(frame.pixels().len(), 768);
    assert_eq!(frame.pixels()[0], 0x1234);
    assert_eq!(frame.aux()[0], 0x4BF2);
    assert_eq!(camera.frame_count(), 1);

    // Bit de dado novo limpo; próxima leitura não tem frame
    assert_eq!(camera.status().unwrap() & 0x0008, 0);
    assert_eq!(camera.read(), Err(SensorError::NoData));
}

#[test]
fn test_refresh_rate_bits() {
    assert_eq!(RefreshRate::HalfHz.hz(), 0.5);
    assert_eq!(RefreshRate::SixtyFourHz.hz(), 64.0);
    assert_eq!(RefreshRate::from_bits(RefreshRate::FourHz.bits()), RefreshRate::FourHz);
    assert_eq!(RefreshRate::default(), RefreshRate::TwoHz);
}

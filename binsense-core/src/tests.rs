//! Testes do módulo binsense-core

use super::*;

#[derive(Debug)]
struct FakeSwitch {
    open: bool,
    resets: u32,
}

impl Component for FakeSwitch {
    fn name(&self) -> &str {
        "fake-switch"
    }
}

impl Sensor for FakeSwitch {
    type Reading = bool;
    type Config = bool;

    fn configure(&mut self, config: bool) -> Result<(), SensorError> {
        self.open = config;
        Ok(())
    }

    fn read(&mut self) -> Result<bool, SensorError> {
        Ok(self.open)
    }

    fn reset(&mut self) -> Result<(), SensorError> {
        self.resets += 1;
        self.open = false;
        Ok(())
    }
}

#[test]
fn test_component_defaults() {
    let switch = FakeSwitch { open: false, resets: 0 };
    assert_eq!(switch.name(), "fake-switch");
    assert!(switch.is_ready());
    assert_eq!(switch.version(), env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_sensor_configure_read_reset() {
    let mut switch = FakeSwitch { open: false, resets: 0 };
    assert_eq!(switch.sample_rate(), 0.0);

    switch.configure(true).unwrap();
    assert!(switch.read().unwrap());

    switch.reset().unwrap();
    assert!(!switch.read().unwrap());
    assert_eq!(switch.resets, 1);
}

#[test]
fn test_sensor_error_display() {
    assert_eq!(SensorError::Timeout(250).to_string(), "Timeout after 250ms");
    assert_eq!(SensorError::NoData.to_string(), "No data available yet");
    assert!(SensorError::Hardware("nack".into()).to_string().contains("nack"));
}

#[test]
fn test_now_ns_is_positive() {
    assert!(now_ns() > 0);
}

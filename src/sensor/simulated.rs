//! Simulated climate sensor for development and testing.

use super::ClimateSensor;
use std::sync::atomic::{AtomicI16, AtomicU16, Ordering};

/// Thread-safe simulated sensor.
///
/// Values are stored in fixed-point form (centidegrees / centi-percent)
/// so they can live in atomics and be updated from any task, e.g. a
/// drift loop in the binary.
pub struct SimulatedClimateSensor {
    /// Temperature in centidegrees Celsius (°C * 100)
    temperature: AtomicI16,
    /// Humidity in centi-percent (% * 100)
    humidity: AtomicU16,
}

impl SimulatedClimateSensor {
    pub fn new(initial_celsius: f32, initial_percent: f32) -> Self {
        Self {
            temperature: AtomicI16::new((initial_celsius * 100.0) as i16),
            humidity: AtomicU16::new((initial_percent * 100.0) as u16),
        }
    }

    /// Set the temperature in degrees Celsius.
    pub fn set_celsius(&self, celsius: f32) {
        self.temperature
            .store((celsius * 100.0) as i16, Ordering::SeqCst);
    }

    /// Set the humidity in percent.
    pub fn set_percent(&self, percent: f32) {
        self.humidity
            .store((percent * 100.0) as u16, Ordering::SeqCst);
    }
}

impl ClimateSensor for SimulatedClimateSensor {
    fn read_temperature(&self) -> f32 {
        self.temperature.load(Ordering::SeqCst) as f32 / 100.0
    }

    fn read_humidity(&self) -> f32 {
        self.humidity.load(Ordering::SeqCst) as f32 / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_values() {
        let sensor = SimulatedClimateSensor::new(21.0, 45.0);
        assert_eq!(sensor.read_temperature(), 21.0);
        assert_eq!(sensor.read_humidity(), 45.0);
    }

    #[test]
    fn test_set_celsius() {
        let sensor = SimulatedClimateSensor::new(21.0, 45.0);
        sensor.set_celsius(23.5);
        assert_eq!(sensor.read_temperature(), 23.5);
    }

    #[test]
    fn test_set_percent() {
        let sensor = SimulatedClimateSensor::new(21.0, 45.0);
        sensor.set_percent(60.25);
        assert_eq!(sensor.read_humidity(), 60.25);
    }
}

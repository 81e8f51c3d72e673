//! Climate sensor adapter.
//!
//! The accessory reads temperature and humidity through this seam. Reads
//! are synchronous and run on the accessory server's critical path, so
//! implementations must not block for unbounded time. There is no failure
//! return; sensor absence is detected once, at initialization.

pub mod fault;
pub mod simulated;

pub use fault::{FaultIndicator, LogFaultIndicator};
pub use simulated::SimulatedClimateSensor;

/// Synchronous temperature/humidity source.
pub trait ClimateSensor: Send + Sync {
    /// Current temperature in degrees Celsius.
    fn read_temperature(&self) -> f32;

    /// Current relative humidity in percent.
    fn read_humidity(&self) -> f32;
}

/// Fallback adapter installed when no sensor hardware responds at
/// initialization. Reports zeros, keeping the read paths total.
pub struct OfflineClimateSensor;

impl ClimateSensor for OfflineClimateSensor {
    fn read_temperature(&self) -> f32 {
        0.0
    }

    fn read_humidity(&self) -> f32 {
        0.0
    }
}

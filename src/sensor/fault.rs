//! Hardware fault indication.
//!
//! When the climate sensor does not respond at initialization, the device
//! keeps serving (with the offline fallback adapter) and latches a visual
//! fault indication instead of surfacing the condition through the
//! protocol layer.

use log::error;
use std::sync::atomic::{AtomicBool, Ordering};

/// Visual fault indicator.
pub trait FaultIndicator: Send + Sync {
    /// Latch the fault indication on. Idempotent.
    fn activate(&self);

    /// Whether the fault indication is currently latched.
    fn is_active(&self) -> bool;
}

/// Log-based indicator. Stands in for the status LED that hardware builds
/// drive through a GPIO pin.
pub struct LogFaultIndicator {
    pin: u8,
    active: AtomicBool,
}

impl LogFaultIndicator {
    pub fn new(pin: u8) -> Self {
        Self {
            pin,
            active: AtomicBool::new(false),
        }
    }
}

impl FaultIndicator for LogFaultIndicator {
    fn activate(&self) {
        if !self.active.swap(true, Ordering::SeqCst) {
            error!("sensor fault: latching status LED on GPIO {} high", self.pin);
        }
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_latches() {
        let indicator = LogFaultIndicator::new(13);
        assert!(!indicator.is_active());

        indicator.activate();
        assert!(indicator.is_active());

        // Stays latched on repeat activation
        indicator.activate();
        assert!(indicator.is_active());
    }
}

//! Accessory application wiring.
//!
//! Owns the collaborators (state manager, sensor adapter, attribute
//! database) and binds the characteristic callbacks. Construction replaces
//! the process-wide globals of classic accessory firmware: one `App` is
//! built at startup and handed by reference to whoever needs it.

use crate::accessory::db::{self, Iid};
use crate::accessory::state::StateManager;
use crate::config::Config;
use crate::error::Result;
use crate::hap::accessory::{Accessory, IdentifyHandler};
use crate::hap::characteristic::FloatReadHandler;
use crate::hap::server::EventRaiser;
use crate::sensor::{ClimateSensor, FaultIndicator, OfflineClimateSensor};
use crate::store::KeyValueStore;
use log::{error, info};
use std::sync::Arc;

/// Read callback for the 'Current Temperature' characteristic.
///
/// Samples the sensor, logs the value and unconditionally raises an event
/// so subscribed controllers refresh whenever the value is sampled.
fn temperature_read_handler(sensor: Arc<dyn ClimateSensor>) -> FloatReadHandler {
    Arc::new(move |ctx| {
        let value = sensor.read_temperature();
        info!("current temperature read: {value} C");
        ctx.raise_event();
        Ok(value)
    })
}

/// Read callback for the 'Current Relative Humidity' characteristic.
fn humidity_read_handler(sensor: Arc<dyn ClimateSensor>) -> FloatReadHandler {
    Arc::new(move |ctx| {
        let value = sensor.read_humidity();
        info!("current relative humidity read: {value} %");
        ctx.raise_event();
        Ok(value)
    })
}

/// Identify responds with a log line only; the device has no dedicated
/// physical indication.
fn identify_handler() -> IdentifyHandler {
    Arc::new(|request| {
        info!("identify requested for accessory {}", request.aid);
        Ok(())
    })
}

/// The accessory application.
pub struct App {
    accessory: Accessory,
    state: StateManager,
    sensor_online: bool,
}

impl App {
    /// Build the application: load persisted state, install the sensor
    /// adapter (or the offline fallback plus fault indication when probing
    /// found none), construct and validate the attribute database.
    ///
    /// A store-level failure propagates; the caller treats it as fatal.
    pub fn new(
        config: &Config,
        store: Arc<dyn KeyValueStore>,
        sensor: Option<Arc<dyn ClimateSensor>>,
        fault: &dyn FaultIndicator,
    ) -> Result<Self> {
        let state = StateManager::load(store)?;

        let sensor_online = sensor.is_some();
        let sensor = match sensor {
            Some(sensor) => sensor,
            None => {
                error!("climate sensor did not respond at startup, serving zeros");
                fault.activate();
                Arc::new(OfflineClimateSensor)
            }
        };

        let accessory = db::accessory(
            config,
            temperature_read_handler(sensor.clone()),
            humidity_read_handler(sensor),
            identify_handler(),
        );
        accessory.validate()?;

        Ok(Self {
            accessory,
            state,
            sensor_online,
        })
    }

    pub fn accessory(&self) -> &Accessory {
        &self.accessory
    }

    pub fn state_manager(&self) -> &StateManager {
        &self.state
    }

    pub fn sensor_online(&self) -> bool {
        self.sensor_online
    }

    /// Read the 'Current Temperature' characteristic through its bound
    /// handler, exactly as the accessory server would.
    pub fn read_temperature(&self, server: &dyn EventRaiser) -> Result<f32> {
        self.accessory.read_float(
            Iid::TemperatureSensor as u64,
            Iid::TemperatureSensorCurrentTemperature as u64,
            server,
        )
    }

    /// Read the 'Current Relative Humidity' characteristic through its
    /// bound handler.
    pub fn read_humidity(&self, server: &dyn EventRaiser) -> Result<f32> {
        self.accessory.read_float(
            Iid::HumiditySensor as u64,
            Iid::HumiditySensorCurrentRelativeHumidity as u64,
            server,
        )
    }

    /// Dispatch an identify request to the accessory.
    pub fn identify(&self) -> Result<()> {
        self.accessory.identify()
    }
}

//! Accessory descriptor and attribute-database dispatch.
//!
//! The accessory record is constructed once at startup and read-only for
//! the rest of the process lifetime. Reads dispatch through it exactly the
//! way the external server does: look up the service/characteristic pair,
//! build a request context, invoke the bound handler.

use crate::error::{AccessoryError, Result};
use crate::hap::characteristic::{Characteristic, CharacteristicFormat};
use crate::hap::server::{EventRaiser, IdentifyRequest, ReadContext, WriteContext};
use crate::hap::service::Service;
use std::collections::HashSet;
use std::sync::Arc;
use strum::FromRepr;

/// Accessory categories assigned by HAP.
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u8)]
pub enum AccessoryCategory {
    Other = 1,
    Bridges = 2,
    Fans = 3,
    Thermostats = 9,
    Sensors = 10,
}

pub type IdentifyHandler = Arc<dyn Fn(&IdentifyRequest) -> Result<()> + Send + Sync>;

/// The accessory: category, identification strings and the service tree.
///
/// Exactly one accessory (aid 1) lives in the process for this device
/// class.
pub struct Accessory {
    pub aid: u64,
    pub category: AccessoryCategory,
    pub name: String,
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
    pub firmware_version: String,
    pub hardware_version: String,
    pub services: Vec<Service>,
    pub identify_handler: IdentifyHandler,
}

impl Accessory {
    pub fn service(&self, iid: u64) -> Option<&Service> {
        self.services.iter().find(|s| s.iid == iid)
    }

    /// Check the structural invariants of the attribute database.
    ///
    /// A violation is a programming error in the static declarations, not
    /// a recoverable runtime condition; this runs once at startup.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for service in &self.services {
            if !seen.insert(service.iid) {
                return Err(AccessoryError::DuplicateInstanceId(service.iid));
            }
            if service.characteristics.is_empty() {
                return Err(AccessoryError::EmptyService(service.iid));
            }
            for characteristic in &service.characteristics {
                let iid = characteristic.iid();
                if !seen.insert(iid) {
                    return Err(AccessoryError::DuplicateInstanceId(iid));
                }
                if characteristic.properties().readable && !characteristic.has_read_handler() {
                    return Err(AccessoryError::MissingReadHandler(iid));
                }
            }
        }
        Ok(())
    }

    fn characteristic(&self, service_iid: u64, characteristic_iid: u64) -> Result<&Characteristic> {
        let service = self
            .service(service_iid)
            .ok_or(AccessoryError::ServiceNotFound(service_iid))?;
        service
            .characteristic(characteristic_iid)
            .ok_or(AccessoryError::CharacteristicNotFound(characteristic_iid))
    }

    /// Invoke the read handler of a float characteristic, as the server
    /// does when a controller reads the value.
    pub fn read_float(
        &self,
        service_iid: u64,
        characteristic_iid: u64,
        server: &dyn EventRaiser,
    ) -> Result<f32> {
        let Characteristic::Float(characteristic) =
            self.characteristic(service_iid, characteristic_iid)?
        else {
            return Err(AccessoryError::FormatMismatch {
                iid: characteristic_iid,
                expected: CharacteristicFormat::Float,
            });
        };
        let handler = characteristic
            .read_handler
            .as_ref()
            .ok_or(AccessoryError::MissingReadHandler(characteristic_iid))?;
        let ctx = ReadContext::new(self.aid, service_iid, characteristic_iid, server);
        handler(&ctx)
    }

    /// Invoke the read handler of a string characteristic.
    pub fn read_string(
        &self,
        service_iid: u64,
        characteristic_iid: u64,
        server: &dyn EventRaiser,
    ) -> Result<String> {
        let Characteristic::String(characteristic) =
            self.characteristic(service_iid, characteristic_iid)?
        else {
            return Err(AccessoryError::FormatMismatch {
                iid: characteristic_iid,
                expected: CharacteristicFormat::String,
            });
        };
        let handler = characteristic
            .read_handler
            .as_ref()
            .ok_or(AccessoryError::MissingReadHandler(characteristic_iid))?;
        let ctx = ReadContext::new(self.aid, service_iid, characteristic_iid, server);
        handler(&ctx)
    }

    /// Invoke the read handler of an opaque-data characteristic.
    pub fn read_data(
        &self,
        service_iid: u64,
        characteristic_iid: u64,
        server: &dyn EventRaiser,
    ) -> Result<Vec<u8>> {
        let Characteristic::Data(characteristic) =
            self.characteristic(service_iid, characteristic_iid)?
        else {
            return Err(AccessoryError::FormatMismatch {
                iid: characteristic_iid,
                expected: CharacteristicFormat::Data,
            });
        };
        let handler = characteristic
            .read_handler
            .as_ref()
            .ok_or(AccessoryError::MissingReadHandler(characteristic_iid))?;
        let ctx = ReadContext::new(self.aid, service_iid, characteristic_iid, server);
        handler(&ctx)
    }

    /// Invoke the write handler of a bool characteristic, as the server
    /// does when a controller writes the value.
    pub fn write_bool(
        &self,
        service_iid: u64,
        characteristic_iid: u64,
        value: bool,
        server: &dyn EventRaiser,
    ) -> Result<()> {
        let Characteristic::Bool(characteristic) =
            self.characteristic(service_iid, characteristic_iid)?
        else {
            return Err(AccessoryError::FormatMismatch {
                iid: characteristic_iid,
                expected: CharacteristicFormat::Bool,
            });
        };
        let handler = characteristic
            .write_handler
            .as_ref()
            .ok_or(AccessoryError::NotWritable(characteristic_iid))?;
        let ctx = WriteContext::new(self.aid, service_iid, characteristic_iid, server);
        handler(&ctx, value)
    }

    /// Dispatch an identify request to the accessory's identify callback.
    pub fn identify(&self) -> Result<()> {
        let request = IdentifyRequest { aid: self.aid };
        (self.identify_handler)(&request)
    }
}

//! Characteristic descriptors for the accessory attribute database.
//!
//! A characteristic is fully specified before the accessory server starts:
//! instance ID, HAP type tag, capability flags, value constraints and the
//! read/write callback pair. Descriptors are immutable after construction;
//! instance IDs are cached by paired controllers and must stay stable
//! across firmware versions.

use crate::error::Result;
use crate::hap::server::{ReadContext, WriteContext};
use crate::hap::uuid::HapUuid;
use std::sync::Arc;

/// Wire format of a characteristic value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CharacteristicFormat {
    Bool,
    Float,
    String,
    Data,
}

/// Unit attached to numeric characteristic values.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CharacteristicUnit {
    #[default]
    Unitless,
    Celsius,
    Percentage,
}

/// IP-transport capability flags of a characteristic.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct IpProperties {
    /// The characteristic is a control point: write-mostly, reads return
    /// the response to the previous write.
    pub control_point: bool,
    pub supports_write_response: bool,
}

/// BLE-transport capability flags of a characteristic.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BleProperties {
    pub supports_broadcast_notification: bool,
    pub supports_disconnected_notification: bool,
    pub readable_without_security: bool,
    pub writable_without_security: bool,
}

/// Capability flags of a characteristic.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CharacteristicProperties {
    pub readable: bool,
    pub writable: bool,
    pub supports_event_notification: bool,
    pub hidden: bool,
    pub requires_timed_write: bool,
    pub supports_authorization_data: bool,
    pub ip: IpProperties,
    pub ble: BleProperties,
}

/// Value constraints for float characteristics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatConstraints {
    pub minimum: f32,
    pub maximum: f32,
    pub step: f32,
}

pub type BoolReadHandler = Arc<dyn Fn(&ReadContext<'_>) -> Result<bool> + Send + Sync>;
pub type BoolWriteHandler = Arc<dyn Fn(&WriteContext<'_>, bool) -> Result<()> + Send + Sync>;
pub type FloatReadHandler = Arc<dyn Fn(&ReadContext<'_>) -> Result<f32> + Send + Sync>;
pub type FloatWriteHandler = Arc<dyn Fn(&WriteContext<'_>, f32) -> Result<()> + Send + Sync>;
pub type StringReadHandler = Arc<dyn Fn(&ReadContext<'_>) -> Result<String> + Send + Sync>;
pub type StringWriteHandler = Arc<dyn Fn(&WriteContext<'_>, &str) -> Result<()> + Send + Sync>;
pub type DataReadHandler = Arc<dyn Fn(&ReadContext<'_>) -> Result<Vec<u8>> + Send + Sync>;
pub type DataWriteHandler = Arc<dyn Fn(&WriteContext<'_>, &[u8]) -> Result<()> + Send + Sync>;

/// A bool characteristic descriptor.
pub struct BoolCharacteristic {
    pub iid: u64,
    pub characteristic_type: HapUuid,
    pub debug_description: &'static str,
    pub properties: CharacteristicProperties,
    pub read_handler: Option<BoolReadHandler>,
    pub write_handler: Option<BoolWriteHandler>,
}

/// A float characteristic descriptor.
pub struct FloatCharacteristic {
    pub iid: u64,
    pub characteristic_type: HapUuid,
    pub debug_description: &'static str,
    pub properties: CharacteristicProperties,
    pub unit: CharacteristicUnit,
    pub constraints: FloatConstraints,
    pub read_handler: Option<FloatReadHandler>,
    pub write_handler: Option<FloatWriteHandler>,
}

/// A string characteristic descriptor.
pub struct StringCharacteristic {
    pub iid: u64,
    pub characteristic_type: HapUuid,
    pub debug_description: &'static str,
    pub properties: CharacteristicProperties,
    pub max_length: usize,
    pub read_handler: Option<StringReadHandler>,
    pub write_handler: Option<StringWriteHandler>,
}

/// An opaque-data characteristic descriptor.
pub struct DataCharacteristic {
    pub iid: u64,
    pub characteristic_type: HapUuid,
    pub debug_description: &'static str,
    pub properties: CharacteristicProperties,
    pub max_length: usize,
    pub read_handler: Option<DataReadHandler>,
    pub write_handler: Option<DataWriteHandler>,
}

/// A characteristic descriptor of any format.
pub enum Characteristic {
    Bool(BoolCharacteristic),
    Float(FloatCharacteristic),
    String(StringCharacteristic),
    Data(DataCharacteristic),
}

impl Characteristic {
    pub fn iid(&self) -> u64 {
        match self {
            Characteristic::Bool(c) => c.iid,
            Characteristic::Float(c) => c.iid,
            Characteristic::String(c) => c.iid,
            Characteristic::Data(c) => c.iid,
        }
    }

    pub fn characteristic_type(&self) -> HapUuid {
        match self {
            Characteristic::Bool(c) => c.characteristic_type,
            Characteristic::Float(c) => c.characteristic_type,
            Characteristic::String(c) => c.characteristic_type,
            Characteristic::Data(c) => c.characteristic_type,
        }
    }

    pub fn debug_description(&self) -> &'static str {
        match self {
            Characteristic::Bool(c) => c.debug_description,
            Characteristic::Float(c) => c.debug_description,
            Characteristic::String(c) => c.debug_description,
            Characteristic::Data(c) => c.debug_description,
        }
    }

    pub fn format(&self) -> CharacteristicFormat {
        match self {
            Characteristic::Bool(_) => CharacteristicFormat::Bool,
            Characteristic::Float(_) => CharacteristicFormat::Float,
            Characteristic::String(_) => CharacteristicFormat::String,
            Characteristic::Data(_) => CharacteristicFormat::Data,
        }
    }

    pub fn properties(&self) -> &CharacteristicProperties {
        match self {
            Characteristic::Bool(c) => &c.properties,
            Characteristic::Float(c) => &c.properties,
            Characteristic::String(c) => &c.properties,
            Characteristic::Data(c) => &c.properties,
        }
    }

    /// Whether a read request can be served: readable and bound to a
    /// read handler.
    pub fn has_read_handler(&self) -> bool {
        match self {
            Characteristic::Bool(c) => c.read_handler.is_some(),
            Characteristic::Float(c) => c.read_handler.is_some(),
            Characteristic::String(c) => c.read_handler.is_some(),
            Characteristic::Data(c) => c.read_handler.is_some(),
        }
    }
}

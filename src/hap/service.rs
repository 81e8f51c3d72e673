//! Service descriptors for the accessory attribute database.

use crate::hap::characteristic::Characteristic;
use crate::hap::uuid::HapUuid;

/// Capability flags of a service.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ServiceProperties {
    pub primary: bool,
    pub hidden: bool,
    /// BLE-transport flag: the service supports the HAP configuration
    /// procedure.
    pub supports_configuration: bool,
}

/// A service descriptor: a typed, ordered group of characteristics.
///
/// Insertion order of `characteristics` defines the enumeration order seen
/// by controllers.
pub struct Service {
    pub iid: u64,
    pub service_type: HapUuid,
    /// User-visible name, populated from configuration at startup.
    pub name: Option<String>,
    pub properties: ServiceProperties,
    /// Instance IDs of linked services.
    pub linked_services: Vec<u64>,
    pub characteristics: Vec<Characteristic>,
}

impl Service {
    pub fn characteristic(&self, iid: u64) -> Option<&Characteristic> {
        self.characteristics.iter().find(|c| c.iid() == iid)
    }
}

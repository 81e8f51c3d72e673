//! HAP type tags.
//!
//! HomeKit assigns services and characteristics short 16-bit types that
//! expand into full 128-bit UUIDs over the Apple-defined base
//! `0000XXXX-0000-1000-8000-0026BB765291`.

use std::fmt;
use uuid::Uuid;

/// The HAP base UUID with the short-type field zeroed.
const HAP_BASE_UUID: u128 = 0x0000_0000_0000_1000_8000_0026_BB76_5291;

/// A HAP service or characteristic type tag.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HapUuid(Uuid);

impl HapUuid {
    /// Expand a 16-bit HomeKit-assigned type into the full 128-bit UUID.
    pub const fn from_short(short: u16) -> Self {
        Self(Uuid::from_u128(HAP_BASE_UUID | ((short as u128) << 96)))
    }

    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// The 16-bit short form, if this UUID lies in the HAP base range.
    pub fn short(&self) -> Option<u16> {
        let value = self.0.as_u128();
        if value & !(0xFFFF_u128 << 96) == HAP_BASE_UUID {
            Some((value >> 96) as u16)
        } else {
            None
        }
    }
}

impl fmt::Debug for HapUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.short() {
            Some(short) => write!(f, "HapUuid({short:#06x})"),
            None => write!(f, "HapUuid({})", self.0),
        }
    }
}

impl fmt::Display for HapUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Characteristic types used by this accessory.
pub mod characteristic {
    use super::HapUuid;

    pub const CURRENT_RELATIVE_HUMIDITY: HapUuid = HapUuid::from_short(0x10);
    pub const CURRENT_TEMPERATURE: HapUuid = HapUuid::from_short(0x11);
    pub const IDENTIFY: HapUuid = HapUuid::from_short(0x14);
    pub const MANUFACTURER: HapUuid = HapUuid::from_short(0x20);
    pub const MODEL: HapUuid = HapUuid::from_short(0x21);
    pub const NAME: HapUuid = HapUuid::from_short(0x23);
    pub const SERIAL_NUMBER: HapUuid = HapUuid::from_short(0x30);
    pub const VERSION: HapUuid = HapUuid::from_short(0x37);
    pub const SERVICE_SIGNATURE: HapUuid = HapUuid::from_short(0x4A);
    pub const FIRMWARE_REVISION: HapUuid = HapUuid::from_short(0x52);
    pub const HARDWARE_REVISION: HapUuid = HapUuid::from_short(0x53);
}

/// Service types used by this accessory.
pub mod service {
    use super::HapUuid;

    pub const ACCESSORY_INFORMATION: HapUuid = HapUuid::from_short(0x3E);
    pub const HUMIDITY_SENSOR: HapUuid = HapUuid::from_short(0x82);
    pub const TEMPERATURE_SENSOR: HapUuid = HapUuid::from_short(0x8A);
    pub const PROTOCOL_INFORMATION: HapUuid = HapUuid::from_short(0xA2);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_form_expansion() {
        let uuid = HapUuid::from_short(0x11);
        assert_eq!(
            uuid.as_uuid().to_string(),
            "00000011-0000-1000-8000-0026bb765291"
        );
        assert_eq!(uuid.short(), Some(0x11));
    }

    #[test]
    fn test_short_rejects_foreign_uuid() {
        let foreign = HapUuid(Uuid::from_u128(0xDEADBEEF));
        assert_eq!(foreign.short(), None);
    }
}

//! HomeKit Accessory Protocol attribute model.
//!
//! Descriptor types for the accessory attribute database plus the seams to
//! the external accessory server. The protocol engine itself (pairing,
//! session security, transports) is not part of this crate.

pub mod accessory;
pub mod characteristic;
pub mod server;
pub mod service;
pub mod uuid;

pub use self::accessory::{Accessory, AccessoryCategory, IdentifyHandler};
pub use self::characteristic::{Characteristic, CharacteristicFormat, CharacteristicProperties};
pub use self::server::{EventRaiser, ReadContext, ServerState, WriteContext};
pub use self::service::{Service, ServiceProperties};
pub use self::uuid::HapUuid;

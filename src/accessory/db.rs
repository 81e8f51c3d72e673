//! The accessory attribute database.
//!
//! Declares every exposed service and characteristic: the Accessory
//! Information and Protocol Information services, then the Temperature
//! Sensor (primary) and Humidity Sensor services.
//!
//! Instance IDs are allocated in per-service blocks so new
//! characteristics can be appended without renumbering existing ones.
//! Paired controllers cache these IDs; once a device has shipped they
//! must never change.

use crate::config::{AccessoryInfoConfig, Config};
use crate::hap::accessory::{Accessory, AccessoryCategory, IdentifyHandler};
use crate::hap::characteristic::{
    BoolCharacteristic, Characteristic, CharacteristicProperties, CharacteristicUnit,
    DataCharacteristic, FloatCharacteristic, FloatConstraints, FloatReadHandler, IpProperties,
    StringCharacteristic,
};
use crate::hap::server::{IdentifyRequest, service_signature_read};
use crate::hap::service::{Service, ServiceProperties};
use crate::hap::uuid::{HapUuid, characteristic, service};
use std::sync::Arc;
use strum::FromRepr;

/// HAP protocol version exposed by the Protocol Information service.
pub const PROTOCOL_VERSION: &str = "1.1.0";

/// Instance IDs for every service and characteristic of the accessory,
/// partitioned in per-service blocks.
#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr)]
#[repr(u64)]
pub enum Iid {
    AccessoryInformation = 0x01,
    AccessoryInformationIdentify = 0x02,
    AccessoryInformationManufacturer = 0x03,
    AccessoryInformationModel = 0x04,
    AccessoryInformationName = 0x05,
    AccessoryInformationSerialNumber = 0x06,
    AccessoryInformationFirmwareRevision = 0x07,
    AccessoryInformationHardwareRevision = 0x08,

    ProtocolInformation = 0x10,
    ProtocolInformationServiceSignature = 0x11,
    ProtocolInformationVersion = 0x12,

    TemperatureSensor = 0x40,
    TemperatureSensorServiceSignature = 0x41,
    TemperatureSensorName = 0x42,
    TemperatureSensorCurrentTemperature = 0x43,

    HumiditySensor = 0x50,
    HumiditySensorServiceSignature = 0x51,
    HumiditySensorName = 0x52,
    HumiditySensorCurrentRelativeHumidity = 0x53,
}

/// The 'Service Signature' characteristic shared by signature-bearing
/// services. Read-only opaque data served by the generic framework
/// callback.
fn service_signature_characteristic(iid: Iid) -> Characteristic {
    Characteristic::Data(DataCharacteristic {
        iid: iid as u64,
        characteristic_type: characteristic::SERVICE_SIGNATURE,
        debug_description: "service-signature",
        properties: CharacteristicProperties {
            readable: true,
            ip: IpProperties {
                control_point: true,
                ..Default::default()
            },
            ..Default::default()
        },
        max_length: 2097152,
        read_handler: Some(service_signature_read()),
        write_handler: None,
    })
}

/// A read-only 'Name' characteristic serving a fixed string.
fn name_characteristic(iid: Iid, name: &str) -> Characteristic {
    static_string_characteristic(iid, characteristic::NAME, "name", name)
}

fn static_string_characteristic(
    iid: Iid,
    characteristic_type: HapUuid,
    debug_description: &'static str,
    value: &str,
) -> Characteristic {
    let value = value.to_string();
    Characteristic::String(StringCharacteristic {
        iid: iid as u64,
        characteristic_type,
        debug_description,
        properties: CharacteristicProperties {
            readable: true,
            ..Default::default()
        },
        max_length: 64,
        read_handler: Some(Arc::new(move |_ctx| Ok(value.clone()))),
        write_handler: None,
    })
}

/// The Accessory Information service: identify plus the identification
/// strings populated from configuration at startup.
pub fn accessory_information_service(
    info: &AccessoryInfoConfig,
    identify: IdentifyHandler,
) -> Service {
    let identify_characteristic = Characteristic::Bool(BoolCharacteristic {
        iid: Iid::AccessoryInformationIdentify as u64,
        characteristic_type: characteristic::IDENTIFY,
        debug_description: "identify",
        properties: CharacteristicProperties {
            writable: true,
            ..Default::default()
        },
        read_handler: None,
        write_handler: Some(Arc::new(move |ctx, value| {
            if value {
                identify(&IdentifyRequest { aid: ctx.aid })?;
            }
            Ok(())
        })),
    });

    Service {
        iid: Iid::AccessoryInformation as u64,
        service_type: service::ACCESSORY_INFORMATION,
        name: None,
        properties: ServiceProperties::default(),
        linked_services: Vec::new(),
        characteristics: vec![
            identify_characteristic,
            static_string_characteristic(
                Iid::AccessoryInformationManufacturer,
                characteristic::MANUFACTURER,
                "manufacturer",
                &info.manufacturer,
            ),
            static_string_characteristic(
                Iid::AccessoryInformationModel,
                characteristic::MODEL,
                "model",
                &info.model,
            ),
            name_characteristic(Iid::AccessoryInformationName, &info.name),
            static_string_characteristic(
                Iid::AccessoryInformationSerialNumber,
                characteristic::SERIAL_NUMBER,
                "serial-number",
                &info.serial_number,
            ),
            static_string_characteristic(
                Iid::AccessoryInformationFirmwareRevision,
                characteristic::FIRMWARE_REVISION,
                "firmware.revision",
                &info.firmware_version,
            ),
            static_string_characteristic(
                Iid::AccessoryInformationHardwareRevision,
                characteristic::HARDWARE_REVISION,
                "hardware.revision",
                &info.hardware_version,
            ),
        ],
    }
}

/// The Protocol Information service.
pub fn protocol_information_service() -> Service {
    Service {
        iid: Iid::ProtocolInformation as u64,
        service_type: service::PROTOCOL_INFORMATION,
        name: None,
        properties: ServiceProperties {
            supports_configuration: true,
            ..Default::default()
        },
        linked_services: Vec::new(),
        characteristics: vec![
            service_signature_characteristic(Iid::ProtocolInformationServiceSignature),
            static_string_characteristic(
                Iid::ProtocolInformationVersion,
                characteristic::VERSION,
                "version",
                PROTOCOL_VERSION,
            ),
        ],
    }
}

/// The Temperature Sensor service that contains the 'Current Temperature'
/// characteristic. Primary service of the accessory.
pub fn temperature_sensor_service(name: &str, read_handler: FloatReadHandler) -> Service {
    Service {
        iid: Iid::TemperatureSensor as u64,
        service_type: service::TEMPERATURE_SENSOR,
        name: Some(name.to_string()),
        properties: ServiceProperties {
            primary: true,
            ..Default::default()
        },
        linked_services: Vec::new(),
        characteristics: vec![
            service_signature_characteristic(Iid::TemperatureSensorServiceSignature),
            name_characteristic(Iid::TemperatureSensorName, name),
            Characteristic::Float(FloatCharacteristic {
                iid: Iid::TemperatureSensorCurrentTemperature as u64,
                characteristic_type: characteristic::CURRENT_TEMPERATURE,
                debug_description: "current-temperature",
                properties: CharacteristicProperties {
                    readable: true,
                    supports_event_notification: true,
                    ..Default::default()
                },
                unit: CharacteristicUnit::Celsius,
                constraints: FloatConstraints {
                    minimum: 0.0,
                    maximum: 100.0,
                    step: 0.1,
                },
                read_handler: Some(read_handler),
                write_handler: None,
            }),
        ],
    }
}

/// The Humidity Sensor service that contains the 'Current Relative
/// Humidity' characteristic.
pub fn humidity_sensor_service(name: &str, read_handler: FloatReadHandler) -> Service {
    Service {
        iid: Iid::HumiditySensor as u64,
        service_type: service::HUMIDITY_SENSOR,
        name: Some(name.to_string()),
        properties: ServiceProperties::default(),
        linked_services: Vec::new(),
        characteristics: vec![
            service_signature_characteristic(Iid::HumiditySensorServiceSignature),
            name_characteristic(Iid::HumiditySensorName, name),
            Characteristic::Float(FloatCharacteristic {
                iid: Iid::HumiditySensorCurrentRelativeHumidity as u64,
                characteristic_type: characteristic::CURRENT_RELATIVE_HUMIDITY,
                debug_description: "current-relative-humidity",
                properties: CharacteristicProperties {
                    readable: true,
                    supports_event_notification: true,
                    ..Default::default()
                },
                unit: CharacteristicUnit::Percentage,
                constraints: FloatConstraints {
                    minimum: 0.0,
                    maximum: 100.0,
                    step: 1.0,
                },
                read_handler: Some(read_handler),
                write_handler: None,
            }),
        ],
    }
}

/// Build the complete accessory record (aid 1, Sensors category).
pub fn accessory(
    config: &Config,
    temperature_read: FloatReadHandler,
    humidity_read: FloatReadHandler,
    identify: IdentifyHandler,
) -> Accessory {
    Accessory {
        aid: 1,
        category: AccessoryCategory::Sensors,
        name: config.accessory.name.clone(),
        manufacturer: config.accessory.manufacturer.clone(),
        model: config.accessory.model.clone(),
        serial_number: config.accessory.serial_number.clone(),
        firmware_version: config.accessory.firmware_version.clone(),
        hardware_version: config.accessory.hardware_version.clone(),
        services: vec![
            accessory_information_service(&config.accessory, identify.clone()),
            protocol_information_service(),
            temperature_sensor_service(&config.sensor.temperature_service_name, temperature_read),
            humidity_sensor_service(&config.sensor.humidity_service_name, humidity_read),
        ],
        identify_handler: identify,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hap::server::EventRaiser;
    use std::collections::HashSet;

    struct NullRaiser;

    impl EventRaiser for NullRaiser {
        fn raise_event(&self, _aid: u64, _service_iid: u64, _characteristic_iid: u64) {}
    }

    fn test_accessory() -> Accessory {
        accessory(
            &Config::default(),
            Arc::new(|_ctx| Ok(21.0)),
            Arc::new(|_ctx| Ok(45.0)),
            Arc::new(|_request| Ok(())),
        )
    }

    #[test]
    fn test_database_validates() {
        test_accessory().validate().unwrap();
    }

    #[test]
    fn test_instance_ids_globally_unique() {
        let accessory = test_accessory();
        let mut seen = HashSet::new();
        for service in &accessory.services {
            assert!(seen.insert(service.iid), "duplicate iid {:#06x}", service.iid);
            for characteristic in &service.characteristics {
                let iid = characteristic.iid();
                assert!(seen.insert(iid), "duplicate iid {iid:#06x}");
            }
        }
    }

    #[test]
    fn test_sensor_service_enumeration_order() {
        let accessory = test_accessory();
        let service = accessory.service(Iid::TemperatureSensor as u64).unwrap();
        let iids: Vec<u64> = service.characteristics.iter().map(|c| c.iid()).collect();
        assert_eq!(
            iids,
            vec![
                Iid::TemperatureSensorServiceSignature as u64,
                Iid::TemperatureSensorName as u64,
                Iid::TemperatureSensorCurrentTemperature as u64,
            ]
        );
    }

    #[test]
    fn test_temperature_service_is_the_only_primary() {
        let accessory = test_accessory();
        let primaries: Vec<u64> = accessory
            .services
            .iter()
            .filter(|s| s.properties.primary)
            .map(|s| s.iid)
            .collect();
        assert_eq!(primaries, vec![Iid::TemperatureSensor as u64]);
    }

    #[test]
    fn test_name_characteristics_serve_configured_names() {
        let accessory = test_accessory();
        let name = accessory
            .read_string(
                Iid::HumiditySensor as u64,
                Iid::HumiditySensorName as u64,
                &NullRaiser,
            )
            .unwrap();
        assert_eq!(name, "Humidity Sensor");
    }

    #[test]
    fn test_identify_write_dispatches_to_identify_handler() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        let accessory = accessory(
            &Config::default(),
            Arc::new(|_ctx| Ok(21.0)),
            Arc::new(|_ctx| Ok(45.0)),
            Arc::new(move |_request| {
                count_clone.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        );

        accessory
            .write_bool(
                Iid::AccessoryInformation as u64,
                Iid::AccessoryInformationIdentify as u64,
                true,
                &NullRaiser,
            )
            .unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // Writing false does not trigger identify
        accessory
            .write_bool(
                Iid::AccessoryInformation as u64,
                Iid::AccessoryInformationIdentify as u64,
                false,
                &NullRaiser,
            )
            .unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_protocol_version_characteristic() {
        let accessory = test_accessory();
        let version = accessory
            .read_string(
                Iid::ProtocolInformation as u64,
                Iid::ProtocolInformationVersion as u64,
                &NullRaiser,
            )
            .unwrap();
        assert_eq!(version, PROTOCOL_VERSION);
    }

    #[test]
    fn test_service_signature_is_opaque_and_control_point() {
        let accessory = test_accessory();
        let service = accessory.service(Iid::TemperatureSensor as u64).unwrap();
        let characteristic = service
            .characteristic(Iid::TemperatureSensorServiceSignature as u64)
            .unwrap();
        assert!(characteristic.properties().ip.control_point);
        let signature = accessory
            .read_data(
                Iid::TemperatureSensor as u64,
                Iid::TemperatureSensorServiceSignature as u64,
                &NullRaiser,
            )
            .unwrap();
        assert!(signature.is_empty());
    }
}

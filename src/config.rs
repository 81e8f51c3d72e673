use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Load environment variables from .env file with robust parsing.
/// Handles values with spaces without requiring quotes.
pub fn load_dotenv() {
    let env_path = Path::new(".env");
    if !env_path.exists() {
        return;
    }

    let content = match fs::read_to_string(env_path) {
        Ok(c) => c,
        Err(_) => return,
    };

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(eq_pos) = line.find('=') {
            let key = line[..eq_pos].trim();
            let mut value = line[eq_pos + 1..].trim();

            if (value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\''))
            {
                value = &value[1..value.len() - 1];
            }

            // Only set if not already set (env vars take precedence)
            if std::env::var(key).is_err() {
                // SAFETY: We're single-threaded at this point (called before any async runtime)
                unsafe { std::env::set_var(key, value) };
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub accessory: AccessoryInfoConfig,
    pub sensor: SensorConfig,
}

/// Identification strings exposed through the Accessory Information
/// service. Serial number and firmware version are device-provisioned in
/// production; the defaults cover development setups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessoryInfoConfig {
    pub name: String,
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
    pub firmware_version: String,
    pub hardware_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// User-visible name of the temperature sensor service.
    pub temperature_service_name: String,
    /// User-visible name of the humidity sensor service.
    pub humidity_service_name: String,
    /// GPIO pin driving the status LED used as fault indicator.
    pub fault_pin: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            accessory: AccessoryInfoConfig {
                name: "Climate Sensor".to_string(),
                manufacturer: "OpenClimate".to_string(),
                model: "CLS-100".to_string(),
                serial_number: "CLS-001".to_string(),
                firmware_version: "1.0".to_string(),
                hardware_version: "1".to_string(),
            },
            sensor: SensorConfig {
                temperature_service_name: "Temperature Sensor".to_string(),
                humidity_service_name: "Humidity Sensor".to_string(),
                fault_pin: 13,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(name) = std::env::var("ACCESSORY_NAME") {
            config.accessory.name = name;
        }
        if let Ok(manufacturer) = std::env::var("ACCESSORY_MANUFACTURER") {
            config.accessory.manufacturer = manufacturer;
        }
        if let Ok(model) = std::env::var("ACCESSORY_MODEL") {
            config.accessory.model = model;
        }
        if let Ok(serial) = std::env::var("ACCESSORY_SERIAL_NUMBER") {
            config.accessory.serial_number = serial;
        }
        if let Ok(firmware) = std::env::var("ACCESSORY_FIRMWARE_VERSION") {
            config.accessory.firmware_version = firmware;
        }
        if let Ok(hardware) = std::env::var("ACCESSORY_HARDWARE_VERSION") {
            config.accessory.hardware_version = hardware;
        }
        if let Ok(name) = std::env::var("TEMPERATURE_SENSOR_NAME") {
            config.sensor.temperature_service_name = name;
        }
        if let Ok(name) = std::env::var("HUMIDITY_SENSOR_NAME") {
            config.sensor.humidity_service_name = name;
        }
        if let Ok(pin) = std::env::var("SENSOR_FAULT_PIN")
            && let Ok(p) = pin.parse()
        {
            config.sensor.fault_pin = p;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.accessory.name, "Climate Sensor");
        assert_eq!(config.sensor.fault_pin, 13);
    }

    #[test]
    fn test_env_override() {
        unsafe { std::env::set_var("ACCESSORY_SERIAL_NUMBER", "CLS-TEST-42") };
        let config = Config::from_env();
        assert_eq!(config.accessory.serial_number, "CLS-TEST-42");
        unsafe { std::env::remove_var("ACCESSORY_SERIAL_NUMBER") };
    }
}

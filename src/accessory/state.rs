//! Persisted accessory state.
//!
//! A single fixed-size record lives under a reserved slot of the
//! key-value store. The on-disk size must exactly equal the record size;
//! any mismatch (format drift, corruption) resets to the zero default
//! rather than attempting partial recovery.

use crate::error::Result;
use crate::store::KeyValueStore;
use log::warn;
use std::sync::Arc;

/// Key-value-store domain for application data. Purged on factory reset.
pub const STATE_DOMAIN: u8 = 0x00;

/// Key for the configuration state record. Purged on factory reset.
pub const STATE_KEY: u8 = 0x00;

/// State persisted across reboots, written verbatim as a little-endian
/// blob.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AccessoryState {
    /// Last temperature reading pushed to controllers.
    pub current_temperature: f32,
}

impl AccessoryState {
    /// Size of the serialized record. Changing the record layout changes
    /// this, which invalidates stored blobs and resets them on next load.
    pub const ENCODED_LEN: usize = 4;

    pub fn to_bytes(&self) -> [u8; Self::ENCODED_LEN] {
        self.current_temperature.to_le_bytes()
    }

    pub fn from_bytes(bytes: [u8; Self::ENCODED_LEN]) -> Self {
        Self {
            current_temperature: f32::from_le_bytes(bytes),
        }
    }
}

/// Owns the persisted state record and its key-value-store slot.
pub struct StateManager {
    store: Arc<dyn KeyValueStore>,
    state: AccessoryState,
}

impl StateManager {
    /// Load the state record from the store.
    ///
    /// A store-level failure is unrecoverable and propagates to the
    /// caller. An absent blob yields the zero default; a blob of the
    /// wrong size logs a warning and also yields the zero default. After
    /// this returns the record is always well-defined.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let mut buf = [0u8; AccessoryState::ENCODED_LEN];
        let state = match store.get(STATE_DOMAIN, STATE_KEY, &mut buf)? {
            Some(len) if len == AccessoryState::ENCODED_LEN => AccessoryState::from_bytes(buf),
            Some(len) => {
                warn!(
                    "unexpected accessory state in key-value store ({len} bytes, expected {}), resetting to default",
                    AccessoryState::ENCODED_LEN
                );
                AccessoryState::default()
            }
            None => AccessoryState::default(),
        };
        Ok(Self { store, state })
    }

    pub fn state(&self) -> AccessoryState {
        self.state
    }

    pub fn set_current_temperature(&mut self, celsius: f32) {
        self.state.current_temperature = celsius;
    }

    /// Persist the record verbatim to its slot.
    ///
    /// Not wired into the read path: reads always sample the sensor, so
    /// the cached reading is telemetry only. A store-level failure is
    /// unrecoverable and propagates to the caller.
    pub fn save(&self) -> Result<()> {
        self.store
            .set(STATE_DOMAIN, STATE_KEY, &self.state.to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AccessoryError;
    use crate::store::MemoryKeyValueStore;

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _domain: u8, _key: u8, _buf: &mut [u8]) -> Result<Option<usize>> {
            Err(AccessoryError::Store("flash unreachable".to_string()))
        }

        fn set(&self, _domain: u8, _key: u8, _value: &[u8]) -> Result<()> {
            Err(AccessoryError::Store("flash unreachable".to_string()))
        }

        fn purge_domain(&self, _domain: u8) -> Result<()> {
            Err(AccessoryError::Store("flash unreachable".to_string()))
        }
    }

    #[test]
    fn test_load_absent_yields_zero_default() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let manager = StateManager::load(store).unwrap();
        assert_eq!(manager.state().current_temperature, 0.0);
    }

    #[test]
    fn test_load_exact_size_blob_verbatim() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store
            .set(STATE_DOMAIN, STATE_KEY, &23.5f32.to_le_bytes())
            .unwrap();

        let manager = StateManager::load(store).unwrap();
        assert_eq!(manager.state().current_temperature, 23.5);
    }

    #[test]
    fn test_load_wrong_size_resets_to_default() {
        for blob in [&[][..], &[1u8][..], &[1, 2, 3, 4, 5][..]] {
            let store = Arc::new(MemoryKeyValueStore::new());
            store.set(STATE_DOMAIN, STATE_KEY, blob).unwrap();

            let manager = StateManager::load(store).unwrap();
            assert_eq!(manager.state().current_temperature, 0.0);
        }
    }

    #[test]
    fn test_save_round_trip() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut manager = StateManager::load(store.clone()).unwrap();
        manager.set_current_temperature(-12.25);
        manager.save().unwrap();

        let reloaded = StateManager::load(store).unwrap();
        assert_eq!(reloaded.state().current_temperature, -12.25);
    }

    #[test]
    fn test_store_failure_propagates() {
        assert!(StateManager::load(Arc::new(FailingStore)).is_err());
    }
}

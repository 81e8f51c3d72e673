//! In-memory key-value store.

use super::KeyValueStore;
use crate::error::Result;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Volatile store backed by a map. Used by tests and development setups
/// that do not need persistence.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<BTreeMap<(u8, u8), Vec<u8>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, domain: u8, key: u8, buf: &mut [u8]) -> Result<Option<usize>> {
        let entries = self.entries.read();
        let Some(value) = entries.get(&(domain, key)) else {
            return Ok(None);
        };
        let copied = value.len().min(buf.len());
        buf[..copied].copy_from_slice(&value[..copied]);
        Ok(Some(value.len()))
    }

    fn set(&self, domain: u8, key: u8, value: &[u8]) -> Result<()> {
        self.entries.write().insert((domain, key), value.to_vec());
        Ok(())
    }

    fn purge_domain(&self, domain: u8) -> Result<()> {
        self.entries.write().retain(|(d, _), _| *d != domain);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_absent_returns_none() {
        let store = MemoryKeyValueStore::new();
        let mut buf = [0u8; 4];
        assert!(store.get(0x00, 0x00, &mut buf).unwrap().is_none());
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let store = MemoryKeyValueStore::new();
        store.set(0x00, 0x01, &[1, 2, 3, 4]).unwrap();

        let mut buf = [0u8; 4];
        let len = store.get(0x00, 0x01, &mut buf).unwrap();
        assert_eq!(len, Some(4));
        assert_eq!(buf, [1, 2, 3, 4]);
    }

    #[test]
    fn test_get_reports_full_length_on_short_buffer() {
        let store = MemoryKeyValueStore::new();
        store.set(0x00, 0x01, &[1, 2, 3, 4, 5, 6]).unwrap();

        let mut buf = [0u8; 4];
        let len = store.get(0x00, 0x01, &mut buf).unwrap();
        assert_eq!(len, Some(6));
        assert_eq!(buf, [1, 2, 3, 4]);
    }

    #[test]
    fn test_purge_domain_only_clears_that_domain() {
        let store = MemoryKeyValueStore::new();
        store.set(0x00, 0x00, &[1]).unwrap();
        store.set(0x00, 0x01, &[2]).unwrap();
        store.set(0x01, 0x00, &[3]).unwrap();

        store.purge_domain(0x00).unwrap();

        let mut buf = [0u8; 1];
        assert!(store.get(0x00, 0x00, &mut buf).unwrap().is_none());
        assert!(store.get(0x00, 0x01, &mut buf).unwrap().is_none());
        assert_eq!(store.get(0x01, 0x00, &mut buf).unwrap(), Some(1));
    }
}

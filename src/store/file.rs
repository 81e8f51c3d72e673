//! File-backed key-value store.
//!
//! Blobs are kept in a single JSON file, keyed by the hex-encoded
//! domain/key pair. The whole map is rewritten on every mutation; the
//! stored blobs are a few bytes, so this stays cheap.

use super::KeyValueStore;
use crate::error::Result;
use log::info;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    entries: BTreeMap<String, Vec<u8>>,
}

/// Persistent store backed by a JSON file.
pub struct FileKeyValueStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl FileKeyValueStore {
    /// Open the store at `path`, loading existing entries.
    ///
    /// A missing file is a first boot and yields an empty store. An
    /// unreadable or unparsable file is a store-level failure, which is
    /// unrecoverable for this device class.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) => {
                let file: StoreFile = serde_json::from_slice(&bytes)?;
                info!(
                    "loaded {} stored entries from {}",
                    file.entries.len(),
                    path.display()
                );
                file.entries
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("no store file at {} (first boot)", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    fn entry_key(domain: u8, key: u8) -> String {
        format!("{domain:02x}.{key:02x}")
    }

    fn write_out(&self, entries: &BTreeMap<String, Vec<u8>>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(&StoreFile {
            entries: entries.clone(),
        })?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, domain: u8, key: u8, buf: &mut [u8]) -> Result<Option<usize>> {
        let entries = self.entries.read();
        let Some(value) = entries.get(&Self::entry_key(domain, key)) else {
            return Ok(None);
        };
        let copied = value.len().min(buf.len());
        buf[..copied].copy_from_slice(&value[..copied]);
        Ok(Some(value.len()))
    }

    fn set(&self, domain: u8, key: u8, value: &[u8]) -> Result<()> {
        let mut entries = self.entries.write();
        entries.insert(Self::entry_key(domain, key), value.to_vec());
        self.write_out(&entries)
    }

    fn purge_domain(&self, domain: u8) -> Result<()> {
        let prefix = format!("{domain:02x}.");
        let mut entries = self.entries.write();
        entries.retain(|k, _| !k.starts_with(&prefix));
        self.write_out(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_path(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "hap-climate-sensor-test-{tag}-{}-{nanos}.json",
            std::process::id()
        ))
    }

    #[test]
    fn test_open_missing_file_yields_empty_store() {
        let path = scratch_path("missing");
        let store = FileKeyValueStore::open(&path).unwrap();
        let mut buf = [0u8; 4];
        assert!(store.get(0x00, 0x00, &mut buf).unwrap().is_none());
    }

    #[test]
    fn test_entries_survive_reopen() {
        let path = scratch_path("reopen");
        {
            let store = FileKeyValueStore::open(&path).unwrap();
            store.set(0x00, 0x00, &[0x41, 0x42, 0x43, 0x44]).unwrap();
        }

        let store = FileKeyValueStore::open(&path).unwrap();
        let mut buf = [0u8; 4];
        assert_eq!(store.get(0x00, 0x00, &mut buf).unwrap(), Some(4));
        assert_eq!(buf, [0x41, 0x42, 0x43, 0x44]);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = scratch_path("corrupt");
        fs::write(&path, b"not json").unwrap();

        assert!(FileKeyValueStore::open(&path).is_err());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_purge_domain_persists() {
        let path = scratch_path("purge");
        {
            let store = FileKeyValueStore::open(&path).unwrap();
            store.set(0x00, 0x00, &[1]).unwrap();
            store.set(0x01, 0x00, &[2]).unwrap();
            store.purge_domain(0x00).unwrap();
        }

        let store = FileKeyValueStore::open(&path).unwrap();
        let mut buf = [0u8; 1];
        assert!(store.get(0x00, 0x00, &mut buf).unwrap().is_none());
        assert_eq!(store.get(0x01, 0x00, &mut buf).unwrap(), Some(1));

        let _ = fs::remove_file(&path);
    }
}

//! Binary file form of a container.

use std::fs;
use std::path::Path;

use crate::mem::MemStore;
use crate::{StoreError, StoreResult};

const MAGIC: &[u8; 4] = b"LWRK";
const FORMAT_VERSION: u8 = 1;

/// Write the container to `path`, replacing any existing file.
pub fn save(store: &MemStore, path: &Path) -> StoreResult<()> {
    let body = bincode::serialize(store).map_err(|e| StoreError::Encode(e.to_string()))?;
    let mut bytes = Vec::with_capacity(MAGIC.len() + 1 + body.len());
    bytes.extend_from_slice(MAGIC);
    bytes.push(FORMAT_VERSION);
    bytes.extend_from_slice(&body);
    fs::write(path, bytes)?;
    Ok(())
}

/// Read a container back from `path`.
pub fn load(path: &Path) -> StoreResult<MemStore> {
    let bytes = fs::read(path)?;
    if bytes.len() < MAGIC.len() + 1 || &bytes[..MAGIC.len()] != MAGIC {
        return Err(StoreError::BadMagic);
    }
    let version = bytes[MAGIC.len()];
    if version != FORMAT_VERSION {
        return Err(StoreError::UnsupportedVersion { found: version });
    }
    bincode::deserialize(&bytes[MAGIC.len() + 1..]).map_err(|e| StoreError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Container;
    use crate::tree::Dataset;

    #[test]
    fn file_round_trip() {
        let mut store = MemStore::new();
        let root = store.root();
        let group = store.create_group(root, "Reactor 1").unwrap();
        store.write_str_attr(group, "tag", "Reactor").unwrap();
        store
            .write_dataset(group, "Units Table", Dataset::StringVector(vec!["K".into()]))
            .unwrap();
        store.close_group(group);

        let path = std::env::temp_dir().join("lwr_store_roundtrip.lwrk");
        save(&store, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(store, loaded);
    }

    #[test]
    fn bad_magic_is_rejected() {
        let path = std::env::temp_dir().join("lwr_store_bad_magic.lwrk");
        std::fs::write(&path, b"NOPE\x01").unwrap();
        assert!(matches!(load(&path), Err(StoreError::BadMagic)));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let store = MemStore::new();
        let path = std::env::temp_dir().join("lwr_store_bad_version.lwrk");
        save(&store, &path).unwrap();

        let mut bytes = std::fs::read(&path).unwrap();
        bytes[4] = 99;
        std::fs::write(&path, bytes).unwrap();

        assert!(matches!(
            load(&path),
            Err(StoreError::UnsupportedVersion { found: 99 })
        ));
    }
}

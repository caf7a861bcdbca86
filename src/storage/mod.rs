//! Host config-store contract and the persisted key layout.
//!
//! This module defines the contract for the host's namespaced key-value
//! configuration storage. The actual persistence (a plugin config group, a
//! settings file, a database) is implemented by the application; the core
//! provides the key layout, JSON encoding, and merge semantics so that:
//!
//! 1. **Wire compatibility:** keys and encoded values match what existing
//!    clients already persist (`groupJoinCode`, `groupmembers`,
//!    `region_<id>` lists).
//! 2. **Validate-before-write:** merging remote tiles never partially
//!    mutates the store — every affected local region is parsed first, and
//!    a malformed one aborts the whole merge with zero writes.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::group::GroupMember;
use crate::tiles::{merge, RegionTileSet, TileMarker};

// ---------------------------------------------------------------------------
// Key layout
// ---------------------------------------------------------------------------

/// Prefix of per-region tile list keys. The region keys carried inside a
/// [`RegionTileSet`] are these full prefixed keys (e.g. `region_12850`).
pub const REGION_PREFIX: &str = "region_";

/// Key holding the group join code. Empty or absent means "not in a group".
pub const JOIN_CODE_KEY: &str = "groupJoinCode";

/// Key holding the JSON-encoded group member list.
pub const MEMBERS_KEY: &str = "groupmembers";

/// The persisted key for a numeric region id.
pub fn region_key(region_id: i32) -> String {
    format!("{REGION_PREFIX}{region_id}")
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Stored value under '{key}' is not a valid payload: {reason}")]
    InvalidPayload { key: String, reason: String },

    #[error("Failed to encode value for '{key}': {reason}")]
    Encode { key: String, reason: String },
}

// ---------------------------------------------------------------------------
// Config store contract (host implements)
// ---------------------------------------------------------------------------

/// Namespaced key-value configuration storage contract.
///
/// The host implements this over whatever persistence it owns. Values are
/// plain strings; everything structured goes through JSON via the helpers
/// below. Implementations do not need to be thread-safe — all access is
/// serialized by the owning thread (see the crate-level threading contract).
pub trait ConfigStore {
    /// Read a value. `None` if the key was never written.
    fn get(&self, key: &str) -> Option<String>;

    /// Write (insert or overwrite) a value.
    fn set(&mut self, key: &str, value: &str);

    /// Delete a key. Deleting an absent key is a no-op.
    fn remove(&mut self, key: &str);

    /// All keys starting with `prefix`, in unspecified order.
    fn keys_with_prefix(&self, prefix: &str) -> Vec<String>;
}

/// In-memory [`ConfigStore`] — used by the test suites and by hosts without
/// their own configuration system.
#[derive(Default, Clone, Debug)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Region tile persistence
// ---------------------------------------------------------------------------

/// Load one region's tile list. Absent or empty values read as an empty list.
pub fn load_region(store: &dyn ConfigStore, key: &str) -> Result<Vec<TileMarker>, StorageError> {
    match store.get(key) {
        Some(json) if !json.is_empty() => {
            serde_json::from_str(&json).map_err(|e| StorageError::InvalidPayload {
                key: key.to_owned(),
                reason: e.to_string(),
            })
        }
        _ => Ok(Vec::new()),
    }
}

/// Persist one region's tile list.
pub fn save_region(
    store: &mut dyn ConfigStore,
    key: &str,
    markers: &[TileMarker],
) -> Result<(), StorageError> {
    let json = serde_json::to_string(markers).map_err(|e| StorageError::Encode {
        key: key.to_owned(),
        reason: e.to_string(),
    })?;
    store.set(key, &json);
    Ok(())
}

/// Load every persisted region into a [`RegionTileSet`]. Empty regions are
/// skipped.
pub fn load_all_regions(store: &dyn ConfigStore) -> Result<RegionTileSet, StorageError> {
    let mut out = RegionTileSet::new();
    for key in store.keys_with_prefix(REGION_PREFIX) {
        let markers = load_region(store, &key)?;
        if !markers.is_empty() {
            out.insert(key, markers);
        }
    }
    Ok(out)
}

/// Merge a remote region tile set into the store.
///
/// Read phase first: every local region touched by `remote` is loaded and
/// parsed before a single write happens, so a malformed stored value aborts
/// with [`StorageError::InvalidPayload`] and the store unchanged.
pub fn merge_remote(
    store: &mut dyn ConfigStore,
    remote: &RegionTileSet,
) -> Result<(), StorageError> {
    let mut local = RegionTileSet::new();
    for key in remote.keys() {
        let markers = load_region(store, key)?;
        if !markers.is_empty() {
            local.insert(key.clone(), markers);
        }
    }

    let merged = merge(&local, remote);
    for (key, markers) in &merged {
        save_region(store, key, markers)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Join code and member list
// ---------------------------------------------------------------------------

/// The persisted join code, if any. An empty string reads as `None` — the
/// key is cleared by writing `""`, and older clients persist exactly that.
pub fn load_join_code(store: &dyn ConfigStore) -> Option<String> {
    store.get(JOIN_CODE_KEY).filter(|code| !code.is_empty())
}

pub fn save_join_code(store: &mut dyn ConfigStore, code: &str) {
    store.set(JOIN_CODE_KEY, code);
}

/// Clear the join code by writing an empty string, matching what existing
/// clients expect to find after a leave.
pub fn clear_join_code(store: &mut dyn ConfigStore) {
    store.set(JOIN_CODE_KEY, "");
}

/// Cached group member list. Absent or empty values read as an empty list.
pub fn load_members(store: &dyn ConfigStore) -> Result<Vec<GroupMember>, StorageError> {
    match store.get(MEMBERS_KEY) {
        Some(json) if !json.is_empty() => {
            serde_json::from_str(&json).map_err(|e| StorageError::InvalidPayload {
                key: MEMBERS_KEY.to_owned(),
                reason: e.to_string(),
            })
        }
        _ => Ok(Vec::new()),
    }
}

pub fn save_members(
    store: &mut dyn ConfigStore,
    members: &[GroupMember],
) -> Result<(), StorageError> {
    let json = serde_json::to_string(members).map_err(|e| StorageError::Encode {
        key: MEMBERS_KEY.to_owned(),
        reason: e.to_string(),
    })?;
    store.set(MEMBERS_KEY, &json);
    Ok(())
}

pub fn clear_members(store: &mut dyn ConfigStore) {
    store.remove(MEMBERS_KEY);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(x: i32, y: i32, player: &str) -> TileMarker {
        TileMarker::new(12850, x, y, 0, player)
    }

    #[test]
    fn test_region_key_format() {
        assert_eq!(region_key(12850), "region_12850");
    }

    #[test]
    fn test_region_round_trip() {
        let mut store = MemoryStore::new();
        let markers = vec![tile(1, 1, "P"), tile(2, 2, "Q")];

        save_region(&mut store, "region_12850", &markers).unwrap();
        let loaded = load_region(&store, "region_12850").unwrap();
        assert_eq!(loaded, markers);
    }

    #[test]
    fn test_absent_region_reads_empty() {
        let store = MemoryStore::new();
        assert!(load_region(&store, "region_12850").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_region_is_invalid_payload() {
        let mut store = MemoryStore::new();
        store.set("region_12850", "{not json");

        let err = load_region(&store, "region_12850").unwrap_err();
        assert!(matches!(err, StorageError::InvalidPayload { .. }));
    }

    #[test]
    fn test_load_all_regions_skips_other_keys() {
        let mut store = MemoryStore::new();
        save_region(&mut store, "region_1111", &[tile(1, 1, "P")]).unwrap();
        save_region(&mut store, "region_2222", &[tile(2, 2, "Q")]).unwrap();
        store.set(JOIN_CODE_KEY, "abcde");

        let all = load_all_regions(&store).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.contains_key("region_1111"));
        assert!(all.contains_key("region_2222"));
    }

    #[test]
    fn test_merge_remote_dedupes_against_local() {
        let mut store = MemoryStore::new();
        save_region(&mut store, "region_1111", &[tile(1, 1, "P")]).unwrap();

        let mut remote = RegionTileSet::new();
        remote.insert("region_1111".into(), vec![tile(1, 1, "P"), tile(2, 2, "Q")]);
        remote.insert("region_2222".into(), vec![tile(3, 3, "R")]);

        merge_remote(&mut store, &remote).unwrap();

        assert_eq!(
            load_region(&store, "region_1111").unwrap(),
            vec![tile(1, 1, "P"), tile(2, 2, "Q")]
        );
        assert_eq!(
            load_region(&store, "region_2222").unwrap(),
            vec![tile(3, 3, "R")]
        );
    }

    #[test]
    fn test_merge_remote_aborts_without_writes_on_malformed_local() {
        let mut store = MemoryStore::new();
        store.set("region_1111", "{not json");

        let mut remote = RegionTileSet::new();
        remote.insert("region_1111".into(), vec![tile(1, 1, "P")]);
        remote.insert("region_2222".into(), vec![tile(2, 2, "Q")]);

        let err = merge_remote(&mut store, &remote).unwrap_err();
        assert!(matches!(err, StorageError::InvalidPayload { .. }));

        // Nothing was written — the malformed value is intact and the new
        // region never appeared.
        assert_eq!(store.get("region_1111").unwrap(), "{not json");
        assert!(store.get("region_2222").is_none());
    }

    #[test]
    fn test_join_code_round_trip_and_empty_sentinel() {
        let mut store = MemoryStore::new();
        assert!(load_join_code(&store).is_none());

        save_join_code(&mut store, "abcde12345");
        assert_eq!(load_join_code(&store).as_deref(), Some("abcde12345"));

        clear_join_code(&mut store);
        // Cleared by writing "" — still reads as "no group".
        assert_eq!(store.get(JOIN_CODE_KEY).as_deref(), Some(""));
        assert!(load_join_code(&store).is_none());
    }

    #[test]
    fn test_members_round_trip() {
        let mut store = MemoryStore::new();
        let members = vec![
            GroupMember::new(1, "Zezima"),
            GroupMember::new(2, "Durial321"),
        ];

        save_members(&mut store, &members).unwrap();
        assert_eq!(load_members(&store).unwrap(), members);

        clear_members(&mut store);
        assert!(load_members(&store).unwrap().is_empty());
    }

    #[test]
    fn test_members_wire_field_names() {
        let mut store = MemoryStore::new();
        save_members(&mut store, &[GroupMember::new(1, "Zezima")]).unwrap();

        let json = store.get(MEMBERS_KEY).unwrap();
        assert!(json.contains("\"memberNumber\":1"));
        assert!(json.contains("\"playerName\":\"Zezima\""));
    }
}

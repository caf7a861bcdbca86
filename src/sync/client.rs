/// The sync client — serializes local tile state, runs the round trip, and
/// applies the confirmation payload.

use super::backend::Backend;
use super::wire::{AddTilesRequest, GroupTilesTransfer, LeaveGroupRequest};
use super::SyncError;
use crate::group::GroupMember;
use crate::storage::{self, ConfigStore};

/// Client-side driver for the three backend operations.
///
/// Each call is one round trip. On success the confirmation payload is
/// merged into the store (tiles) and persisted (member list); on any error
/// the store is left exactly as it was. Rolling back a speculatively
/// persisted join code is the membership manager's contract, not this
/// layer's.
pub struct SyncClient<B: Backend> {
    backend: B,
}

impl<B: Backend> SyncClient<B> {
    pub fn new(backend: B) -> Self {
        SyncClient { backend }
    }

    /// Create or join the group identified by `code`.
    ///
    /// Serializes the full local region set (validated before the network
    /// call — a malformed stored region fails here with `InvalidPayload`
    /// and nothing is transmitted), posts AddTiles, then merges any
    /// returned tiles and persists any returned member list. Returns the
    /// freshest member list available: the response's, or the cached one
    /// when the response carries none.
    pub fn create_or_join(
        &self,
        store: &mut dyn ConfigStore,
        player: &str,
        code: &str,
    ) -> Result<Vec<GroupMember>, SyncError> {
        let local = storage::load_all_regions(store)?;

        let request = AddTilesRequest {
            username: player.to_owned(),
            group_join_code: code.to_owned(),
            tiles: GroupTilesTransfer {
                player_name: player.to_owned(),
                region_tiles: local,
            },
        };

        let response = self.backend.add_tiles(&request)?;

        if let Some(remote) = &response.tiles {
            storage::merge_remote(store, remote)?;
        }

        if response.members.is_empty() {
            Ok(storage::load_members(store)?)
        } else {
            storage::save_members(store, &response.members)?;
            Ok(response.members)
        }
    }

    /// Leave the group identified by `code`.
    pub fn leave(&self, player: &str, code: &str) -> Result<(), SyncError> {
        let request = LeaveGroupRequest {
            username: player.to_owned(),
            group_join_code: code.to_owned(),
        };
        self.backend.leave_group(&request)
    }

    /// Refresh the member list on demand.
    ///
    /// The backend exposes no dedicated members endpoint; AddTiles is
    /// idempotent for an existing membership, so a refresh is simply
    /// another create-or-join round trip.
    pub fn refresh_members(
        &self,
        store: &mut dyn ConfigStore,
        player: &str,
        code: &str,
    ) -> Result<Vec<GroupMember>, SyncError> {
        self.create_or_join(store, player, code)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::sync::wire::SyncResponse;
    use crate::tiles::{RegionTileSet, TileMarker};
    use std::cell::{Cell, RefCell};

    /// Scriptable backend: fixed response, programmable failure, call log.
    #[derive(Default)]
    struct FakeBackend {
        response: SyncResponse,
        reject_with: Option<u16>,
        unreachable: bool,
        add_calls: Cell<usize>,
        last_add: RefCell<Option<AddTilesRequest>>,
    }

    impl Backend for FakeBackend {
        fn add_tiles(&self, request: &AddTilesRequest) -> Result<SyncResponse, SyncError> {
            self.add_calls.set(self.add_calls.get() + 1);
            *self.last_add.borrow_mut() = Some(request.clone());
            if self.unreachable {
                return Err(SyncError::Unreachable("connection refused".into()));
            }
            if let Some(status) = self.reject_with {
                return Err(SyncError::Rejected(status));
            }
            Ok(self.response.clone())
        }

        fn leave_group(&self, _request: &LeaveGroupRequest) -> Result<(), SyncError> {
            if self.unreachable {
                return Err(SyncError::Unreachable("connection refused".into()));
            }
            if let Some(status) = self.reject_with {
                return Err(SyncError::Rejected(status));
            }
            Ok(())
        }
    }

    fn tile(x: i32, y: i32, player: &str) -> TileMarker {
        TileMarker::new(12850, x, y, 0, player)
    }

    #[test]
    fn test_create_sends_local_tiles_under_the_code() {
        let mut store = MemoryStore::new();
        storage::save_region(&mut store, "region_12850", &[tile(1, 1, "Zezima")]).unwrap();

        let backend = FakeBackend::default();
        let client = SyncClient::new(&backend);
        client.create_or_join(&mut store, "Zezima", "abcde").unwrap();

        let sent = backend.last_add.borrow().clone().unwrap();
        assert_eq!(sent.username, "Zezima");
        assert_eq!(sent.group_join_code, "abcde");
        assert_eq!(sent.tiles.player_name, "Zezima");
        assert_eq!(
            sent.tiles.region_tiles["region_12850"],
            vec![tile(1, 1, "Zezima")]
        );
    }

    #[test]
    fn test_confirmation_tiles_are_merged_and_members_persisted() {
        let mut store = MemoryStore::new();
        storage::save_region(&mut store, "region_12850", &[tile(1, 1, "Zezima")]).unwrap();

        let mut remote = RegionTileSet::new();
        remote.insert(
            "region_12850".into(),
            vec![tile(1, 1, "Zezima"), tile(2, 2, "Durial321")],
        );
        let backend = FakeBackend {
            response: SyncResponse {
                members: vec![
                    GroupMember::new(1, "Zezima"),
                    GroupMember::new(2, "Durial321"),
                ],
                tiles: Some(remote),
            },
            ..FakeBackend::default()
        };

        let client = SyncClient::new(&backend);
        let members = client.create_or_join(&mut store, "Zezima", "abcde").unwrap();

        assert_eq!(members.len(), 2);
        assert_eq!(storage::load_members(&store).unwrap(), members);
        // Duplicate dropped, remote addition kept.
        assert_eq!(
            storage::load_region(&store, "region_12850").unwrap(),
            vec![tile(1, 1, "Zezima"), tile(2, 2, "Durial321")]
        );
    }

    #[test]
    fn test_empty_confirmation_keeps_cached_members() {
        let mut store = MemoryStore::new();
        let cached = vec![GroupMember::new(1, "Zezima")];
        storage::save_members(&mut store, &cached).unwrap();

        let backend = FakeBackend::default();
        let client = SyncClient::new(&backend);
        let members = client.create_or_join(&mut store, "Zezima", "abcde").unwrap();

        assert_eq!(members, cached);
    }

    #[test]
    fn test_malformed_local_region_fails_before_any_network_call() {
        let mut store = MemoryStore::new();
        store.set("region_12850", "{not json");

        let backend = FakeBackend::default();
        let client = SyncClient::new(&backend);
        let err = client
            .create_or_join(&mut store, "Zezima", "abcde")
            .unwrap_err();

        assert!(matches!(err, SyncError::InvalidPayload(_)));
        assert_eq!(backend.add_calls.get(), 0);
    }

    #[test]
    fn test_rejected_round_trip_leaves_store_untouched() {
        let mut store = MemoryStore::new();
        storage::save_region(&mut store, "region_12850", &[tile(1, 1, "Zezima")]).unwrap();
        let before = store.clone();

        let backend = FakeBackend {
            reject_with: Some(500),
            ..FakeBackend::default()
        };
        let client = SyncClient::new(&backend);
        let err = client
            .create_or_join(&mut store, "Zezima", "abcde")
            .unwrap_err();

        assert!(matches!(err, SyncError::Rejected(500)));
        assert_eq!(
            storage::load_all_regions(&store).unwrap(),
            storage::load_all_regions(&before).unwrap()
        );
        assert!(storage::load_members(&store).unwrap().is_empty());
    }

    #[test]
    fn test_leave_round_trip() {
        let backend = FakeBackend::default();
        let client = SyncClient::new(&backend);
        assert!(client.leave("Zezima", "abcde").is_ok());

        let failing = FakeBackend {
            unreachable: true,
            ..FakeBackend::default()
        };
        let client = SyncClient::new(&failing);
        assert!(matches!(
            client.leave("Zezima", "abcde").unwrap_err(),
            SyncError::Unreachable(_)
        ));
    }

    #[test]
    fn test_refresh_is_an_add_tiles_round_trip() {
        let mut store = MemoryStore::new();
        let backend = FakeBackend {
            response: SyncResponse {
                members: vec![GroupMember::new(1, "Zezima")],
                tiles: None,
            },
            ..FakeBackend::default()
        };

        let client = SyncClient::new(&backend);
        let members = client
            .refresh_members(&mut store, "Zezima", "abcde")
            .unwrap();

        assert_eq!(backend.add_calls.get(), 1);
        assert_eq!(members, vec![GroupMember::new(1, "Zezima")]);
    }
}

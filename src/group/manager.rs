/// The membership manager — validates preconditions, drives the sync
/// client, and owns the state transitions.

use rand::Rng;

use super::member::GroupMember;
use super::state::{validate_join_code, GroupError, GroupStatus};
use crate::passphrase::{generate_passphrase, WordSource};
use crate::storage::{self, ConfigStore};
use crate::sync::{Backend, SyncClient};

/// Drives the group membership lifecycle.
///
/// The manager owns the host's config store adapter and a sync client, and
/// it is the only component that mutates [`GroupStatus`]. Every operation
/// here blocks for the duration of its single network round trip — dispatch
/// onto a worker thread and marshal back per the crate-level threading
/// contract. At most one create/join/leave may be in flight; a second
/// request is rejected immediately with [`GroupError::OperationInFlight`].
pub struct GroupManager<S: ConfigStore, B: Backend> {
    store: S,
    sync: SyncClient<B>,
    player_name: Option<String>,
    status: GroupStatus,
}

impl<S: ConfigStore, B: Backend> GroupManager<S, B> {
    /// Build a manager, hydrating the status from the persisted join code
    /// and cached member list. A corrupt cached member list is not fatal —
    /// it logs and reads as empty, and the next successful sync rewrites it.
    pub fn new(store: S, backend: B) -> Self {
        let status = match storage::load_join_code(&store) {
            Some(join_code) => {
                let members = storage::load_members(&store).unwrap_or_else(|err| {
                    log::warn!("Discarding corrupt cached member list: {err}");
                    Vec::new()
                });
                GroupStatus::InGroup { join_code, members }
            }
            None => GroupStatus::NoGroup,
        };

        GroupManager {
            store,
            sync: SyncClient::new(backend),
            player_name: None,
            status,
        }
    }

    // -----------------------------------------------------------------------
    // Host wiring
    // -----------------------------------------------------------------------

    /// Update the resolved local player name. `None` while logged out; all
    /// group operations refuse to run without an identity.
    pub fn set_player_name(&mut self, name: Option<String>) {
        self.player_name = name;
    }

    pub fn status(&self) -> &GroupStatus {
        &self.status
    }

    pub fn is_in_group(&self) -> bool {
        self.status.is_in_group()
    }

    pub fn join_code(&self) -> Option<&str> {
        self.status.join_code()
    }

    pub fn members(&self) -> &[GroupMember] {
        self.status.members()
    }

    /// The host's config store, e.g. for the manual export/import path.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Create a new group under a freshly generated passphrase.
    ///
    /// Returns the join code to hand to other players. On any failure the
    /// speculative join code is rolled back and the status returns to
    /// [`GroupStatus::NoGroup`]; nothing is retried automatically.
    pub fn create_group<R: Rng>(
        &mut self,
        words: Option<&dyn WordSource>,
        rng: &mut R,
    ) -> Result<String, GroupError> {
        self.guard_idle()?;
        let player = self.require_identity()?;
        if self.status.is_in_group() {
            return Err(GroupError::AlreadyInGroup);
        }

        let code = generate_passphrase(words, rng);
        self.run_create(player, code)
    }

    /// Join an existing group by its code.
    ///
    /// The code is validated as alphanumeric before anything else happens —
    /// an invalid code never changes state and never reaches the network.
    pub fn join_group(&mut self, code: &str) -> Result<(), GroupError> {
        self.guard_idle()?;
        let player = self.require_identity()?;
        if self.status.is_in_group() {
            return Err(GroupError::AlreadyInGroup);
        }
        validate_join_code(code)?;

        self.run_create(player, code.to_owned()).map(|_| ())
    }

    /// Leave the current group.
    ///
    /// `confirmed` is the user's answer to the host's yes/no prompt; without
    /// a yes, nothing is transmitted and the membership stands (returns
    /// `false`). A failed round trip also leaves the membership untouched —
    /// the leave did not take effect.
    pub fn leave_group(&mut self, confirmed: bool) -> Result<bool, GroupError> {
        self.guard_idle()?;
        let player = self.require_identity()?;
        let (join_code, members) = match &self.status {
            GroupStatus::InGroup { join_code, members } => {
                (join_code.clone(), members.clone())
            }
            _ => return Err(GroupError::NotInGroup),
        };

        if !confirmed {
            return Ok(false);
        }

        self.status = GroupStatus::AwaitingLeaveResponse {
            join_code: join_code.clone(),
            members: members.clone(),
        };

        match self.sync.leave(&player, &join_code) {
            Ok(()) => {
                storage::clear_join_code(&mut self.store);
                storage::clear_members(&mut self.store);
                self.status = GroupStatus::NoGroup;
                Ok(true)
            }
            Err(err) => {
                log::error!("Unable to leave group: {err}");
                self.status = GroupStatus::InGroup { join_code, members };
                Err(err.into())
            }
        }
    }

    /// Refresh the member list from the backend. The join code is never
    /// touched, whether the refresh succeeds or fails.
    pub fn refresh_members(&mut self) -> Result<Vec<GroupMember>, GroupError> {
        self.guard_idle()?;
        let player = self.require_identity()?;
        let join_code = match &self.status {
            GroupStatus::InGroup { join_code, .. } => join_code.clone(),
            _ => return Err(GroupError::NotInGroup),
        };

        let refreshed = self
            .sync
            .refresh_members(&mut self.store, &player, &join_code)?;
        if let GroupStatus::InGroup { members, .. } = &mut self.status {
            *members = refreshed.clone();
        }
        Ok(refreshed)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Shared create/join flow: persist the code speculatively, run the
    /// round trip, and either commit the membership or roll the code back.
    fn run_create(&mut self, player: String, code: String) -> Result<String, GroupError> {
        storage::save_join_code(&mut self.store, &code);
        self.status = GroupStatus::AwaitingCreateResponse;

        match self.sync.create_or_join(&mut self.store, &player, &code) {
            Ok(members) => {
                self.status = GroupStatus::InGroup {
                    join_code: code.clone(),
                    members,
                };
                Ok(code)
            }
            Err(err) => {
                log::error!("Unable to create or join group: {err}");
                storage::clear_join_code(&mut self.store);
                self.status = GroupStatus::NoGroup;
                Err(err.into())
            }
        }
    }

    fn guard_idle(&self) -> Result<(), GroupError> {
        if self.status.is_in_flight() {
            return Err(GroupError::OperationInFlight);
        }
        Ok(())
    }

    fn require_identity(&self) -> Result<String, GroupError> {
        self.player_name
            .clone()
            .filter(|name| !name.is_empty())
            .ok_or(GroupError::NoIdentity)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

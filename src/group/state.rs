/// Membership status, join-code validation, and group errors.

use thiserror::Error;

use super::member::GroupMember;
use crate::storage::StorageError;
use crate::sync::SyncError;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum GroupError {
    #[error("Join code must be a combination of alphanumeric characters")]
    InvalidCode,

    #[error("Player identity is not resolved")]
    NoIdentity,

    #[error("Already a member of a group")]
    AlreadyInGroup,

    #[error("Not a member of any group")]
    NotInGroup,

    #[error("Another group operation is already in flight")]
    OperationInFlight,

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

// ---------------------------------------------------------------------------
// Join-code validation
// ---------------------------------------------------------------------------

/// Validate a user-entered join code: non-empty, every character in
/// `[A-Za-z0-9]`. Runs before any state change or network call.
pub fn validate_join_code(code: &str) -> Result<(), GroupError> {
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(GroupError::InvalidCode);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GroupStatus
// ---------------------------------------------------------------------------

/// Membership status of the local player.
///
/// The tagged state replaces older clients' empty-string sentinel:
/// there is no separate "in group" flag that could drift from the code, and
/// the `Awaiting*` states double as the guard against a second operation
/// starting while one is in flight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GroupStatus {
    /// Not a member of any group. No outbound sync is ever attempted here.
    NoGroup,
    /// A create or join round trip is in flight.
    AwaitingCreateResponse,
    /// Member of the group identified by `join_code`.
    InGroup {
        join_code: String,
        members: Vec<GroupMember>,
    },
    /// A leave round trip is in flight. The code and members are retained so
    /// a failed leave restores the membership untouched.
    AwaitingLeaveResponse {
        join_code: String,
        members: Vec<GroupMember>,
    },
}

impl GroupStatus {
    /// Whether the player currently belongs to a group.
    pub fn is_in_group(&self) -> bool {
        matches!(self, GroupStatus::InGroup { .. })
    }

    /// Whether a create/join/leave round trip is in flight.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            GroupStatus::AwaitingCreateResponse | GroupStatus::AwaitingLeaveResponse { .. }
        )
    }

    /// The current join code, if a membership holds one.
    pub fn join_code(&self) -> Option<&str> {
        match self {
            GroupStatus::InGroup { join_code, .. }
            | GroupStatus::AwaitingLeaveResponse { join_code, .. } => Some(join_code),
            _ => None,
        }
    }

    /// The cached member list. Empty outside a membership.
    pub fn members(&self) -> &[GroupMember] {
        match self {
            GroupStatus::InGroup { members, .. }
            | GroupStatus::AwaitingLeaveResponse { members, .. } => members,
            _ => &[],
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

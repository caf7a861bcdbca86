/// Backend synchronization — wire payloads, transport contract, sync client.
///
/// Three idempotent-intent operations against the group backend: create or
/// join a group (AddTiles), leave it (LeaveGroup), and refresh the member
/// list. Each operation is exactly one blocking round trip; there is no
/// internal retry loop, no cancellation, and no timeout beyond the
/// transport default. Retrying is the caller's decision, never automatic.
///
/// # Module structure
/// - `wire` — JSON transfer payloads (field names fixed by the backend)
/// - `backend` — the transport contract
/// - `http` — blocking HTTP implementation of the contract
/// - `client` — `SyncClient`, the three operations with merge-and-persist
pub mod backend;
pub mod client;
pub mod http;
pub mod wire;

use thiserror::Error;

use crate::storage::StorageError;

pub use backend::Backend;
pub use client::SyncClient;
pub use http::{HttpBackend, DEFAULT_BACKEND_URL};
pub use wire::{AddTilesRequest, GroupTilesTransfer, LeaveGroupRequest, SyncResponse};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum SyncError {
    /// Transport-level failure — the backend was never reached.
    #[error("Group backend unreachable: {0}")]
    Unreachable(String),

    /// The backend answered with a non-success status.
    #[error("Group backend rejected the request (HTTP {0})")]
    Rejected(u16),

    /// A local or remote payload failed to parse. Detected before any
    /// persisted state is touched.
    #[error("Malformed payload: {0}")]
    InvalidPayload(String),
}

/// Local storage parse failures surface under the same taxonomy as remote
/// ones: unparsable JSON is `InvalidPayload` wherever it lives.
impl From<StorageError> for SyncError {
    fn from(err: StorageError) -> Self {
        SyncError::InvalidPayload(err.to_string())
    }
}

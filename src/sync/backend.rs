/// Transport contract for the group backend.

use super::wire::{AddTilesRequest, LeaveGroupRequest, SyncResponse};
use super::SyncError;

/// One blocking round trip per call. Implementations must not retry
/// internally; `Unreachable`, `Rejected`, and `InvalidPayload` are reported
/// to the caller exactly as they occurred.
pub trait Backend {
    /// `POST /AddTiles` — create, join, or refresh a membership.
    fn add_tiles(&self, request: &AddTilesRequest) -> Result<SyncResponse, SyncError>;

    /// `POST /LeaveGroup`.
    fn leave_group(&self, request: &LeaveGroupRequest) -> Result<(), SyncError>;
}

impl<B: Backend + ?Sized> Backend for &B {
    fn add_tiles(&self, request: &AddTilesRequest) -> Result<SyncResponse, SyncError> {
        (**self).add_tiles(request)
    }

    fn leave_group(&self, request: &LeaveGroupRequest) -> Result<(), SyncError> {
        (**self).leave_group(request)
    }
}

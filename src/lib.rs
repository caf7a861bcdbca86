//! # Tileman Group Protocol SDK
//!
//! **Group membership and tile-marker synchronization for group tile tracking.**
//!
//! Tileman Group Protocol is a standalone client-side protocol library. A host
//! application (typically a game-client plugin) integrates it to gain:
//!
//! - **Loss-free tile merging** — region-keyed union of tile markers with
//!   exact-duplicate removal; no timestamps, no last-writer-wins
//! - **Group membership lifecycle** — create / join / leave driven by a
//!   shared join code, with an explicit state machine and rollback on failure
//! - **Backend synchronization** — wire-compatible JSON payloads posted to
//!   the group backend over blocking HTTP, one round trip per operation
//! - **Join-code generation** — human-readable passphrases from a live word
//!   source, with a restricted-alphabet fallback
//! - **Manual export/import** — reproducible text dumps of group tiles for
//!   out-of-band sharing
//!
//! ## Architecture
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`tiles`] | Tile marker records, region tile sets, the merge engine |
//! | [`group`] | Group members, membership state machine, join-code rules |
//! | [`sync`] | Wire payloads, backend contract, HTTP backend, sync client |
//! | [`storage`] | Host config-store contract and persisted key layout |
//! | [`passphrase`] | Join-code generator (word source + fallback) |
//! | [`transfer`] | Manual text export/import of group tiles |
//!
//! ## Threading contract
//!
//! Every operation here uses blocking call semantics and mutates state only
//! through `&mut self`. The host MUST NOT invoke sync operations from its
//! rendering/input path: dispatch them onto a worker thread and marshal the
//! result back onto the UI-affinity thread before touching shared UI or
//! config state. The crate takes no locks; serialization through a single
//! owning thread is the host's responsibility.

// ── Public modules ──────────────────────────────────────────────────────────

/// Group members, membership state machine, and join-code validation.
pub mod group;

/// Join-code passphrase generation.
pub mod passphrase;

/// Host config-store contract and the persisted key layout.
pub mod storage;

/// Wire payloads, backend contract, blocking HTTP backend, and sync client.
pub mod sync;

/// Manual text export/import of group tiles.
pub mod transfer;

/// Tile marker records, region tile sets, and the merge engine.
pub mod tiles;

// ── Re-exports for convenience ──────────────────────────────────────────────

pub use group::{
    color_slot_for, validate_join_code, GroupError, GroupManager, GroupMember, GroupStatus,
    MarkerColorSlot,
};

pub use passphrase::{generate_passphrase, WordSource};

pub use storage::{ConfigStore, MemoryStore, StorageError};

pub use sync::{
    AddTilesRequest, Backend, GroupTilesTransfer, HttpBackend, LeaveGroupRequest, SyncClient,
    SyncError, SyncResponse, DEFAULT_BACKEND_URL,
};

pub use tiles::{exportable, merge, RegionTileSet, TileMarker};

pub use transfer::{export_markers, import_markers, TransferError};

// ── Library metadata ────────────────────────────────────────────────────────

/// Tileman Group Protocol SDK version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the SDK version string.
pub fn version() -> &'static str {
    VERSION
}

// ── Tests ───────────────────────────────────────────────────────────────────

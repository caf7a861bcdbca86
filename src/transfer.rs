//! Manual export/import of group tiles as text.
//!
//! The out-of-band fallback to backend sync: a player exports their group
//! tiles as a JSON dump, hands it to another player by whatever channel
//! (the host wires this to its clipboard), and the other side imports it.
//! Import validates the whole payload before a single write, and merges
//! through the same engine the backend path uses.

use thiserror::Error;

use crate::storage::{self, ConfigStore, StorageError};
use crate::sync::GroupTilesTransfer;
use crate::tiles::exportable;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("No tile markers found in the provided text")]
    Empty,

    #[error("Text is not a valid group tiles payload: {0}")]
    InvalidPayload(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

// ---------------------------------------------------------------------------
// Export / import
// ---------------------------------------------------------------------------

/// Serialize the store's group tiles for manual sharing.
///
/// Markers attributed to `player` are excluded — the export carries the
/// group's contributions, not the exporter's own cached copies. Region keys
/// come out sorted, so two exports of identical state are byte-identical
/// and diffable.
pub fn export_markers(store: &dyn ConfigStore, player: &str) -> Result<String, TransferError> {
    let local = storage::load_all_regions(store)?;
    let transfer = GroupTilesTransfer {
        player_name: player.to_owned(),
        region_tiles: exportable(&local, player),
    };
    serde_json::to_string(&transfer).map_err(|e| TransferError::InvalidPayload(e.to_string()))
}

/// Parse an exported dump and merge it into the store.
///
/// Returns the number of regions merged. Empty or whitespace-only text is
/// reported as [`TransferError::Empty`]; malformed JSON as
/// [`TransferError::InvalidPayload`]. In both cases the store is untouched —
/// parsing completes before any merge is applied.
pub fn import_markers(store: &mut dyn ConfigStore, text: &str) -> Result<usize, TransferError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TransferError::Empty);
    }

    let transfer: GroupTilesTransfer =
        serde_json::from_str(text).map_err(|e| TransferError::InvalidPayload(e.to_string()))?;

    storage::merge_remote(store, &transfer.region_tiles)?;
    Ok(transfer.region_tiles.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

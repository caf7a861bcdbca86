/// Loss-free union merge and the export filter.

use super::marker::{RegionTileSet, TileMarker};

/// Merge two region tile sets.
///
/// For every region present in either input, the result holds the
/// concatenation of both sides' markers with exact duplicates (all five
/// fields equal) removed. Regions present on only one side pass through
/// unchanged. No marker is ever dropped unless it is an exact duplicate,
/// so the merge is commutative and idempotent as a set of distinct rows.
pub fn merge(local: &RegionTileSet, remote: &RegionTileSet) -> RegionTileSet {
    let mut out = RegionTileSet::new();

    for (region, markers) in local.iter().chain(remote.iter()) {
        let combined = out.entry(region.clone()).or_default();
        for marker in markers {
            if !combined.contains(marker) {
                combined.push(marker.clone());
            }
        }
    }

    out
}

/// Filter a local set down to what may be exported on behalf of a player.
///
/// Markers attributed to `exclude_player` are dropped — a player's export
/// must not carry its own cached copy of past contributions back to the
/// group. Regions left empty by the filter are omitted entirely. Keys stay
/// sorted (BTreeMap), so two exports of the same state are byte-identical.
pub fn exportable(local: &RegionTileSet, exclude_player: &str) -> RegionTileSet {
    let mut out = RegionTileSet::new();

    for (region, markers) in local {
        let kept: Vec<TileMarker> = markers
            .iter()
            .filter(|m| m.player_name != exclude_player)
            .cloned()
            .collect();
        if !kept.is_empty() {
            out.insert(region.clone(), kept);
        }
    }

    out
}

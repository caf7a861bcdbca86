/// Tile marker record and the region-keyed tile set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One tracked tile plus the player who placed it.
///
/// Immutable once created; equality is structural over all five fields, and
/// that full five-field identity is also the dedupe key used by the merge
/// engine. Field names serialize in camelCase for wire compatibility with
/// the existing backend and with dumps produced by other clients.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct TileMarker {
    pub region_id: i32,
    pub region_x: i32,
    pub region_y: i32,
    pub z: i32,
    pub player_name: String,
}

impl TileMarker {
    pub fn new(
        region_id: i32,
        region_x: i32,
        region_y: i32,
        z: i32,
        player_name: impl Into<String>,
    ) -> Self {
        TileMarker {
            region_id,
            region_x,
            region_y,
            z,
            player_name: player_name.into(),
        }
    }
}

/// Region-keyed tile collections.
///
/// Keys are the persisted region keys (e.g. `region_12850`), unique per set.
/// A `BTreeMap` keeps keys sorted so exports are deterministic and diffable.
/// Insertion order of markers within a region carries no semantics.
pub type RegionTileSet = BTreeMap<String, Vec<TileMarker>>;

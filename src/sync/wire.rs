/// JSON transfer payloads.
///
/// Field names here are fixed by the deployed backend and by dumps that
/// existing clients produce: the data itself is camelCase, while the two
/// request envelopes carry a snake_case `group_join_code`. That
/// inconsistency is wire format, not style — do not "fix" it.

use serde::{Deserialize, Serialize};

use crate::group::GroupMember;
use crate::tiles::RegionTileSet;

/// The unit exchanged with the backend and with other clients via
/// export/import: who the tiles came from, and the tiles by region.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupTilesTransfer {
    pub player_name: String,
    pub region_tiles: RegionTileSet,
}

/// Body of `POST /AddTiles` — create, join, or refresh a group membership.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AddTilesRequest {
    pub username: String,
    #[serde(rename = "group_join_code")]
    pub group_join_code: String,
    pub tiles: GroupTilesTransfer,
}

/// Body of `POST /LeaveGroup`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LeaveGroupRequest {
    pub username: String,
    #[serde(rename = "group_join_code")]
    pub group_join_code: String,
}

/// Confirmation payload of a successful AddTiles round trip.
///
/// The backend may answer 200 with an empty body; both fields default so an
/// empty or partial confirmation reads as "nothing new", not as an error.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    #[serde(default)]
    pub members: Vec<GroupMember>,
    #[serde(default)]
    pub tiles: Option<RegionTileSet>,
}

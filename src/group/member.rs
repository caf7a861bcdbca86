/// Group members and per-member marker color slots.

use serde::{Deserialize, Serialize};

/// One member of the group, as reported by the backend.
///
/// `member_number` is a small ordinal assigned by the backend in join order;
/// it is what keeps a member's marker color stable across sessions. Wire
/// field names are camelCase (`memberNumber`, `playerName`).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub member_number: u32,
    pub player_name: String,
}

impl GroupMember {
    pub fn new(member_number: u32, player_name: impl Into<String>) -> Self {
        GroupMember {
            member_number,
            player_name: player_name.into(),
        }
    }
}

/// Which configured marker color a member's tiles render with.
///
/// Members 1 through 4 get dedicated slots; any higher ordinal (or a player
/// not in the member list at all) falls back to the default marker color.
/// The presentation layer maps slots to actual colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerColorSlot {
    Member1,
    Member2,
    Member3,
    Member4,
    Default,
}

impl GroupMember {
    /// The color slot this member's markers render with.
    pub fn color_slot(&self) -> MarkerColorSlot {
        match self.member_number {
            1 => MarkerColorSlot::Member1,
            2 => MarkerColorSlot::Member2,
            3 => MarkerColorSlot::Member3,
            4 => MarkerColorSlot::Member4,
            _ => MarkerColorSlot::Default,
        }
    }
}

/// Resolve the color slot for a marker's `player_name` against the cached
/// member list. Unknown players render with the default slot.
pub fn color_slot_for(members: &[GroupMember], player_name: &str) -> MarkerColorSlot {
    members
        .iter()
        .find(|m| m.player_name == player_name)
        .map(GroupMember::color_slot)
        .unwrap_or(MarkerColorSlot::Default)
}

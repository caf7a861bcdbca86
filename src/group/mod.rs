/// Group membership — members, join-code rules, and the state machine.
///
/// Membership is driven entirely by the shared join code: holding a code
/// means being in the group identified by it. The status is an explicit
/// tagged state rather than an empty-string sentinel, so the join code and
/// the member list can never drift apart.
///
/// # Module structure
/// - `member` — `GroupMember` and per-member marker color slots
/// - `state` — `GroupStatus`, join-code validation, `GroupError`
/// - `manager` — `GroupManager`, the create/join/leave/refresh driver
pub mod manager;
pub mod member;
pub mod state;

pub use manager::GroupManager;
pub use member::{color_slot_for, GroupMember, MarkerColorSlot};
pub use state::{validate_join_code, GroupError, GroupStatus};

/// Tile records and the merge engine.
///
/// Tile markers are monotonically-accumulating: the sync process never
/// "unplaces" a tile, so merging two region tile sets is a loss-free union
/// with exact-duplicate rows removed — deliberately not a last-writer-wins
/// merge, and no timestamps are involved.
///
/// # Module structure
/// - `marker` — `TileMarker` record and the `RegionTileSet` alias
/// - `merge` — union merge and the export filter
pub mod marker;
pub mod merge;

pub use marker::{RegionTileSet, TileMarker};
pub use merge::{exportable, merge};

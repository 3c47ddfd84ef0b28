//! The comparison engine: pure, stateless functions from picks and catalog to comparison groups.
//!
//! Nothing in here does I/O or holds state; the same inputs always produce the same output, so
//! the whole pipeline is safe to re-run on every catalog or session change.
mod dedup;
mod group;
mod matcher;

pub use dedup::{collapse, dedup_key};
pub use group::{assemble_groups, ComparisonGroup};
pub use matcher::{deal_matches, find_matches, is_combo_pick, COMBO_EXTRA_ITEMS_ALLOWED};

//! Layout matching and merging.
//!
//! Pure functions over model types: nothing here talks to external tools or
//! touches the store file. Callers own persistence and application.

mod matcher;
mod merge;
mod plan;

pub use merge::{merge, MergeSummary};
pub use plan::{plan, PlanEntry, RestorePlan};

//! WindowManager service: responsibility and boundaries
//!
//! This module and its submodules only read the live window list and carry out
//! single-window placements. Matching windows to stored records belongs to
//! `engine`; deciding what to place belongs to the restore operation.

mod dry_run;
mod wmctrl;
mod r#trait;

#[cfg(test)]
pub mod fake;

pub use self::r#trait::{create_window_manager, WindowManager};

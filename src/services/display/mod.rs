//! Monitor enumeration and screen configuration changes.

mod dry_run;
mod xrandr;
mod r#trait;

#[cfg(test)]
pub mod fake;

pub use self::r#trait::{create_display_manager, DisplayManager};

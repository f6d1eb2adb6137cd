pub mod layout;
pub mod screen;
pub mod window;

pub use layout::Layout;
pub use screen::{MonitorGeometry, ScreenFingerprint};
pub use window::{KeyStrategy, Maximized, WindowGeometry, WindowRecord};

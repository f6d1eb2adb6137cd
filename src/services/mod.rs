pub mod applier;
pub mod display;
pub mod notifier;
pub mod switcher;
pub mod window_manager;

pub use applier::{apply_plan, ApplyReport};
pub use display::{create_display_manager, DisplayManager};
pub use notifier::Notifier;
pub use switcher::switch_screens;
pub use window_manager::{create_window_manager, WindowManager};

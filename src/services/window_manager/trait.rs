use crate::engine::PlanEntry;
use crate::error::Result;
use crate::model::WindowRecord;

/// Window snapshot and placement backend
#[async_trait::async_trait]
pub trait WindowManager: Send + Sync {
    /// Every managed window with its current geometry, in the window manager's order
    async fn list_windows(&self) -> Result<Vec<WindowRecord>>;

    async fn desktop_count(&self) -> Result<usize>;

    /// Moves and resizes one window as described by the entry
    async fn place_window(&self, entry: &PlanEntry) -> Result<()>;
}

/// Factory function to create an appropriate window manager based on the dry_run flag
pub fn create_window_manager(dry_run: bool) -> Box<dyn WindowManager> {
    let real = super::wmctrl::WmctrlWindowManager::new();
    if dry_run {
        Box::new(super::dry_run::DryRunWindowManager::new(real))
    } else {
        Box::new(real)
    }
}

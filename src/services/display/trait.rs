use crate::error::Result;
use crate::model::MonitorGeometry;

/// Monitor query and screen configuration backend
#[async_trait::async_trait]
pub trait DisplayManager: Send + Sync {
    /// Every active monitor with its geometry
    async fn monitors(&self) -> Result<Vec<MonitorGeometry>>;

    /// Runs one display-configuration change with a raw argument string
    async fn apply(&self, args: &str) -> Result<()>;

    /// Whether `apply` actually changes the screens
    fn applies_changes(&self) -> bool {
        true
    }
}

/// Factory function to create an appropriate display manager based on the dry_run flag
pub fn create_display_manager(dry_run: bool) -> Box<dyn DisplayManager> {
    let real = super::xrandr::XrandrDisplayManager::new();
    if dry_run {
        Box::new(super::dry_run::DryRunDisplayManager::new(real))
    } else {
        Box::new(real)
    }
}

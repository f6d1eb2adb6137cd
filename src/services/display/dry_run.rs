use super::r#trait::DisplayManager;
use crate::error::Result;
use crate::model::MonitorGeometry;
use tracing::info;

/// Reads real monitors but only logs configuration changes
pub struct DryRunDisplayManager<D> {
    inner: D,
}

impl<D: DisplayManager> DryRunDisplayManager<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }
}

#[async_trait::async_trait]
impl<D: DisplayManager> DisplayManager for DryRunDisplayManager<D> {
    async fn monitors(&self) -> Result<Vec<MonitorGeometry>> {
        self.inner.monitors().await
    }

    async fn apply(&self, args: &str) -> Result<()> {
        info!("Dry-run: would run xrandr {}", args);
        Ok(())
    }

    fn applies_changes(&self) -> bool {
        false
    }
}

use super::r#trait::WindowManager;
use crate::engine::PlanEntry;
use crate::error::Result;
use crate::model::WindowRecord;
use tracing::info;

/// Reads real windows but only logs placements
pub struct DryRunWindowManager<W> {
    inner: W,
}

impl<W: WindowManager> DryRunWindowManager<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

#[async_trait::async_trait]
impl<W: WindowManager> WindowManager for DryRunWindowManager<W> {
    async fn list_windows(&self) -> Result<Vec<WindowRecord>> {
        self.inner.list_windows().await
    }

    async fn desktop_count(&self) -> Result<usize> {
        self.inner.desktop_count().await
    }

    async fn place_window(&self, entry: &PlanEntry) -> Result<()> {
        info!("Dry-run: would place {}", entry);
        Ok(())
    }
}

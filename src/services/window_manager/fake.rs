use super::r#trait::WindowManager;
use crate::engine::PlanEntry;
use crate::error::{LayoutError, Result};
use crate::model::WindowRecord;
use parking_lot::Mutex;

/// Scripted window manager for tests
#[derive(Default)]
pub struct FakeWindowManager {
    pub windows: Mutex<Vec<WindowRecord>>,
    pub placed: Mutex<Vec<PlanEntry>>,
    pub failing: Mutex<Vec<String>>,
    pub desktops: usize,
}

impl FakeWindowManager {
    pub fn with_windows(windows: Vec<WindowRecord>) -> Self {
        Self {
            windows: Mutex::new(windows),
            desktops: 4,
            ..Self::default()
        }
    }

    pub fn fail_on(&self, window_id: &str) {
        self.failing.lock().push(window_id.to_string());
    }

    pub fn set_windows(&self, windows: Vec<WindowRecord>) {
        *self.windows.lock() = windows;
    }

    pub fn placed(&self) -> Vec<PlanEntry> {
        self.placed.lock().clone()
    }
}

#[async_trait::async_trait]
impl WindowManager for FakeWindowManager {
    async fn list_windows(&self) -> Result<Vec<WindowRecord>> {
        Ok(self.windows.lock().clone())
    }

    async fn desktop_count(&self) -> Result<usize> {
        Ok(self.desktops)
    }

    async fn place_window(&self, entry: &PlanEntry) -> Result<()> {
        if self.failing.lock().contains(&entry.window_id) {
            return Err(LayoutError::tool_failed(
                "wmctrl",
                format!("window {} is gone", entry.window_id),
            ));
        }
        self.placed.lock().push(entry.clone());
        Ok(())
    }
}

#[async_trait::async_trait]
impl WindowManager for std::sync::Arc<FakeWindowManager> {
    async fn list_windows(&self) -> Result<Vec<WindowRecord>> {
        self.as_ref().list_windows().await
    }

    async fn desktop_count(&self) -> Result<usize> {
        self.as_ref().desktop_count().await
    }

    async fn place_window(&self, entry: &PlanEntry) -> Result<()> {
        self.as_ref().place_window(entry).await
    }
}

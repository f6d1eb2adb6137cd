use super::screen::MonitorGeometry;
use super::window::WindowRecord;
use serde::{Deserialize, Serialize};

/// Window records captured for one screen configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub screens: Vec<MonitorGeometry>,
    #[serde(default)]
    pub windows: Vec<WindowRecord>,
}

impl Layout {
    pub fn new(screens: Vec<MonitorGeometry>) -> Self {
        Self {
            screens,
            windows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }
}

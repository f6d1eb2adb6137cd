use serde::{Deserialize, Serialize};
use std::fmt;

/// Desktop index wmctrl uses for sticky windows
pub const DESKTOP_STICKY: i32 = -1;

/// Window position and size in root-window coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl WindowGeometry {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

impl fmt::Display for WindowGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}{:+}{:+}", self.width, self.height, self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Maximized {
    pub horizontal: bool,
    pub vertical: bool,
}

/// Which field identifies a window when matching live windows to stored records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStrategy {
    /// X11 window id: unique, but a relaunched application gets a new one
    #[default]
    WindowId,
    /// WM_CLASS: survives relaunches, shared by windows of the same application
    Class,
}

/// One window, either observed live or as stored in a layout
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowRecord {
    pub window_id: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pid: Option<u32>,
    pub desktop: i32,
    pub geometry: WindowGeometry,
    #[serde(default)]
    pub maximized: Maximized,
}

impl WindowRecord {
    pub fn new(window_id: impl Into<String>, geometry: WindowGeometry) -> Self {
        Self {
            window_id: window_id.into(),
            class: String::new(),
            title: String::new(),
            pid: None,
            desktop: 0,
            geometry,
            maximized: Maximized::default(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = Some(pid);
        self
    }

    pub fn with_desktop(mut self, desktop: i32) -> Self {
        self.desktop = desktop;
        self
    }

    pub fn with_maximized(mut self, maximized: Maximized) -> Self {
        self.maximized = maximized;
        self
    }

    pub fn key(&self, strategy: KeyStrategy) -> &str {
        match strategy {
            KeyStrategy::WindowId => &self.window_id,
            KeyStrategy::Class => &self.class,
        }
    }
}

impl fmt::Display for WindowRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.class.is_empty() {
            write!(f, "{} \"{}\" {}", self.window_id, self.title, self.geometry)
        } else {
            write!(
                f,
                "{} \"{}\" ({}) {}",
                self.window_id, self.title, self.class, self.geometry
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_record_creation() {
        let window = WindowRecord::new("0x01", WindowGeometry::new(10, 20, 640, 480))
            .with_class("Navigator.firefox")
            .with_title("Mozilla Firefox")
            .with_pid(1234)
            .with_desktop(DESKTOP_STICKY);

        assert_eq!(window.key(KeyStrategy::WindowId), "0x01");
        assert_eq!(window.key(KeyStrategy::Class), "Navigator.firefox");
        assert_eq!(window.pid, Some(1234));
        assert_eq!(window.desktop, DESKTOP_STICKY);
    }

    #[test]
    fn test_key_strategy_serde_names() {
        let parsed: KeyStrategy = serde_json::from_str("\"class\"").unwrap();
        assert_eq!(parsed, KeyStrategy::Class);
        assert_eq!(
            serde_json::to_string(&KeyStrategy::WindowId).unwrap(),
            "\"window_id\""
        );
    }

    #[test]
    fn test_record_defaults_on_sparse_json() {
        let json = r#"{"window_id":"0x2","desktop":1,"geometry":{"x":0,"y":0,"width":10,"height":10}}"#;
        let record: WindowRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.title, "");
        assert_eq!(record.maximized, Maximized::default());
    }

    #[test]
    fn test_display() {
        let window = WindowRecord::new("0x01", WindowGeometry::new(-5, 20, 640, 480))
            .with_title("term");
        assert_eq!(window.to_string(), "0x01 \"term\" 640x480-5+20");
    }
}

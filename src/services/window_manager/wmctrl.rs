use super::r#trait::WindowManager;
use crate::engine::PlanEntry;
use crate::error::{LayoutError, Result};
use crate::model::{Maximized, WindowGeometry, WindowRecord};
use crate::utils::{self, split_fields};
use tracing::debug;

const WMCTRL: &str = "wmctrl";
const XPROP: &str = "xprop";

/// Window snapshot and placement through `wmctrl`, with `xprop` for the
/// maximized state
pub struct WmctrlWindowManager;

impl WmctrlWindowManager {
    pub fn new() -> Self {
        Self
    }

    async fn wmctrl(&self, window_id: &str, args: &[&str]) -> Result<()> {
        let mut full = vec!["-i", "-r", window_id];
        full.extend_from_slice(args);
        utils::run(WMCTRL, &full).await.map(|_| ())
    }

    async fn maximized_state(&self, window_id: &str) -> Maximized {
        match utils::run(XPROP, &["-id", window_id, "_NET_WM_STATE"]).await {
            Ok(output) => parse_wm_state(&output),
            Err(e) => {
                debug!("Could not read _NET_WM_STATE of {}: {}", window_id, e);
                Maximized::default()
            }
        }
    }
}

#[async_trait::async_trait]
impl WindowManager for WmctrlWindowManager {
    async fn list_windows(&self) -> Result<Vec<WindowRecord>> {
        let output = utils::run(WMCTRL, &["-lpGx"]).await?;
        let mut windows = Vec::new();
        for window in parse_window_list(&output)? {
            let maximized = self.maximized_state(&window.window_id).await;
            windows.push(window.with_maximized(maximized));
        }

        debug!("wmctrl reported {} window(s)", windows.len());
        Ok(windows)
    }

    async fn desktop_count(&self) -> Result<usize> {
        let output = utils::run(WMCTRL, &["-d"]).await?;
        Ok(output.lines().filter(|line| !line.trim().is_empty()).count())
    }

    async fn place_window(&self, entry: &PlanEntry) -> Result<()> {
        let id = entry.window_id.as_str();

        self.wmctrl(id, &["-b", "remove,maximized_vert,maximized_horz"])
            .await?;

        if entry.is_sticky() {
            self.wmctrl(id, &["-b", "add,sticky"]).await?;
        } else {
            self.wmctrl(id, &["-b", "remove,sticky"]).await?;
            let desktop = entry.desktop.to_string();
            self.wmctrl(id, &["-t", &desktop]).await?;
        }

        let g = entry.geometry;
        let geometry = format!("0,{},{},{},{}", g.x, g.y, g.width, g.height);
        self.wmctrl(id, &["-e", &geometry]).await?;

        if entry.maximized.vertical {
            self.wmctrl(id, &["-b", "add,maximized_vert"]).await?;
        }
        if entry.maximized.horizontal {
            self.wmctrl(id, &["-b", "add,maximized_horz"]).await?;
        }

        Ok(())
    }
}

/// Parses `wmctrl -lpGx` output. Blank lines are ignored, anything else that
/// does not have the expected columns is an error.
pub fn parse_window_list(output: &str) -> Result<Vec<WindowRecord>> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_window_line)
        .collect()
}

fn parse_window_line(line: &str) -> Result<WindowRecord> {
    // id desktop pid x y width height class host [title]
    let (fields, title) =
        split_fields(line, 9).ok_or_else(|| LayoutError::parse(WMCTRL, line, "too few columns"))?;

    let window_id = fields[0];
    if !window_id.starts_with("0x") {
        return Err(LayoutError::parse(WMCTRL, line, "window id is not hexadecimal"));
    }

    let number = |index: usize, what: &str| -> Result<i64> {
        fields[index]
            .parse::<i64>()
            .map_err(|_| LayoutError::parse(WMCTRL, line, format!("invalid {}", what)))
    };
    let desktop = number(1, "desktop")?;
    let pid = number(2, "pid")?;
    let x = number(3, "x")?;
    let y = number(4, "y")?;
    let width = number(5, "width")?;
    let height = number(6, "height")?;

    let geometry = WindowGeometry::new(
        i32::try_from(x).map_err(|_| LayoutError::parse(WMCTRL, line, "x out of range"))?,
        i32::try_from(y).map_err(|_| LayoutError::parse(WMCTRL, line, "y out of range"))?,
        u32::try_from(width).map_err(|_| LayoutError::parse(WMCTRL, line, "invalid width"))?,
        u32::try_from(height).map_err(|_| LayoutError::parse(WMCTRL, line, "invalid height"))?,
    );

    let mut window = WindowRecord::new(window_id, geometry)
        .with_desktop(
            i32::try_from(desktop)
                .map_err(|_| LayoutError::parse(WMCTRL, line, "desktop out of range"))?,
        )
        .with_class(fields[7])
        .with_title(title);
    if pid > 0 {
        if let Ok(pid) = u32::try_from(pid) {
            window = window.with_pid(pid);
        }
    }

    Ok(window)
}

/// Reads the maximized flags out of `xprop -id <id> _NET_WM_STATE`
pub fn parse_wm_state(output: &str) -> Maximized {
    Maximized {
        horizontal: output.contains("_NET_WM_STATE_MAXIMIZED_HORZ"),
        vertical: output.contains("_NET_WM_STATE_MAXIMIZED_VERT"),
    }
}

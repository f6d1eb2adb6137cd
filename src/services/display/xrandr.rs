use super::r#trait::DisplayManager;
use crate::error::{LayoutError, Result};
use crate::model::MonitorGeometry;
use crate::utils::{self, split_args, split_fields};
use tracing::{debug, info};

const XRANDR: &str = "xrandr";

pub struct XrandrDisplayManager;

impl XrandrDisplayManager {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl DisplayManager for XrandrDisplayManager {
    async fn monitors(&self) -> Result<Vec<MonitorGeometry>> {
        let output = utils::run(XRANDR, &["--listactivemonitors"]).await?;
        let monitors = parse_active_monitors(&output)?;
        debug!(
            "xrandr reported monitors: {}",
            monitors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(monitors)
    }

    /// Quoted values such as `--set "scaling mode" Full` are kept whole
    async fn apply(&self, args: &str) -> Result<()> {
        info!("Running xrandr {}", args);
        let args = split_args(args)?;
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        utils::run(XRANDR, &args).await.map(|_| ())
    }
}

/// Parses `xrandr --listactivemonitors`:
///
/// ```text
/// Monitors: 2
///  0: +*eDP-1 1920/344x1080/193+0+0  eDP-1
///  1: +HDMI-1 1280/338x1024/270+1920+0  HDMI-1
/// ```
pub fn parse_active_monitors(output: &str) -> Result<Vec<MonitorGeometry>> {
    let mut expected = None;
    let mut monitors = Vec::new();

    for line in output.lines().filter(|line| !line.trim().is_empty()) {
        if let Some(count) = line.trim().strip_prefix("Monitors:") {
            let count = count
                .trim()
                .parse::<usize>()
                .map_err(|_| LayoutError::parse(XRANDR, line, "invalid monitor count"))?;
            expected = Some(count);
            continue;
        }
        monitors.push(parse_monitor_line(line)?);
    }

    match expected {
        Some(count) if count == monitors.len() => Ok(monitors),
        Some(count) => Err(LayoutError::parse(
            XRANDR,
            output.trim(),
            format!("header announces {} monitors, found {}", count, monitors.len()),
        )),
        None => Err(LayoutError::parse(XRANDR, output.trim(), "missing 'Monitors:' header")),
    }
}

fn parse_monitor_line(line: &str) -> Result<MonitorGeometry> {
    let (fields, rest) = split_fields(line, 3)
        .ok_or_else(|| LayoutError::parse(XRANDR, line, "too few columns"))?;

    if !fields[0].ends_with(':') {
        return Err(LayoutError::parse(XRANDR, line, "missing monitor index"));
    }

    let name = rest
        .split_whitespace()
        .next()
        .unwrap_or_else(|| fields[1].trim_start_matches(['+', '*']));
    if name.is_empty() {
        return Err(LayoutError::parse(XRANDR, line, "missing monitor name"));
    }

    let (width, height, x, y) = parse_geometry(fields[2])
        .ok_or_else(|| LayoutError::parse(XRANDR, line, "invalid geometry"))?;

    Ok(MonitorGeometry::new(name, width, height, x, y))
}

/// `W/mmxH/mm+X+Y`; the physical sizes are optional and negative offsets
/// may come as `+-X`
fn parse_geometry(geometry: &str) -> Option<(u32, u32, i32, i32)> {
    let (width, rest) = geometry.split_once('x')?;
    let sign = rest.find(['+', '-'])?;
    let (height, offsets) = rest.split_at(sign);

    let width = width.split('/').next()?.parse().ok()?;
    let height = height.split('/').next()?.parse().ok()?;

    let (x, offsets) = take_offset(offsets)?;
    let (y, offsets) = take_offset(offsets)?;
    if !offsets.is_empty() {
        return None;
    }
    Some((width, height, x, y))
}

fn take_offset(s: &str) -> Option<(i32, &str)> {
    if !s.starts_with(['+', '-']) {
        return None;
    }
    let s = s.strip_prefix('+').unwrap_or(s);
    let digits = usize::from(s.starts_with('-'));
    let end = s[digits..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s.len(), |i| i + digits);
    if end == digits {
        return None;
    }
    Some((s[..end].parse().ok()?, &s[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_active_monitors() {
        let output = "Monitors: 2\n 0: +*eDP-1 1920/344x1080/193+0+0  eDP-1\n 1: +HDMI-1 1280/338x1024/270+1920+0  HDMI-1\n";
        let monitors = parse_active_monitors(output).unwrap();
        assert_eq!(
            monitors,
            vec![
                MonitorGeometry::new("eDP-1", 1920, 1080, 0, 0),
                MonitorGeometry::new("HDMI-1", 1280, 1024, 1920, 0),
            ]
        );
    }

    #[test]
    fn test_parse_negative_offsets_and_missing_output_name() {
        let output = "Monitors: 2\n 0: +DP-2 2560/597x1440/336+-2560+-200\n 1: +*eDP-1 1920x1080-10+0\n";
        let monitors = parse_active_monitors(output).unwrap();
        assert_eq!(
            monitors,
            vec![
                MonitorGeometry::new("DP-2", 2560, 1440, -2560, -200),
                MonitorGeometry::new("eDP-1", 1920, 1080, -10, 0),
            ]
        );
    }

    #[test]
    fn test_parse_without_monitors() {
        assert!(parse_active_monitors("Monitors: 0\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_errors() {
        for output in [
            " 0: +*eDP-1 1920/344x1080/193+0+0  eDP-1",
            "Monitors: 2\n 0: +*eDP-1 1920/344x1080/193+0+0  eDP-1",
            "Monitors: 1\n 0: +*eDP-1 garbage  eDP-1",
            "Monitors: many",
        ] {
            let err = parse_active_monitors(output).unwrap_err();
            assert!(matches!(err, LayoutError::Parse { .. }), "{}", output);
        }
    }
}

use crate::error::{LayoutError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One active monitor as reported by the display tool
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonitorGeometry {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

impl MonitorGeometry {
    pub fn new(name: impl Into<String>, width: u32, height: u32, x: i32, y: i32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            x,
            y,
        }
    }
}

impl fmt::Display for MonitorGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}x{}{:+}{:+}",
            self.name, self.width, self.height, self.x, self.y
        )
    }
}

/// Parses the `name:WxH+X+Y` form written by `Display`
impl FromStr for MonitorGeometry {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| LayoutError::InvalidFingerprint {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let (name, geometry) = s
            .rsplit_once(':')
            .ok_or_else(|| invalid("expected name:WxH+X+Y"))?;
        if name.is_empty() {
            return Err(invalid("missing monitor name"));
        }

        let (width, rest) = geometry
            .split_once('x')
            .ok_or_else(|| invalid("missing size"))?;
        let sign = rest.find(['+', '-']).ok_or_else(|| invalid("missing offset"))?;
        let (height, offsets) = rest.split_at(sign);
        let second = offsets[1..]
            .find(['+', '-'])
            .map(|i| i + 1)
            .ok_or_else(|| invalid("missing y offset"))?;
        let (x, y) = offsets.split_at(second);

        let width = width.parse().map_err(|_| invalid("invalid width"))?;
        let height = height.parse().map_err(|_| invalid("invalid height"))?;
        let x = x.parse().map_err(|_| invalid("invalid x offset"))?;
        let y = y.parse().map_err(|_| invalid("invalid y offset"))?;

        Ok(Self::new(name, width, height, x, y))
    }
}

/// Canonical identifier of a whole monitor set.
///
/// Built from the sorted `name:WxH+X+Y` forms of every monitor, so enumeration
/// order does not matter while any change in count, resolution or offset does.
/// Serialises as a plain string and doubles as the store's map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenFingerprint(String);

impl ScreenFingerprint {
    pub fn from_monitors(monitors: &[MonitorGeometry]) -> Result<Self> {
        if monitors.is_empty() {
            return Err(LayoutError::NoScreensDetected);
        }

        let mut parts: Vec<String> = monitors.iter().map(ToString::to_string).collect();
        parts.sort();
        Ok(Self(parts.join(",")))
    }

    /// Parses a hand-written fingerprint such as a screen layout's `expect`.
    ///
    /// Monitors may be listed in any order; the result is canonical.
    pub fn parse(value: &str) -> Result<Self> {
        let monitors = value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<MonitorGeometry>>>()?;
        Self::from_monitors(&monitors)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScreenFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monitors in canonical order, as stored next to a layout
pub fn canonical_screens(monitors: &[MonitorGeometry]) -> Vec<MonitorGeometry> {
    let mut screens = monitors.to_vec();
    screens.sort_by_key(|m| m.to_string());
    screens
}

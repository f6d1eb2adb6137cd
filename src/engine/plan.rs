use super::matcher::pair;
use crate::model::window::DESKTOP_STICKY;
use crate::model::{KeyStrategy, Layout, Maximized, WindowGeometry, WindowRecord};
use std::fmt;

/// Placement to apply to one live window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub window_id: String,
    pub title: String,
    pub geometry: WindowGeometry,
    pub desktop: i32,
    pub maximized: Maximized,
}

impl PlanEntry {
    pub fn is_sticky(&self) -> bool {
        self.desktop == DESKTOP_STICKY
    }
}

impl fmt::Display for PlanEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} \"{}\" -> {} on desktop {}",
            self.window_id, self.title, self.geometry, self.desktop
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestorePlan {
    pub entries: Vec<PlanEntry>,
    /// Live windows without a stored record; they stay where they are
    pub skipped: Vec<String>,
    /// Stored records whose window is gone
    pub stale: usize,
}

impl RestorePlan {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the restore plan for the live windows against a stored layout.
///
/// Entries follow live enumeration order and always target the live window id,
/// which differs from the stored one when matching by class.
pub fn plan(layout: &Layout, live: &[WindowRecord], strategy: KeyStrategy) -> RestorePlan {
    let pairing = pair(live, &layout.windows, strategy);

    let entries = pairing
        .pairs
        .iter()
        .map(|&(l, s)| {
            let target = &layout.windows[s];
            PlanEntry {
                window_id: live[l].window_id.clone(),
                title: live[l].title.clone(),
                geometry: target.geometry,
                desktop: target.desktop,
                maximized: target.maximized,
            }
        })
        .collect();

    RestorePlan {
        entries,
        skipped: pairing
            .unmatched
            .iter()
            .map(|&l| live[l].window_id.clone())
            .collect(),
        stale: pairing.stale.len(),
    }
}

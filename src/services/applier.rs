use super::window_manager::WindowManager;
use crate::engine::{PlanEntry, RestorePlan};
use crate::error::LayoutError;
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct ApplyReport {
    pub applied: Vec<String>,
    pub failed: Vec<(String, LayoutError)>,
}

impl ApplyReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Places every window of the plan. A failed entry is recorded and the rest
/// still run.
pub async fn apply_plan(windows: &dyn WindowManager, plan: &RestorePlan) -> ApplyReport {
    let desktops = match windows.desktop_count().await {
        Ok(count) => Some(count),
        Err(e) => {
            warn!("Could not count desktops, keeping stored desktop numbers: {}", e);
            None
        }
    };

    let mut report = ApplyReport::default();
    for entry in &plan.entries {
        let entry = clamp_desktop(entry, desktops);
        debug!("Placing {}", entry);
        match windows.place_window(&entry).await {
            Ok(()) => report.applied.push(entry.window_id),
            Err(e) => {
                warn!("Failed to place window {}: {}", entry.window_id, e);
                report.failed.push((entry.window_id, e));
            }
        }
    }
    report
}

/// Keeps a stored desktop index inside the desktops that exist now
fn clamp_desktop(entry: &PlanEntry, desktops: Option<usize>) -> PlanEntry {
    let mut entry = entry.clone();
    if let Some(count) = desktops.filter(|&count| count > 0) {
        let last = i32::try_from(count - 1).unwrap_or(i32::MAX);
        if entry.desktop > last {
            entry.desktop = last;
        }
    }
    entry
}

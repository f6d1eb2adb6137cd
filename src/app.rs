//! The `store`, `restore` and `switch` operations.

use crate::config::Config;
use crate::engine::{self, MergeSummary};
use crate::error::{LayoutError, Result};
use crate::model::{ScreenFingerprint, WindowRecord};
use crate::services::{apply_plan, switch_screens, ApplyReport, DisplayManager, Notifier, WindowManager};
use crate::store::LayoutRepository;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct StoreSummary {
    pub fingerprint: ScreenFingerprint,
    pub merge: MergeSummary,
}

#[derive(Debug)]
pub enum RestoreOutcome {
    /// Nothing was stored for the current screens; no window was touched
    NoStoredLayout(ScreenFingerprint),
    Applied {
        fingerprint: ScreenFingerprint,
        report: ApplyReport,
        skipped: usize,
    },
}

impl RestoreOutcome {
    pub fn is_complete(&self) -> bool {
        match self {
            RestoreOutcome::NoStoredLayout(_) => true,
            RestoreOutcome::Applied { report, .. } => report.is_complete(),
        }
    }
}

pub struct App {
    config: Arc<Config>,
    windows: Box<dyn WindowManager>,
    display: Box<dyn DisplayManager>,
    repository: Box<dyn LayoutRepository>,
    notifier: Notifier,
}

impl App {
    pub fn new(
        config: Arc<Config>,
        windows: Box<dyn WindowManager>,
        display: Box<dyn DisplayManager>,
        repository: Box<dyn LayoutRepository>,
        notifier: Notifier,
    ) -> Self {
        Self {
            config,
            windows,
            display,
            repository,
            notifier,
        }
    }

    /// Captures the live windows into the layout of the current screens
    pub async fn store(&self, prune: bool) -> Result<StoreSummary> {
        let mut store = self.repository.load()?;
        let monitors = self.display.monitors().await?;
        let fingerprint = ScreenFingerprint::from_monitors(&monitors)?;
        let live = self.windows.list_windows().await?;
        log_windows("Current windows", &live);

        let merged = engine::merge(
            store.get(&fingerprint),
            &monitors,
            &live,
            self.config.matching.key,
            prune,
        );
        let summary = merged.summary;
        info!(
            "Storing layout for {}: {} updated, {} added, {} kept, {} pruned",
            fingerprint, summary.updated, summary.added, summary.retained, summary.pruned
        );
        debug!("Layout for {} now holds {} window(s)", fingerprint, merged.layout.len());

        store.insert(fingerprint.clone(), merged.layout);
        self.repository.save(&store)?;

        Ok(StoreSummary {
            fingerprint,
            merge: summary,
        })
    }

    /// Moves live windows back to the geometry stored for the current screens
    pub async fn restore(&self) -> Result<RestoreOutcome> {
        let store = self.repository.load()?;
        let monitors = self.display.monitors().await?;
        let fingerprint = ScreenFingerprint::from_monitors(&monitors)?;

        let Some(layout) = store.get(&fingerprint) else {
            warn!("No stored layout for screens {}", fingerprint);
            return Ok(RestoreOutcome::NoStoredLayout(fingerprint));
        };

        let live = self.windows.list_windows().await?;
        let plan = engine::plan(layout, &live, self.config.matching.key);
        info!(
            "Restoring {} window(s) for {} ({} stored record(s) without a window)",
            plan.entries.len(),
            fingerprint,
            plan.stale
        );
        if plan.is_empty() {
            info!("None of the stored windows for {} is open", fingerprint);
        }
        for window_id in &plan.skipped {
            debug!("No stored position for window {}, leaving it in place", window_id);
        }

        let report = apply_plan(self.windows.as_ref(), &plan).await;

        if tracing::enabled!(tracing::Level::DEBUG) {
            match self.windows.list_windows().await {
                Ok(after) => log_windows("Windows after restore", &after),
                Err(e) => debug!("Could not re-read windows after restore: {}", e),
            }
        }

        Ok(RestoreOutcome::Applied {
            fingerprint,
            report,
            skipped: plan.skipped.len(),
        })
    }

    /// Stores, switches to the named screen layout, then restores
    pub async fn switch(&self, name: &str) -> Result<RestoreOutcome> {
        let entry = self
            .config
            .screen_layout(name)
            .ok_or_else(|| LayoutError::UnknownScreenLayout(name.to_string()))?;

        self.store(false).await?;
        switch_screens(self.display.as_ref(), name, entry, &self.config.switch).await?;
        let outcome = self.restore().await?;

        self.notifier.notify("Layout ready").await;
        Ok(outcome)
    }
}

fn log_windows(label: &str, windows: &[WindowRecord]) {
    if tracing::enabled!(tracing::Level::DEBUG) {
        debug!("{} ({}):", label, windows.len());
        for window in windows {
            debug!("  {} desktop={}", window, window.desktop);
        }
    }
}

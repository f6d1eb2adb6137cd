use crate::utils;
use tracing::{info, warn};

/// Desktop notification through `notify-send`
pub struct Notifier {
    enabled: bool,
    dry_run: bool,
}

impl Notifier {
    pub fn new(enabled: bool, dry_run: bool) -> Self {
        Self { enabled, dry_run }
    }

    pub async fn notify(&self, message: &str) {
        if !self.enabled {
            return;
        }
        if self.dry_run {
            info!("Dry-run: would notify '{}'", message);
            return;
        }
        if let Err(e) = utils::run("notify-send", &["-t", "1000", message]).await {
            warn!("Desktop notification failed: {}", e);
        }
    }
}

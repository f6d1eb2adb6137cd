use super::display::DisplayManager;
use crate::config::{ScreenLayoutEntry, SwitchConfig};
use crate::error::{LayoutError, Result};
use crate::model::ScreenFingerprint;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

/// Applies a named screen layout and waits for the monitors to settle.
///
/// With an `expect` fingerprint the layout is settled once that fingerprint is
/// seen. Without one it is settled once the fingerprint differs from the one
/// before the switch and has been seen `stable_polls` times in a row. Query
/// failures while polling count as "not yet".
pub async fn switch_screens(
    display: &dyn DisplayManager,
    name: &str,
    entry: &ScreenLayoutEntry,
    settings: &SwitchConfig,
) -> Result<ScreenFingerprint> {
    let target = entry.expected()?;
    let before = ScreenFingerprint::from_monitors(&display.monitors().await?)?;
    info!("Switching screen layout to '{}' (from {})", name, before);

    for args in entry.xrandr_calls() {
        display.apply(args).await?;
    }

    if !display.applies_changes() {
        return Ok(before);
    }

    let deadline = Instant::now() + settings.timeout();
    let mut last: Option<ScreenFingerprint> = None;
    let mut stable = 0u32;

    loop {
        sleep(settings.poll_interval()).await;

        match display
            .monitors()
            .await
            .and_then(|monitors| ScreenFingerprint::from_monitors(&monitors))
        {
            Ok(current) => {
                if last.as_ref() == Some(&current) {
                    stable += 1;
                } else {
                    stable = 1;
                    last = Some(current.clone());
                }

                let settled = match &target {
                    Some(target) => &current == target,
                    None => current != before && stable >= settings.stable_polls,
                };
                if settled {
                    info!("Screen layout '{}' settled: {}", name, current);
                    return Ok(current);
                }
                debug!("Screens not settled yet: {} (seen {}x)", current, stable);
            }
            Err(e) => {
                debug!("Monitor query failed while switching: {}", e);
                last = None;
                stable = 0;
            }
        }

        if Instant::now() >= deadline {
            return Err(LayoutError::ScreenSwitchTimedOut {
                name: name.to_string(),
                timeout: settings.timeout(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MonitorGeometry;
    use crate::services::display::fake::FakeDisplayManager;

    fn laptop() -> Vec<MonitorGeometry> {
        vec![MonitorGeometry::new("eDP-1", 1920, 1080, 0, 0)]
    }

    fn docked() -> Vec<MonitorGeometry> {
        vec![
            MonitorGeometry::new("eDP-1", 1920, 1080, 0, 0),
            MonitorGeometry::new("HDMI-1", 2560, 1440, 1920, 0),
        ]
    }

    fn entry() -> ScreenLayoutEntry {
        ScreenLayoutEntry::Args("--output HDMI-1 --auto --right-of eDP-1\n--output eDP-1 --primary".into())
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_until_new_layout_is_stable() {
        let display = FakeDisplayManager::with_monitors(laptop());
        *display.after_apply.lock() = vec![Some(laptop()), None, Some(docked()), Some(docked())];

        let settings = SwitchConfig::default();
        let fp = switch_screens(&display, "docked", &entry(), &settings).await.unwrap();

        assert_eq!(fp, ScreenFingerprint::from_monitors(&docked()).unwrap());
        assert_eq!(display.applied().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expected_fingerprint_settles_immediately() {
        let display = FakeDisplayManager::with_monitors(laptop());
        let entry = ScreenLayoutEntry::Detailed {
            xrandr: "--output HDMI-1 --off".into(),
            expect: Some("eDP-1:1920x1080+0+0".into()),
        };

        let fp = switch_screens(&display, "laptop", &entry, &SwitchConfig::default())
            .await
            .unwrap();
        assert_eq!(fp.as_str(), "eDP-1:1920x1080+0+0");
    }

    #[tokio::test(start_paused = true)]
    async fn test_expected_fingerprint_in_any_monitor_order() {
        let display = FakeDisplayManager::with_monitors(laptop());
        *display.after_apply.lock() = vec![Some(docked())];
        let entry = ScreenLayoutEntry::Detailed {
            xrandr: "--output HDMI-1 --auto --right-of eDP-1".into(),
            expect: Some("eDP-1:1920x1080+0+0,HDMI-1:2560x1440+1920+0".into()),
        };

        let fp = switch_screens(&display, "docked", &entry, &SwitchConfig::default())
            .await
            .unwrap();
        assert_eq!(fp, ScreenFingerprint::from_monitors(&docked()).unwrap());
    }

    #[tokio::test]
    async fn test_malformed_expect_applies_nothing() {
        let display = FakeDisplayManager::with_monitors(laptop());
        let entry = ScreenLayoutEntry::Detailed {
            xrandr: "--output HDMI-1 --auto".into(),
            expect: Some("HDMI-1".into()),
        };

        let err = switch_screens(&display, "docked", &entry, &SwitchConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidFingerprint { .. }));
        assert!(display.applied().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_when_screens_never_change() {
        let display = FakeDisplayManager::with_monitors(laptop());
        let settings = SwitchConfig {
            timeout_secs: 2,
            ..SwitchConfig::default()
        };

        let err = switch_screens(&display, "docked", &entry(), &settings)
            .await
            .unwrap_err();
        assert!(matches!(err, LayoutError::ScreenSwitchTimedOut { .. }));
    }

    #[tokio::test]
    async fn test_no_screens_before_switch_is_fatal() {
        let display = FakeDisplayManager::with_monitors(Vec::new());
        let err = switch_screens(&display, "docked", &entry(), &SwitchConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LayoutError::NoScreensDetected));
        assert!(display.applied().is_empty());
    }
}

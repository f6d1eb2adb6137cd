use crate::error::LayoutError;
use crate::model::{KeyStrategy, ScreenFingerprint};
use crate::utils::split_args;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub paths: PathsConfig,
    pub matching: MatchingConfig,
    pub switch: SwitchConfig,
    #[serde(default)]
    pub screenlayouts: BTreeMap<String, ScreenLayoutEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PathsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MatchingConfig {
    pub key: KeyStrategy,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SwitchConfig {
    pub poll_interval_ms: u64,
    pub timeout_secs: u64,
    pub stable_polls: u32,
    pub notify: bool,
}

/// xrandr arguments for one named screen layout.
///
/// Either a bare argument string or a table with an expected fingerprint.
/// Every non-empty line runs as a separate xrandr call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ScreenLayoutEntry {
    Args(String),
    Detailed {
        xrandr: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expect: Option<String>,
    },
}

impl ScreenLayoutEntry {
    pub fn xrandr_calls(&self) -> Vec<&str> {
        let args = match self {
            ScreenLayoutEntry::Args(args) => args,
            ScreenLayoutEntry::Detailed { xrandr, .. } => xrandr,
        };
        args.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// The declared target fingerprint, in canonical order
    pub fn expected(&self) -> Result<Option<ScreenFingerprint>, LayoutError> {
        match self {
            ScreenLayoutEntry::Detailed {
                expect: Some(expect),
                ..
            } => ScreenFingerprint::parse(expect).map(Some),
            _ => Ok(None),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            timeout_secs: 10,
            stable_polls: 2,
            notify: false,
        }
    }
}

impl SwitchConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// `<config dir>/windowlayouts/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("windowlayouts")
            .join("config.toml")
    }

    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("WINDOWLAYOUTS_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("failed to load configuration from {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("invalid logging level: {}", self.logging.level),
        }

        if self.switch.poll_interval_ms < 50 {
            anyhow::bail!("switch.poll_interval_ms must be at least 50");
        }

        if self.switch.timeout_secs == 0 {
            anyhow::bail!("switch.timeout_secs must be greater than 0");
        }

        if self.switch.stable_polls == 0 {
            anyhow::bail!("switch.stable_polls must be greater than 0");
        }

        for (name, entry) in &self.screenlayouts {
            let calls = entry.xrandr_calls();
            if calls.is_empty() {
                anyhow::bail!("screen layout '{}' has no xrandr arguments", name);
            }
            for call in calls {
                split_args(call).with_context(|| format!("screen layout '{}'", name))?;
            }
            entry
                .expected()
                .with_context(|| format!("screen layout '{}' has an invalid expect", name))?;
        }

        Ok(())
    }

    pub fn screen_layout(&self, name: &str) -> Option<&ScreenLayoutEntry> {
        self.screenlayouts.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.matching.key, KeyStrategy::WindowId);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.switch.timeout_secs, 10);
        assert!(config.screenlayouts.is_empty());
    }

    #[test]
    fn test_load_screenlayouts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[matching]
key = "class"

[switch]
timeout_secs = 3

[screenlayouts]
laptop = "--output eDP-1 --auto --output HDMI-1 --off"

[screenlayouts.docked]
xrandr = """
--output HDMI-1 --auto --primary
--output eDP-1 --off
"""
expect = "HDMI-1:2560x1440+0+0"

[screenlayouts.both]
xrandr = "--output eDP-1 --auto --output HDMI-1 --auto --right-of eDP-1"
expect = "eDP-1:1920x1080+0+0,HDMI-1:2560x1440+1920+0"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.matching.key, KeyStrategy::Class);
        assert_eq!(config.switch.timeout_secs, 3);
        assert_eq!(config.switch.poll_interval_ms, 500);

        let laptop = config.screen_layout("laptop").unwrap();
        assert_eq!(laptop.xrandr_calls().len(), 1);
        assert_eq!(laptop.expected().unwrap(), None);

        let docked = config.screen_layout("docked").unwrap();
        assert_eq!(
            docked.xrandr_calls(),
            vec!["--output HDMI-1 --auto --primary", "--output eDP-1 --off"]
        );
        assert_eq!(
            docked.expected().unwrap().unwrap().as_str(),
            "HDMI-1:2560x1440+0+0"
        );

        let both = config.screen_layout("both").unwrap();
        assert_eq!(
            both.expected().unwrap().unwrap().as_str(),
            "HDMI-1:2560x1440+1920+0,eDP-1:1920x1080+0+0"
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.switch.poll_interval_ms = 10;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config
            .screenlayouts
            .insert("empty".to_string(), ScreenLayoutEntry::Args("  \n ".to_string()));
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.screenlayouts.insert(
            "docked".to_string(),
            ScreenLayoutEntry::Detailed {
                xrandr: "--output HDMI-1 --auto".to_string(),
                expect: Some("HDMI-1 2560x1440".to_string()),
            },
        );
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.screenlayouts.insert(
            "quoted".to_string(),
            ScreenLayoutEntry::Args("--output HDMI-1 --set \"scaling mode\" Full".to_string()),
        );
        assert!(config.validate().is_ok());
        config.screenlayouts.insert(
            "unterminated".to_string(),
            ScreenLayoutEntry::Args("--output HDMI-1 --set \"scaling mode Full".to_string()),
        );
        assert!(config.validate().is_err());
    }
}

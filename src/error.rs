use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("no screens detected")]
    NoScreensDetected,

    #[error("{tool} not found or not executable: {source}")]
    ToolMissing {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed: {message}")]
    ToolFailed { tool: String, message: String },

    #[error("unexpected {tool} output ({reason}): {line:?}")]
    Parse {
        tool: String,
        line: String,
        reason: String,
    },

    #[error("invalid screen fingerprint ({reason}): {value:?}")]
    InvalidFingerprint { value: String, reason: String },

    #[error("cannot split arguments ({reason}): {line:?}")]
    InvalidArguments { line: String, reason: String },

    #[error("screen layout '{name}' did not settle within {timeout:?}")]
    ScreenSwitchTimedOut { name: String, timeout: Duration },

    #[error("unknown screen layout '{0}'")]
    UnknownScreenLayout(String),

    #[error("store file {path:?} is unreadable: {source}")]
    StoreUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store file {path:?} is corrupt: {source}")]
    StoreCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write store file {path:?}: {source}")]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LayoutError {
    pub fn tool_failed(tool: &str, message: impl Into<String>) -> Self {
        LayoutError::ToolFailed {
            tool: tool.to_string(),
            message: message.into(),
        }
    }

    pub fn parse(tool: &str, line: &str, reason: impl Into<String>) -> Self {
        LayoutError::Parse {
            tool: tool.to_string(),
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;

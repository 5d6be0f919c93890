//! Panel configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DOWNLOAD_DIR: &str = ".";
pub const DEFAULT_COPY_FEEDBACK_MS: u64 = 2000;
pub const DEFAULT_SIDEBAR_MIN_ARTIFACTS: usize = 2;

/// Tuning knobs for the artifact panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    /// Directory that downloads are written into.
    pub download_dir: PathBuf,
    /// How long the "copied" indicator stays lit after a copy.
    pub copy_feedback: Duration,
    /// Minimum number of artifacts before the sidebar list is shown.
    pub sidebar_min_artifacts: usize,
    /// When set, `close()` hides the panel but keeps the focused artifact.
    pub close_keeps_focus: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            copy_feedback: Duration::from_millis(DEFAULT_COPY_FEEDBACK_MS),
            sidebar_min_artifacts: DEFAULT_SIDEBAR_MIN_ARTIFACTS,
            close_keeps_focus: false,
        }
    }
}

impl PanelConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `ARTIFACT_DOWNLOAD_DIR`: default `.`
    /// - `ARTIFACT_COPY_FEEDBACK_MS`: default 2000
    /// - `ARTIFACT_SIDEBAR_MIN`: default 2
    /// - `ARTIFACT_CLOSE_KEEPS_FOCUS`: default false
    #[must_use]
    pub fn from_env() -> Self {
        let download_dir = std::env::var("ARTIFACT_DOWNLOAD_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD_DIR), PathBuf::from);

        Self {
            download_dir,
            copy_feedback: Duration::from_millis(env_parse("ARTIFACT_COPY_FEEDBACK_MS", DEFAULT_COPY_FEEDBACK_MS)),
            sidebar_min_artifacts: env_parse("ARTIFACT_SIDEBAR_MIN", DEFAULT_SIDEBAR_MIN_ARTIFACTS),
            close_keeps_focus: env_parse("ARTIFACT_CLOSE_KEEPS_FOCUS", false),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

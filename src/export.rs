//! Copy and download side effects for the detail view.
//!
//! ERROR HANDLING
//! ==============
//! Both effects are best-effort: failures are logged and reported to the
//! caller as a flag, never propagated into store state. The fallible
//! variants (`Clipboard::set_text`, [`download`]) exist for callers that want
//! the error itself.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::artifact::Artifact;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// CLIPBOARD
// =============================================================================

/// Destination for copied text.
pub trait Clipboard {
    /// Replace the clipboard contents.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Clipboard`] when the clipboard rejects the write.
    fn set_text(&mut self, text: &str) -> Result<(), ExportError>;
}

/// Clipboard kept in process memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ExportError> {
        self.contents = Some(text.to_owned());
        Ok(())
    }
}

/// Short-lived "copied" indicator shown after a successful copy.
#[derive(Debug, Clone)]
pub struct CopyFeedback {
    duration: Duration,
    copied_at: Option<Instant>,
}

impl CopyFeedback {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self { duration, copied_at: None }
    }

    pub fn mark(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    #[must_use]
    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.saturating_duration_since(at) < self.duration)
    }
}

/// Copy an artifact's content. Returns `false` and logs on failure.
pub fn copy_to_clipboard(clipboard: &mut dyn Clipboard, artifact: &Artifact, feedback: &mut CopyFeedback) -> bool {
    match clipboard.set_text(&artifact.content) {
        Ok(()) => {
            feedback.mark(Instant::now());
            debug!(artifact_id = %artifact.id, bytes = artifact.content.len(), "artifact copied");
            true
        }
        Err(e) => {
            warn!(artifact_id = %artifact.id, error = %e, "copy to clipboard failed");
            false
        }
    }
}

// =============================================================================
// DOWNLOAD
// =============================================================================

/// Write an artifact's content into `dir` under its download file name.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the directory cannot be created or the
/// file cannot be written.
pub fn download(artifact: &Artifact, dir: &Path) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io { path: dir.to_path_buf(), source })?;
    let path = dir.join(artifact.download_file_name());
    std::fs::write(&path, artifact.content.as_bytes()).map_err(|source| ExportError::Io { path: path.clone(), source })?;
    debug!(artifact_id = %artifact.id, path = %path.display(), "artifact downloaded");
    Ok(path)
}

/// Best-effort [`download`]. Returns `None` and logs on failure.
#[must_use]
pub fn download_best_effort(artifact: &Artifact, dir: &Path) -> Option<PathBuf> {
    match download(artifact, dir) {
        Ok(path) => Some(path),
        Err(e) => {
            warn!(artifact_id = %artifact.id, error = %e, "artifact download failed");
            None
        }
    }
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;

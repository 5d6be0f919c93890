//! Artifact model: the content units shown beside the conversation.
//!
//! DESIGN
//! ======
//! An artifact is created once with an immutable id and kind, then mutated
//! only through [`ArtifactPatch`] merges applied by the store. Timestamps are
//! milliseconds since the Unix epoch, matching the frame timestamps used
//! elsewhere in the client.

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// KIND
// =============================================================================

/// Error returned when text does not name a known [`ArtifactKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown artifact kind: {0} (expected code, document, image, chart or component)")]
pub struct KindParseError(pub String);

/// Rendering family of an artifact. Fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Code,
    Document,
    Image,
    Chart,
    Component,
}

impl ArtifactKind {
    pub const ALL: [Self; 5] = [Self::Code, Self::Document, Self::Image, Self::Chart, Self::Component];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Document => "document",
            Self::Image => "image",
            Self::Chart => "chart",
            Self::Component => "component",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| KindParseError(s.to_owned()))
    }
}

// =============================================================================
// ARTIFACT
// =============================================================================

/// A generated content unit owned by the artifact store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: Uuid,
    pub kind: ArtifactKind,
    pub title: String,
    pub content: String,
    pub language: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    /// Milliseconds since the Unix epoch. Never below `created_at`.
    pub updated_at: i64,
}

/// Input for creating an artifact. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArtifact {
    pub kind: ArtifactKind,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub language: Option<String>,
}

impl NewArtifact {
    #[must_use]
    pub fn new(kind: ArtifactKind, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { kind, title: title.into(), content: content.into(), language: None }
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Partial update merged into an existing artifact.
///
/// `language` is doubly optional: `None` leaves it alone, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub language: Option<Option<String>>,
}

impl ArtifactPatch {
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), ..Self::default() }
    }

    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self { content: Some(content.into()), ..Self::default() }
    }

    #[must_use]
    pub fn language(language: Option<String>) -> Self {
        Self { language: Some(language), ..Self::default() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.language.is_none()
    }
}

impl Artifact {
    /// Build a fresh artifact with a new id and `created_at == updated_at == now`.
    #[must_use]
    pub(crate) fn create(data: NewArtifact, now: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: data.kind,
            title: data.title,
            content: data.content,
            language: data.language,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a patch and bump `updated_at` so it strictly increases.
    pub(crate) fn apply(&mut self, patch: ArtifactPatch, now: i64) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
        self.updated_at = now.max(self.updated_at.saturating_add(1));
    }

    /// Suggested file name for downloading this artifact.
    #[must_use]
    pub fn download_file_name(&self) -> String {
        download_file_name(&self.title, self.kind, self.language.as_deref())
    }
}

// =============================================================================
// FILE NAMES
// =============================================================================

/// Map an artifact's kind and language to a download extension.
#[must_use]
pub fn file_extension(kind: ArtifactKind, language: Option<&str>) -> &'static str {
    if kind != ArtifactKind::Code {
        return "txt";
    }
    match language {
        Some("javascript" | "js") => "js",
        Some("typescript" | "ts") => "ts",
        Some("python") => "py",
        Some("html") => "html",
        Some("css") => "css",
        Some("json") => "json",
        _ => "txt",
    }
}

/// Stem used when a title leaves nothing usable for a file name.
pub const DEFAULT_FILE_STEM: &str = "artifact";

/// Lowercase the title, collapse each whitespace run to `-`, append the extension.
///
/// Path separators and characters that file systems reject also become `-`,
/// and leading or trailing dots and dashes are trimmed, so the name always
/// stays a plain file inside the download directory.
#[must_use]
pub fn download_file_name(title: &str, kind: ArtifactKind, language: Option<&str>) -> String {
    let mut stem = String::with_capacity(title.len());
    let mut in_gap = false;
    for ch in title.chars() {
        if ch.is_whitespace() || ch.is_control() || matches!(ch, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
            if !in_gap {
                stem.push('-');
            }
            in_gap = true;
        } else {
            stem.extend(ch.to_lowercase());
            in_gap = false;
        }
    }
    let stem = stem.trim_matches(|c| c == '-' || c == '.');
    let stem = if stem.is_empty() { DEFAULT_FILE_STEM } else { stem };
    format!("{stem}.{}", file_extension(kind, language))
}

/// Current time as milliseconds since Unix epoch.
pub(crate) fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

#[cfg(test)]
#[path = "artifact_test.rs"]
mod tests;

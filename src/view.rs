//! Panel view models derived from a store snapshot.
//!
//! DESIGN
//! ======
//! Views are pure projections of a [`PanelSnapshot`]: the sidebar lists
//! artifacts in insertion order and marks the focused one, the detail view
//! renders the focused artifact by kind. Nothing here mutates the store.

use std::fmt::Write as _;

use uuid::Uuid;

use crate::artifact::{Artifact, ArtifactKind};
use crate::config::PanelConfig;
use crate::store::PanelSnapshot;

pub const EMPTY_PLACEHOLDER: &str = "No artifact selected";
const DEFAULT_CODE_LANGUAGE: &str = "text";

// =============================================================================
// SIDEBAR
// =============================================================================

/// One row of the artifact list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarEntry {
    pub id: Uuid,
    pub title: String,
    pub kind: ArtifactKind,
    pub language: Option<String>,
    pub focused: bool,
}

/// List every artifact in insertion order, marking the focused one.
#[must_use]
pub fn sidebar_entries(snapshot: &PanelSnapshot) -> Vec<SidebarEntry> {
    snapshot
        .artifacts
        .iter()
        .map(|a| SidebarEntry {
            id: a.id,
            title: a.title.clone(),
            kind: a.kind,
            language: a.language.clone(),
            focused: snapshot.is_focused(a.id),
        })
        .collect()
}

// =============================================================================
// DETAIL
// =============================================================================

/// Which tab of the detail view is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Kind-specific rendering.
    #[default]
    Preview,
    /// Raw content.
    Source,
}

/// Kind-specific rendering of an artifact's content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Preview {
    /// Syntax-tagged code block.
    Code { language: String, body: String },
    /// Prose with whitespace preserved.
    Document { body: String },
    /// Component source shown under a preview label.
    Component { body: String },
    /// Monospace raw text for kinds without a dedicated renderer.
    Raw { body: String },
}

impl Preview {
    #[must_use]
    pub fn of(artifact: &Artifact) -> Self {
        let body = artifact.content.clone();
        match artifact.kind {
            ArtifactKind::Code => Self::Code {
                language: artifact.language.clone().unwrap_or_else(|| DEFAULT_CODE_LANGUAGE.to_owned()),
                body,
            },
            ArtifactKind::Document => Self::Document { body },
            ArtifactKind::Component => Self::Component { body },
            ArtifactKind::Image | ArtifactKind::Chart => Self::Raw { body },
        }
    }

    #[must_use]
    pub fn body(&self) -> &str {
        match self {
            Self::Code { body, .. } | Self::Document { body } | Self::Component { body } | Self::Raw { body } => body,
        }
    }
}

/// Header badges plus the active tab's content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailView {
    pub id: Uuid,
    pub title: String,
    pub kind: ArtifactKind,
    pub language: Option<String>,
    pub mode: ViewMode,
    pub preview: Preview,
}

impl DetailView {
    #[must_use]
    pub fn new(artifact: &Artifact, mode: ViewMode) -> Self {
        let preview = match mode {
            ViewMode::Preview => Preview::of(artifact),
            ViewMode::Source => Preview::Raw { body: artifact.content.clone() },
        };
        Self {
            id: artifact.id,
            title: artifact.title.clone(),
            kind: artifact.kind,
            language: artifact.language.clone(),
            mode,
            preview,
        }
    }
}

// =============================================================================
// PANEL
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelView {
    Closed,
    Open {
        /// `None` when there are too few artifacts to warrant a list.
        sidebar: Option<Vec<SidebarEntry>>,
        /// `None` renders the empty-state placeholder.
        detail: Option<DetailView>,
    },
}

impl PanelView {
    #[must_use]
    pub fn build(snapshot: &PanelSnapshot, config: &PanelConfig, mode: ViewMode) -> Self {
        if !snapshot.panel_open {
            return Self::Closed;
        }
        let sidebar =
            (snapshot.artifacts.len() >= config.sidebar_min_artifacts).then(|| sidebar_entries(snapshot));
        let detail = snapshot.focused().map(|a| DetailView::new(a, mode));
        Self::Open { sidebar, detail }
    }
}

/// Plain-text rendering of the panel for terminal output.
#[must_use]
pub fn render_text(view: &PanelView) -> String {
    let PanelView::Open { sidebar, detail } = view else {
        return "[artifacts closed]\n".to_owned();
    };

    let mut out = String::from("== Artifacts ==\n");
    if let Some(entries) = sidebar {
        for entry in entries {
            let marker = if entry.focused { '>' } else { ' ' };
            let _ = write!(out, "{marker} {} [{}", short_id(entry.id), entry.kind);
            if let Some(language) = &entry.language {
                let _ = write!(out, ", {language}");
            }
            let _ = writeln!(out, "] {}", entry.title);
        }
        out.push_str("--\n");
    }

    let Some(detail) = detail else {
        let _ = writeln!(out, "{EMPTY_PLACEHOLDER}");
        return out;
    };

    let _ = write!(out, "{} [{}", detail.title, detail.kind);
    if let Some(language) = &detail.language {
        let _ = write!(out, ", {language}");
    }
    out.push_str("]\n");
    match &detail.preview {
        Preview::Code { language, body } => {
            let _ = writeln!(out, "```{language}\n{body}\n```");
        }
        Preview::Component { body } => {
            let _ = writeln!(out, "Component Preview:\n{body}");
        }
        Preview::Document { body } | Preview::Raw { body } => {
            let _ = writeln!(out, "{body}");
        }
    }
    out
}

/// First eight hex digits of an id, for compact listings.
#[must_use]
pub fn short_id(id: Uuid) -> String {
    id.simple().to_string()[..8].to_owned()
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;

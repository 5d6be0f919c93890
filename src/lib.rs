//! Artifact side panel for an LLM chat client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Assistant replies produce artifacts (code, documents, images, charts,
//! components) that are shown beside the conversation. This crate owns the
//! in-memory lifecycle of those artifacts for one session, the view models
//! the panel renders from, and the copy/download side effects.

pub mod artifact;
pub mod config;
pub mod context;
pub mod export;
pub mod extract;
pub mod intent;
pub mod provider;
pub mod store;
pub mod view;

pub use artifact::{Artifact, ArtifactKind, ArtifactPatch, NewArtifact, download_file_name, file_extension};
pub use config::PanelConfig;
pub use context::{Context, ContextError};
pub use provider::{ArtifactHandle, ArtifactProvider, try_use_artifacts, use_artifacts};
pub use store::{ArtifactStore, PanelSnapshot, SubscriberId};

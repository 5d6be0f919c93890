//! Artifact store holding the collection, focus, and panel visibility.
//!
//! DESIGN
//! ======
//! The store owns one immutable [`PanelSnapshot`] behind an `Arc`. Each
//! mutating operation derives the next snapshot, installs it, and publishes
//! that same `Arc` to every subscriber before returning. Subscribers therefore
//! observe whole revisions only, and all of them observe the same revision for
//! a given mutation.
//!
//! Focus is stored as an id and resolved against the collection on read, so a
//! focused artifact can never drift from its stored copy or outlive removal.
//!
//! ERROR HANDLING
//! ==============
//! Operations are total. Unknown ids are no-ops and do not publish.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::artifact::{Artifact, ArtifactPatch, NewArtifact, now_ms};
use crate::config::PanelConfig;

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Read-only view of the store at one revision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PanelSnapshot {
    /// Artifacts in insertion order.
    pub artifacts: Vec<Artifact>,
    /// Id of the focused artifact. Always present in `artifacts` when set.
    pub focused: Option<Uuid>,
    /// Whether the side panel is rendered.
    pub panel_open: bool,
    /// Incremented on every published mutation.
    pub revision: u64,
}

impl PanelSnapshot {
    /// Resolve the focused artifact, if any.
    #[must_use]
    pub fn focused(&self) -> Option<&Artifact> {
        self.focused.and_then(|id| self.get(id))
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: Uuid) -> bool {
        self.artifacts.iter().any(|a| a.id == id)
    }

    #[must_use]
    pub fn is_focused(&self, id: Uuid) -> bool {
        self.focused == Some(id)
    }
}

// =============================================================================
// SUBSCRIBERS
// =============================================================================

/// Synchronous change listener. Runs inside the mutating call.
pub type Listener = Box<dyn FnMut(&Arc<PanelSnapshot>) + Send>;

/// Handle returned by [`ArtifactStore::subscribe`] and [`ArtifactStore::watch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

enum Subscriber {
    Listener(Listener),
    Channel(mpsc::UnboundedSender<Arc<PanelSnapshot>>),
}

// =============================================================================
// STORE
// =============================================================================

/// In-memory artifact store for one chat session.
pub struct ArtifactStore {
    snapshot: Arc<PanelSnapshot>,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_subscriber: u64,
    close_keeps_focus: bool,
    clock: fn() -> i64,
}

impl fmt::Debug for ArtifactStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactStore")
            .field("snapshot", &self.snapshot)
            .field("subscribers", &self.subscribers.len())
            .field("close_keeps_focus", &self.close_keeps_focus)
            .finish_non_exhaustive()
    }
}

impl Default for ArtifactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactStore {
    /// Empty store: no artifacts, no focus, panel closed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshot: Arc::new(PanelSnapshot::default()),
            subscribers: Vec::new(),
            next_subscriber: 0,
            close_keeps_focus: false,
            clock: now_ms,
        }
    }

    #[must_use]
    pub fn with_config(config: &PanelConfig) -> Self {
        Self { close_keeps_focus: config.close_keeps_focus, ..Self::new() }
    }

    #[cfg(test)]
    pub(crate) fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Current snapshot. Cheap to clone and safe to hold across mutations.
    #[must_use]
    pub fn snapshot(&self) -> Arc<PanelSnapshot> {
        Arc::clone(&self.snapshot)
    }

    #[must_use]
    pub fn artifacts(&self) -> &[Artifact] {
        &self.snapshot.artifacts
    }

    #[must_use]
    pub fn focused(&self) -> Option<&Artifact> {
        self.snapshot.focused()
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Artifact> {
        self.snapshot.get(id)
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.snapshot.panel_open
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot.artifacts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot.artifacts.is_empty()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Append a new artifact, focus it, and open the panel.
    pub fn create(&mut self, data: NewArtifact) -> Artifact {
        let artifact = Artifact::create(data, (self.clock)());
        debug!(artifact_id = %artifact.id, kind = %artifact.kind, "artifact created");

        let next = Arc::make_mut(&mut self.snapshot);
        next.artifacts.push(artifact.clone());
        next.focused = Some(artifact.id);
        next.panel_open = true;
        self.publish();
        artifact
    }

    /// Merge `patch` into the artifact with `id`. Unknown ids and empty
    /// patches are ignored.
    pub fn update(&mut self, id: Uuid, patch: ArtifactPatch) {
        if !self.snapshot.contains(id) {
            debug!(artifact_id = %id, "update ignored: unknown artifact");
            return;
        }
        if patch.is_empty() {
            debug!(artifact_id = %id, "update ignored: empty patch");
            return;
        }
        let now = (self.clock)();
        let next = Arc::make_mut(&mut self.snapshot);
        if let Some(artifact) = next.artifacts.iter_mut().find(|a| a.id == id) {
            artifact.apply(patch, now);
            debug!(artifact_id = %id, updated_at = artifact.updated_at, "artifact updated");
        }
        self.publish();
    }

    /// Drop the artifact with `id`. Removing the focused artifact clears focus
    /// and closes the panel.
    pub fn remove(&mut self, id: Uuid) {
        let Some(index) = self.snapshot.artifacts.iter().position(|a| a.id == id) else {
            debug!(artifact_id = %id, "remove ignored: unknown artifact");
            return;
        };
        let next = Arc::make_mut(&mut self.snapshot);
        next.artifacts.remove(index);
        if next.focused == Some(id) {
            next.focused = None;
            next.panel_open = false;
        }
        debug!(artifact_id = %id, "artifact removed");
        self.publish();
    }

    /// Focus the artifact with `id` and open the panel. Unknown ids are ignored.
    pub fn select(&mut self, id: Uuid) {
        if !self.snapshot.contains(id) {
            debug!(artifact_id = %id, "select ignored: unknown artifact");
            return;
        }
        let next = Arc::make_mut(&mut self.snapshot);
        next.focused = Some(id);
        next.panel_open = true;
        self.publish();
    }

    /// Hide the panel. Focus is cleared unless the store keeps focus on close.
    pub fn close(&mut self) {
        let keep = self.close_keeps_focus;
        let next = Arc::make_mut(&mut self.snapshot);
        next.panel_open = false;
        if !keep {
            next.focused = None;
        }
        self.publish();
    }

    /// Show the panel without touching focus.
    pub fn open(&mut self) {
        Arc::make_mut(&mut self.snapshot).panel_open = true;
        self.publish();
    }

    // -------------------------------------------------------------------------
    // Subscriptions
    // -------------------------------------------------------------------------

    /// Register a listener called synchronously after every mutation.
    ///
    /// A panicking listener does not stop delivery: the remaining subscribers
    /// still receive the snapshot, then the first panic resumes in the caller.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriberId
    where
        F: FnMut(&Arc<PanelSnapshot>) + Send + 'static,
    {
        let id = self.next_id();
        self.subscribers.push((id, Subscriber::Listener(Box::new(listener))));
        id
    }

    /// Register a channel subscriber. Each mutation enqueues its snapshot
    /// before the mutating call returns.
    pub fn watch(&mut self) -> (SubscriberId, mpsc::UnboundedReceiver<Arc<PanelSnapshot>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.next_id();
        self.subscribers.push((id, Subscriber::Channel(tx)));
        (id, rx)
    }

    /// Remove a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Drop every subscriber, closing all snapshot channels. Returns how many were removed.
    pub fn clear_subscribers(&mut self) -> usize {
        let count = self.subscribers.len();
        self.subscribers.clear();
        count
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn next_id(&mut self) -> SubscriberId {
        self.next_subscriber += 1;
        SubscriberId(self.next_subscriber)
    }

    fn publish(&mut self) {
        Arc::make_mut(&mut self.snapshot).revision += 1;
        let snapshot = Arc::clone(&self.snapshot);
        let mut first_panic = None;
        self.subscribers.retain_mut(|(id, subscriber)| match subscriber {
            Subscriber::Listener(listener) => {
                if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| listener(&snapshot))) {
                    warn!(subscriber = id.0, revision = snapshot.revision, "snapshot listener panicked");
                    first_panic.get_or_insert(payload);
                }
                true
            }
            Subscriber::Channel(tx) => {
                if tx.send(Arc::clone(&snapshot)).is_err() {
                    debug!(subscriber = id.0, "dropping closed snapshot channel");
                    return false;
                }
                true
            }
        });
        if let Some(payload) = first_panic {
            panic::resume_unwind(payload);
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

//! Session-scoped provisioning of the artifact store.
//!
//! DESIGN
//! ======
//! `ArtifactProvider::mount` builds one store per session and places an
//! [`ArtifactHandle`] in the session [`Context`]. Consumers fetch it with
//! [`use_artifacts`]; asking outside a mounted provider is a wiring bug and
//! panics immediately. `unmount` removes the handle and drops every
//! subscriber so watch channels close with the session.
//!
//! The handle serializes access through a mutex. Listeners registered with
//! [`ArtifactHandle::subscribe`] run while that mutex is held and must not
//! call back into the handle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use crate::artifact::{Artifact, ArtifactPatch, NewArtifact};
use crate::config::PanelConfig;
use crate::context::{Context, ContextError};
use crate::store::{ArtifactStore, PanelSnapshot, SubscriberId};

// =============================================================================
// HANDLE
// =============================================================================

/// Shared handle to a session's artifact store.
#[derive(Clone, Debug)]
pub struct ArtifactHandle {
    store: Arc<Mutex<ArtifactStore>>,
    config: Arc<PanelConfig>,
}

impl ArtifactHandle {
    #[must_use]
    pub fn new(config: PanelConfig) -> Self {
        Self { store: Arc::new(Mutex::new(ArtifactStore::with_config(&config))), config: Arc::new(config) }
    }

    fn lock(&self) -> MutexGuard<'_, ArtifactStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    #[must_use]
    pub fn snapshot(&self) -> Arc<PanelSnapshot> {
        self.lock().snapshot()
    }

    pub fn create(&self, data: NewArtifact) -> Artifact {
        self.lock().create(data)
    }

    pub fn update(&self, id: Uuid, patch: ArtifactPatch) {
        self.lock().update(id, patch);
    }

    pub fn remove(&self, id: Uuid) {
        self.lock().remove(id);
    }

    pub fn select(&self, id: Uuid) {
        self.lock().select(id);
    }

    pub fn close(&self) {
        self.lock().close();
    }

    pub fn open(&self) {
        self.lock().open();
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriberId
    where
        F: FnMut(&Arc<PanelSnapshot>) + Send + 'static,
    {
        self.lock().subscribe(listener)
    }

    pub fn watch(&self) -> (SubscriberId, mpsc::UnboundedReceiver<Arc<PanelSnapshot>>) {
        self.lock().watch()
    }

    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.lock().unsubscribe(id)
    }

    /// True when both handles point at the same store.
    #[must_use]
    pub fn same_store(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }
}

// =============================================================================
// PROVIDER
// =============================================================================

pub struct ArtifactProvider;

impl ArtifactProvider {
    /// Create the session's store and provide it. Remounting replaces the
    /// previous store and closes its subscribers.
    pub fn mount(cx: &mut Context, config: PanelConfig) -> ArtifactHandle {
        let handle = ArtifactHandle::new(config);
        if let Some(previous) = cx.provide(handle.clone()) {
            let dropped = previous.lock().clear_subscribers();
            info!(dropped, "artifact provider remounted");
        } else {
            info!("artifact provider mounted");
        }
        handle
    }

    /// Tear down the session's store. Returns `false` if nothing was mounted.
    pub fn unmount(cx: &mut Context) -> bool {
        let Some(handle) = cx.remove::<ArtifactHandle>() else {
            return false;
        };
        let dropped = handle.lock().clear_subscribers();
        info!(dropped, "artifact provider unmounted");
        true
    }
}

/// Fetch the mounted artifact store.
///
/// # Errors
///
/// Returns [`ContextError::MissingProvider`] when no provider is mounted.
pub fn try_use_artifacts(cx: &Context) -> Result<ArtifactHandle, ContextError> {
    cx.use_context::<ArtifactHandle>()
        .ok_or(ContextError::MissingProvider { consumer: "use_artifacts", provider: "ArtifactProvider" })
}

/// Fetch the mounted artifact store.
///
/// # Panics
///
/// Panics when called outside a mounted [`ArtifactProvider`].
#[must_use]
pub fn use_artifacts(cx: &Context) -> ArtifactHandle {
    match try_use_artifacts(cx) {
        Ok(handle) => handle,
        Err(err) => panic!("{err}"),
    }
}

#[cfg(test)]
#[path = "provider_test.rs"]
mod tests;

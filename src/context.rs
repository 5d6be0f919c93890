//! Type-keyed context for a mounted session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views receive shared state by type from the session that mounted it,
//! rather than reaching for process-wide globals. A value lives in the
//! context from `provide` until `remove`.

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Error returned when a consumer asks for a value nobody provided.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("{consumer} must be used within an {provider}")]
    MissingProvider { consumer: &'static str, provider: &'static str },
}

#[derive(Default)]
pub struct Context {
    values: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context").field("values", &self.values.len()).finish()
    }
}

impl Context {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide a value, returning the one it replaced.
    pub fn provide<T>(&mut self, value: T) -> Option<T>
    where
        T: Send + Sync + 'static,
    {
        self.values
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    /// Clone the provided value of type `T`, if any.
    #[must_use]
    pub fn use_context<T>(&self) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
    }

    pub fn remove<T>(&mut self) -> Option<T>
    where
        T: Send + Sync + 'static,
    {
        self.values
            .remove(&TypeId::of::<T>())
            .and_then(|value| value.downcast::<T>().ok())
            .map(|value| *value)
    }

    #[must_use]
    pub fn contains<T: 'static>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<T>())
    }
}

//! Registry of custom model-streaming backends.
//!
//! Hosts (plugins, extensions) register streaming backends under provider
//! identifiers. Every registration is tagged with the registering source,
//! and only that source may replace or remove the entry; unloading a
//! source removes everything it registered in one call. The table is
//! `RwLock`-guarded so registration and removal are safe from multiple
//! threads.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// A model-streaming backend installed by a host.
///
/// The registry stores backends opaquely; actual request/stream I/O lives
/// with the implementor, outside this crate.
pub trait StreamingBackend: Send + Sync {
    /// Provider identifier advertised to the model layer, e.g. "anthropic".
    fn provider(&self) -> &str;

    /// Base URL of the streaming API endpoint.
    fn base_url(&self) -> &str;
}

/// Errors from backend registration and removal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BackendRegistryError {
    #[error("Backend '{id}' is already registered by source '{owner}'")]
    AlreadyRegistered { id: String, owner: String },

    #[error("Backend '{id}' is not registered")]
    NotRegistered { id: String },

    #[error("Backend '{id}' is owned by source '{owner}', not '{caller}'")]
    NotOwner {
        id: String,
        owner: String,
        caller: String,
    },
}

struct Entry {
    source: String,
    backend: Arc<dyn StreamingBackend>,
}

/// Ownership-checked registry of streaming backends.
#[derive(Default)]
pub struct BackendRegistry {
    entries: RwLock<HashMap<String, Entry>>,
}

impl std::fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.entries.read().unwrap();
        f.debug_struct("BackendRegistry")
            .field("ids", &entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl BackendRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend under `id` on behalf of `source`.
    ///
    /// Re-registering an id the same source already owns replaces the
    /// backend; an id owned by a different source is an error.
    pub fn register(
        &self,
        source: &str,
        id: &str,
        backend: Arc<dyn StreamingBackend>,
    ) -> Result<(), BackendRegistryError> {
        let mut entries = self.entries.write().unwrap();
        if let Some(existing) = entries.get(id)
            && existing.source != source
        {
            return Err(BackendRegistryError::AlreadyRegistered {
                id: id.to_string(),
                owner: existing.source.clone(),
            });
        }
        entries.insert(
            id.to_string(),
            Entry {
                source: source.to_string(),
                backend,
            },
        );
        Ok(())
    }

    /// Remove a single backend; the caller must be the owning source.
    pub fn remove(&self, source: &str, id: &str) -> Result<(), BackendRegistryError> {
        let mut entries = self.entries.write().unwrap();
        match entries.get(id) {
            None => Err(BackendRegistryError::NotRegistered { id: id.to_string() }),
            Some(entry) if entry.source != source => Err(BackendRegistryError::NotOwner {
                id: id.to_string(),
                owner: entry.source.clone(),
                caller: source.to_string(),
            }),
            Some(_) => {
                entries.remove(id);
                Ok(())
            }
        }
    }

    /// Remove every backend the given source registered. Returns how many
    /// entries were removed.
    pub fn remove_source(&self, source: &str) -> usize {
        let mut entries = self.entries.write().unwrap();
        let before = entries.len();
        entries.retain(|_, entry| entry.source != source);
        before - entries.len()
    }

    /// Look up a backend by id.
    pub fn get(&self, id: &str) -> Option<Arc<dyn StreamingBackend>> {
        self.entries
            .read()
            .unwrap()
            .get(id)
            .map(|entry| entry.backend.clone())
    }

    /// All registered ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.read().unwrap().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of registered backends.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}

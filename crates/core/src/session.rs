//! Session storage seen by authorizers.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::id::SessionId;

/// Backing store for a single user session.
///
/// Values are stored as JSON so that any adapter (cookie, cache, database) can
/// persist them without knowing the concrete types.
pub trait SessionStore {
    /// Identifier of the current session, if one has been created.
    fn session_id(&self) -> Option<SessionId>;

    fn get(&self, key: &str) -> Option<Value>;

    /// Store a value, creating the session if it does not exist yet.
    fn set(&mut self, key: &str, value: Value);

    fn remove(&mut self, key: &str) -> Option<Value>;

    /// Issue a fresh session identifier while keeping the stored values.
    fn renew(&mut self) -> SessionId;
}

/// Read and decode a typed session value.
///
/// `Ok(None)` when the key is absent; an error when the stored JSON does not
/// match `T`.
pub fn read_value<T: DeserializeOwned>(
    store: &dyn SessionStore,
    key: &str,
) -> CoreResult<Option<T>> {
    match store.get(key) {
        None => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| CoreError::session_value(key, &e)),
    }
}

/// Encode and store a typed session value.
pub fn write_value<T: Serialize>(
    store: &mut dyn SessionStore,
    key: &str,
    value: &T,
) -> CoreResult<()> {
    let json = serde_json::to_value(value).map_err(|e| CoreError::session_value(key, &e))?;
    store.set(key, json);
    Ok(())
}

/// Process-local [`SessionStore`] for a single session.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    id: Option<SessionId>,
    values: BTreeMap<String, Value>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    fn session_id(&self) -> Option<SessionId> {
        self.id
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        if self.id.is_none() {
            let id = SessionId::new();
            tracing::trace!(session_id = %id, "session created");
            self.id = Some(id);
        }
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    fn renew(&mut self) -> SessionId {
        let id = SessionId::new();
        tracing::trace!(previous = ?self.id, session_id = %id, "session renewed");
        self.id = Some(id);
        id
    }
}

//! Session-isolated storage abstractions.

use std::collections::HashMap;
use std::sync::RwLock;

use quickorder_core::SessionId;

/// Session-isolated value store (one value per visitor session).
pub trait SessionStore<V>: Send + Sync {
    fn get(&self, session_id: SessionId) -> Option<V>;

    /// Read-modify-write the session's value, starting from `V::default()`.
    fn update<R>(&self, session_id: SessionId, f: impl FnOnce(&mut V) -> R) -> Option<R>
    where
        V: Default;
}

/// In-memory session store for tests/dev.
#[derive(Debug)]
pub struct InMemorySessionStore<V> {
    inner: RwLock<HashMap<SessionId, V>>,
}

impl<V> InMemorySessionStore<V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<V> Default for InMemorySessionStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SessionStore<V> for InMemorySessionStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, session_id: SessionId) -> Option<V> {
        let map = self.inner.read().ok()?;
        map.get(&session_id).cloned()
    }

    fn update<R>(&self, session_id: SessionId, f: impl FnOnce(&mut V) -> R) -> Option<R>
    where
        V: Default,
    {
        let mut map = self.inner.write().ok()?;
        Some(f(map.entry(session_id).or_default()))
    }
}

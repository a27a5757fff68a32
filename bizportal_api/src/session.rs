//! Session context: the bearer token and the user record derived from it.

use std::sync::Arc;

use dashmap::DashMap;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the JSON-encoded user record returned at login.
pub const USER_KEY: &str = "user";
/// Storage key holding the `"true"` authenticated flag.
pub const AUTHENTICATED_KEY: &str = "isAuthenticated";

/// Synchronous key-value storage backing a [`Session`].
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// Process-local store backed by `DashMap` for concurrent access.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: DashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.remove(key);
    }
}

/// Shared handle to the current session.
///
/// Cloning is cheap; all clones observe the same store. The pipeline reads the
/// token on every request and clears the session when the backend rejects it.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// A session backed by a fresh [`MemorySessionStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Current bearer token. Empty strings count as no token.
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// User record stored at login, if it is still present and decodes.
    pub fn user(&self) -> Option<serde_json::Value> {
        self.store
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    /// Starts a session, replacing any previous token.
    pub fn begin(&self, token: &str, user: Option<&serde_json::Value>) {
        self.store.set(TOKEN_KEY, token.to_string());
        match user {
            Some(user) => self.store.set(USER_KEY, user.to_string()),
            None => self.store.remove(USER_KEY),
        }
        self.store.set(AUTHENTICATED_KEY, "true".to_string());
    }

    /// Removes the token and all derived keys.
    ///
    /// Returns `true` if a token was present. Clearing an already cleared
    /// session touches nothing.
    pub fn clear(&self) -> bool {
        if self.token().is_none() {
            return false;
        }
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
        self.store.remove(AUTHENTICATED_KEY);
        true
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

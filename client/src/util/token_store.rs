//! Persisted session token + cached user record.
//!
//! SYSTEM CONTEXT
//! ==============
//! Single source of truth for "is this client signed in". Login pages write
//! to it, the session gate reads from it, and any mounted component can
//! subscribe to changes instead of polling.
//!
//! DESIGN
//! ======
//! - Backed by an injected `KeyValueStorage`; `TokenStore::browser()` uses
//!   `localStorage`, tests use `MemoryStorage`.
//! - Reads never fail. Missing storage, an empty token or an unparseable
//!   user record all read back as `None`. Corrupt records are left in place.
//! - Listeners receive a `StoreEvent` hint only. Delivery order across
//!   listeners is unspecified; each listener re-reads the store.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::net::types::{AuthPayload, User};
use crate::util::storage::{KeyValueStorage, LocalStorage, MemoryStorage};

pub const TOKEN_KEY: &str = "answer24_token";
pub const USER_KEY: &str = "answer24_user";

/// What changed in the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    TokenChanged,
    UserChanged,
    SignedIn,
    Cleared,
}

/// Handle returned by [`TokenStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(StoreEvent) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

/// Session token store. Cheap to clone; clones share storage and listeners.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn KeyValueStorage>,
    listeners: Arc<Mutex<Listeners>>,
}

impl TokenStore {
    pub fn new(storage: impl KeyValueStorage + 'static) -> Self {
        Self { storage: Arc::new(storage), listeners: Arc::new(Mutex::new(Listeners::default())) }
    }

    /// Store backed by browser `localStorage`.
    #[must_use]
    pub fn browser() -> Self {
        Self::new(LocalStorage)
    }

    /// Store backed by a fresh in-memory map.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    // =========================================================================
    // TOKEN
    // =========================================================================

    pub fn set_token(&self, token: &str) {
        self.storage.set_item(TOKEN_KEY, token);
        self.notify(StoreEvent::TokenChanged);
    }

    /// Persisted token, or `None` when absent, empty, or storage is unavailable.
    #[must_use]
    pub fn get_token(&self) -> Option<String> {
        self.storage
            .get_item(TOKEN_KEY)
            .filter(|token| !token.trim().is_empty())
    }

    /// Clear token and user record together. Idempotent.
    pub fn remove_token(&self) {
        self.storage.remove_item(TOKEN_KEY);
        self.storage.remove_item(USER_KEY);
        self.notify(StoreEvent::Cleared);
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }

    // =========================================================================
    // USER
    // =========================================================================

    /// Replace the cached user record wholesale.
    pub fn set_user(&self, user: &User) {
        if self.write_user(user) {
            self.notify(StoreEvent::UserChanged);
        }
    }

    /// Cached user record. Unparseable data reads as `None` and is not repaired.
    #[must_use]
    pub fn get_user(&self) -> Option<User> {
        let raw = self.storage.get_item(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("ignoring unreadable cached user record: {e}");
                None
            }
        }
    }

    // =========================================================================
    // SESSION
    // =========================================================================

    /// Persist a login/registration result. Listeners hear one `SignedIn`.
    pub fn sign_in(&self, payload: &AuthPayload) {
        self.storage.set_item(TOKEN_KEY, &payload.token);
        if !self.write_user(&payload.user) {
            self.storage.remove_item(USER_KEY);
        }
        self.notify(StoreEvent::SignedIn);
    }

    /// Token and user together, or `None` unless both are present.
    #[must_use]
    pub fn session(&self) -> Option<(String, User)> {
        let token = self.get_token()?;
        let user = self.get_user()?;
        Some((token, user))
    }

    // =========================================================================
    // SUBSCRIPTIONS
    // =========================================================================

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(StoreEvent) + Send + Sync + 'static,
    {
        let mut listeners = self.listeners();
        listeners.next_id += 1;
        let id = SubscriptionId(listeners.next_id);
        listeners.entries.push((id, Arc::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners();
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry_id, _)| *entry_id != id);
        listeners.entries.len() != before
    }

    fn write_user(&self, user: &User) -> bool {
        match serde_json::to_string(user) {
            Ok(raw) => {
                self.storage.set_item(USER_KEY, &raw);
                true
            }
            Err(e) => {
                log::warn!("failed to serialize user record: {e}");
                false
            }
        }
    }

    fn notify(&self, event: StoreEvent) {
        // Snapshot first so listeners may subscribe or read the store re-entrantly.
        let snapshot: Vec<Listener> = self
            .listeners()
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(event);
        }
    }

    fn listeners(&self) -> MutexGuard<'_, Listeners> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

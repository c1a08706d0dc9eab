use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

fn memory_store() -> (TokenStore, MemoryStorage) {
    let storage = MemoryStorage::new();
    (TokenStore::new(storage.clone()), storage)
}

fn ann() -> User {
    User::with_id("1").with("name", "Ann")
}

// =============================================================
// Token
// =============================================================

#[test]
fn token_round_trips() {
    let store = TokenStore::in_memory();
    assert_eq!(store.get_token(), None);
    assert!(!store.is_authenticated());

    store.set_token("abc123");
    assert_eq!(store.get_token().as_deref(), Some("abc123"));
    assert!(store.is_authenticated());
}

#[test]
fn blank_token_reads_as_absent() {
    let store = TokenStore::in_memory();
    store.set_token("   ");
    assert_eq!(store.get_token(), None);
    assert!(!store.is_authenticated());
}

#[test]
fn is_authenticated_only_needs_token() {
    let store = TokenStore::in_memory();
    store.set_token("abc123");
    assert!(store.is_authenticated());
    assert!(store.session().is_none());
}

#[test]
fn remove_token_clears_token_and_user() {
    let store = TokenStore::in_memory();
    store.set_token("abc123");
    store.set_user(&ann());

    store.remove_token();
    assert_eq!(store.get_token(), None);
    assert_eq!(store.get_user(), None);
}

#[test]
fn remove_token_twice_matches_once() {
    let (store, storage) = memory_store();
    store.set_token("abc123");
    store.set_user(&ann());

    store.remove_token();
    let after_once = (storage.get_item(TOKEN_KEY), storage.get_item(USER_KEY));
    store.remove_token();
    let after_twice = (storage.get_item(TOKEN_KEY), storage.get_item(USER_KEY));

    assert_eq!(after_once, (None, None));
    assert_eq!(after_once, after_twice);
}

// =============================================================
// User
// =============================================================

#[test]
fn user_round_trips_structurally() {
    let store = TokenStore::in_memory();
    let user = ann()
        .with("role", "partner")
        .with("wallet", serde_json::json!({"balance": 10, "currency": "EUR"}));

    store.set_user(&user);
    assert_eq!(store.get_user(), Some(user));
}

#[test]
fn set_user_replaces_wholesale() {
    let store = TokenStore::in_memory();
    store.set_user(&ann().with("email", "ann@example.com"));

    store.set_user(&User::with_id("1"));
    let cached = store.get_user().unwrap();
    assert_eq!(cached.email(), None);
    assert_eq!(cached.name(), None);
    assert_eq!(cached, User::with_id("1"));
}

#[test]
fn corrupt_user_record_reads_as_none_and_is_left_in_place() {
    let (store, storage) = memory_store();
    storage.set_item(USER_KEY, "{not json");

    assert_eq!(store.get_user(), None);
    assert_eq!(storage.get_item(USER_KEY).as_deref(), Some("{not json"));
}

#[test]
fn structured_role_keeps_session_alive() {
    let (store, storage) = memory_store();
    storage.set_item(TOKEN_KEY, "abc123");
    storage.set_item(USER_KEY, r#"{"id":"1","name":"Ann","role":{"slug":"customer"}}"#);

    let user = store.get_user().unwrap();
    assert_eq!(user.name(), Some("Ann"));
    assert_eq!(user.role(), None);
    assert!(store.session().is_some());
}

#[test]
fn user_without_id_or_string_name_still_reads_back() {
    let (store, storage) = memory_store();
    storage.set_item(USER_KEY, r#"{"name":{"first":"Ann","last":"Lee"},"uuid":"u-9"}"#);

    let user = store.get_user().unwrap();
    assert_eq!(user.id(), None);
    assert_eq!(user.name(), None);
}

#[test]
fn round_trip_is_lossless_for_any_object() {
    let store = TokenStore::in_memory();
    let raw = serde_json::json!({
        "id": 42,
        "name": "Ann",
        "role": {"slug": "partner", "level": 2},
        "email": null,
        "tags": ["a", "b"],
    });
    let user: User = serde_json::from_value(raw.clone()).unwrap();

    store.set_user(&user);
    let back = store.get_user().unwrap();
    assert_eq!(back, user);
    assert_eq!(serde_json::to_value(&back).unwrap(), raw);
}

#[test]
fn later_field_writes_replace_earlier_ones() {
    let store = TokenStore::in_memory();
    let user = User::with_id("1").with("name", "Ann").with("name", "Annie").with("id", 7);

    store.set_user(&user);
    let back = store.get_user().unwrap();
    assert_eq!(back, user);
    assert_eq!(back.name(), Some("Annie"));
    assert_eq!(back.id().as_deref(), Some("7"));
}

#[test]
fn session_requires_token_and_user() {
    let store = TokenStore::in_memory();
    store.set_user(&ann());
    assert!(store.session().is_none());

    store.set_token("abc123");
    let (token, user) = store.session().unwrap();
    assert_eq!(token, "abc123");
    assert_eq!(user, ann());
}

#[test]
fn sign_in_stores_both_halves() {
    let store = TokenStore::in_memory();
    store.sign_in(&AuthPayload { user: ann(), token: "abc123".to_owned() });
    assert_eq!(store.session(), Some(("abc123".to_owned(), ann())));
}

// =============================================================
// Subscriptions
// =============================================================

#[test]
fn listeners_receive_events() {
    let store = TokenStore::in_memory();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store.subscribe(move |event| sink.lock().unwrap().push(event));

    store.set_token("abc123");
    store.set_user(&ann());
    store.remove_token();
    store.sign_in(&AuthPayload { user: ann(), token: "t".to_owned() });

    assert_eq!(
        *seen.lock().unwrap(),
        vec![StoreEvent::TokenChanged, StoreEvent::UserChanged, StoreEvent::Cleared, StoreEvent::SignedIn]
    );
}

#[test]
fn every_listener_is_notified_once() {
    let store = TokenStore::in_memory();
    let count = Arc::new(AtomicUsize::new(0));
    for _ in 0..3 {
        let count = Arc::clone(&count);
        store.subscribe(move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        });
    }

    store.set_user(&ann());
    assert_eq!(count.load(Ordering::SeqCst), 3);
}

#[test]
fn unsubscribe_stops_delivery() {
    let store = TokenStore::in_memory();
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let id = store.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.set_token("abc123");
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn listener_can_reread_store_during_notification() {
    let store = TokenStore::in_memory();
    let observed = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&observed);
    let reader = store.clone();
    store.subscribe(move |_| {
        *sink.lock().unwrap() = reader.session().and_then(|(_, user)| user.id());
    });

    store.sign_in(&AuthPayload { user: ann(), token: "abc123".to_owned() });
    assert_eq!(observed.lock().unwrap().as_deref(), Some("1"));
}

#[test]
fn clones_share_storage_and_listeners() {
    let store = TokenStore::in_memory();
    let other = store.clone();
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    other.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    store.set_token("abc123");
    assert_eq!(other.get_token().as_deref(), Some("abc123"));
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_store_is_inert_outside_browser() {
    let store = TokenStore::browser();
    store.set_token("abc123");
    store.set_user(&ann());
    assert_eq!(store.get_token(), None);
    assert_eq!(store.get_user(), None);
    store.remove_token();
}

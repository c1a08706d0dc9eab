use super::*;

#[test]
fn memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get_item("k"), None);

    storage.set_item("k", "v1");
    assert_eq!(storage.get_item("k").as_deref(), Some("v1"));

    storage.set_item("k", "v2");
    assert_eq!(storage.get_item("k").as_deref(), Some("v2"));

    storage.remove_item("k");
    assert_eq!(storage.get_item("k"), None);
}

#[test]
fn memory_storage_clones_share_entries() {
    let a = MemoryStorage::new();
    let b = a.clone();
    a.set_item("shared", "yes");
    assert_eq!(b.get_item("shared").as_deref(), Some("yes"));
}

#[test]
fn memory_storage_remove_missing_key_is_noop() {
    let storage = MemoryStorage::new();
    storage.remove_item("never-set");
    assert_eq!(storage.get_item("never-set"), None);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn local_storage_is_empty_outside_browser() {
    let storage = LocalStorage;
    storage.set_item("answer24_token", "abc123");
    assert_eq!(storage.get_item("answer24_token"), None);
    storage.remove_item("answer24_token");
}

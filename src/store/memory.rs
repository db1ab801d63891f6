use std::collections::HashMap;
use std::sync::{
    RwLock, RwLockReadGuard, RwLockWriteGuard,
    atomic::{AtomicU64, Ordering},
};

use super::{ChangeListener, ListenerId, PreferenceStore};

/// One stored entry, in its native encoding.
#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Str(String),
}

/// An in-process [`PreferenceStore`] backed by a hash map.
///
/// Commits are serialized through an internal lock and listeners are
/// notified synchronously on the writer's thread, in commit order. There
/// is no durability; this backend exists for tests, demos, and embedding
/// in hosts that persist elsewhere.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Slot>>,
    listeners: RwLock<Vec<(ListenerId, ChangeListener)>>,
    next_listener_id: AtomicU64,
}

impl MemoryStore {
    /// Creates an empty store with no registered listeners.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries_read(&self) -> RwLockReadGuard<'_, HashMap<String, Slot>> {
        match self.entries.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn entries_write(&self) -> RwLockWriteGuard<'_, HashMap<String, Slot>> {
        match self.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn commit(&self, key: &str, slot: Slot) {
        self.entries_write().insert(key.to_string(), slot);
        self.notify(key);
    }

    fn slot(&self, key: &str) -> Option<Slot> {
        self.entries_read().get(key).cloned()
    }

    /// Invokes every registered listener with `key`.
    ///
    /// Listeners are snapshotted before delivery so a callback may touch
    /// the store without deadlocking.
    fn notify(&self, key: &str) {
        let snapshot: Vec<ChangeListener> = {
            let listeners = match self.listeners.read() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            listeners.iter().map(|(_, l)| l.clone()).collect()
        };

        for listener in snapshot {
            listener(key);
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn contains(&self, key: &str) -> bool {
        self.entries_read().contains_key(key)
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.slot(key) {
            Some(Slot::Bool(v)) => v,
            _ => default,
        }
    }

    fn put_bool(&self, key: &str, value: bool) {
        self.commit(key, Slot::Bool(value));
    }

    fn get_int(&self, key: &str, default: i32) -> i32 {
        match self.slot(key) {
            Some(Slot::Int(v)) => v,
            _ => default,
        }
    }

    fn put_int(&self, key: &str, value: i32) {
        self.commit(key, Slot::Int(value));
    }

    fn get_long(&self, key: &str, default: i64) -> i64 {
        match self.slot(key) {
            Some(Slot::Long(v)) => v,
            _ => default,
        }
    }

    fn put_long(&self, key: &str, value: i64) {
        self.commit(key, Slot::Long(value));
    }

    fn get_float(&self, key: &str, default: f32) -> f32 {
        match self.slot(key) {
            Some(Slot::Float(v)) => v,
            _ => default,
        }
    }

    fn put_float(&self, key: &str, value: f32) {
        self.commit(key, Slot::Float(value));
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        match self.slot(key) {
            Some(Slot::Str(v)) => v,
            _ => default.to_string(),
        }
    }

    fn put_string(&self, key: &str, value: &str) {
        self.commit(key, Slot::Str(value.to_string()));
    }

    fn remove(&self, key: &str) {
        let removed = self.entries_write().remove(key).is_some();
        if removed {
            self.notify(key);
        }
    }

    fn clear(&self) {
        let removed: Vec<String> = {
            let mut entries = self.entries_write();
            let keys = entries.keys().cloned().collect();
            entries.clear();
            keys
        };

        for key in &removed {
            self.notify(key);
        }
    }

    fn len(&self) -> usize {
        self.entries_read().len()
    }

    fn register_listener(&self, listener: ChangeListener) -> ListenerId {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        match self.listeners.write() {
            Ok(mut guard) => guard.push((id, listener)),
            Err(poisoned) => poisoned.into_inner().push((id, listener)),
        }
        id
    }

    fn unregister_listener(&self, id: ListenerId) {
        match self.listeners.write() {
            Ok(mut guard) => guard.retain(|(lid, _)| *lid != id),
            Err(poisoned) => poisoned.into_inner().retain(|(lid, _)| *lid != id),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn contains_tracks_put_and_remove() {
        let store = MemoryStore::new();

        assert!(!store.contains("volume"));
        store.put_int("volume", 70);
        assert!(store.contains("volume"));
        store.remove("volume");
        assert!(!store.contains("volume"));
    }

    #[test]
    fn len_tracks_put_remove_and_clear() {
        let store = MemoryStore::new();

        store.put_bool("a", true);
        store.put_string("b", "two");
        store.put_long("c", 3);
        assert_eq!(store.len(), 3);

        store.remove("b");
        assert_eq!(store.len(), 2);

        store.clear();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn mismatched_slot_reads_fall_back_to_default() {
        let store = MemoryStore::new();
        store.put_bool("flag", true);

        assert_eq!(store.get_int("flag", 7), 7);
        assert_eq!(store.get_string("flag", "fallback"), "fallback");
    }

    #[test]
    fn listeners_receive_each_committed_key() {
        let store = MemoryStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        store.register_listener(Arc::new(move |key: &str| {
            sink.lock().unwrap().push(key.to_string());
        }));

        store.put_int("first", 1);
        store.put_int("second", 2);
        store.remove("first");

        assert_eq!(*seen.lock().unwrap(), vec!["first", "second", "first"]);
    }

    #[test]
    fn removing_an_absent_key_does_not_notify() {
        let store = MemoryStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        store.register_listener(Arc::new(move |key: &str| {
            sink.lock().unwrap().push(key.to_string());
        }));

        store.remove("never-written");
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn unregistered_listeners_stop_receiving() {
        let store = MemoryStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        let id = store.register_listener(Arc::new(move |key: &str| {
            sink.lock().unwrap().push(key.to_string());
        }));

        store.put_int("k", 1);
        store.unregister_listener(id);
        store.put_int("k", 2);

        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn two_listeners_both_receive_one_commit() {
        let store = MemoryStore::new();
        let first = Arc::new(Mutex::new(0u32));
        let second = Arc::new(Mutex::new(0u32));

        let sink = first.clone();
        store.register_listener(Arc::new(move |_: &str| {
            *sink.lock().unwrap() += 1;
        }));
        let sink = second.clone();
        store.register_listener(Arc::new(move |_: &str| {
            *sink.lock().unwrap() += 1;
        }));

        store.put_string("k", "v");

        assert_eq!(*first.lock().unwrap(), 1);
        assert_eq!(*second.lock().unwrap(), 1);
    }
}

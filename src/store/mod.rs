//! The preference store collaborator contract and the in-memory backend.
//!
//! The accessor facade is written against [`PreferenceStore`], a thin
//! adapter over whatever native key-value mechanism actually persists the
//! data. The store owns commit semantics (writes are fire-and-forget) and
//! change delivery: every registered [`ChangeListener`] is invoked with the
//! changed key, synchronously with each commit, for mutations from any
//! writer.

mod memory;

use std::sync::Arc;

pub use memory::MemoryStore;

/// Handle identifying one registered change listener.
pub type ListenerId = u64;

/// Callback invoked with the changed key on every commit to any key.
pub type ChangeListener = Arc<dyn Fn(&str) + Send + Sync>;

/// Thin adapter over a native key-value preference store.
///
/// The six native encodings are booleans, 32-bit and 64-bit integers,
/// single-precision floats, and strings; there is no native double slot,
/// so double-precision values travel through the string path one layer
/// up. Writes commit asynchronously from the store's point of view; a
/// `put` followed by a `get` on the same thread is still expected to
/// reflect the new value.
pub trait PreferenceStore: Send + Sync + 'static {
    /// Returns true if a value is stored under `key`.
    fn contains(&self, key: &str) -> bool;

    /// Reads a boolean, falling back to `default` when absent.
    fn get_bool(&self, key: &str, default: bool) -> bool;
    /// Stores a boolean under `key`.
    fn put_bool(&self, key: &str, value: bool);

    /// Reads a 32-bit integer, falling back to `default` when absent.
    fn get_int(&self, key: &str, default: i32) -> i32;
    /// Stores a 32-bit integer under `key`.
    fn put_int(&self, key: &str, value: i32);

    /// Reads a 64-bit integer, falling back to `default` when absent.
    fn get_long(&self, key: &str, default: i64) -> i64;
    /// Stores a 64-bit integer under `key`.
    fn put_long(&self, key: &str, value: i64);

    /// Reads a single-precision float, falling back to `default` when absent.
    fn get_float(&self, key: &str, default: f32) -> f32;
    /// Stores a single-precision float under `key`.
    fn put_float(&self, key: &str, value: f32);

    /// Reads a string, falling back to `default` when absent.
    fn get_string(&self, key: &str, default: &str) -> String;
    /// Stores a string under `key`.
    fn put_string(&self, key: &str, value: &str);

    /// Deletes `key`. Removing an absent key commits nothing.
    fn remove(&self, key: &str);

    /// Deletes every entry.
    fn clear(&self);

    /// Returns the number of stored entries.
    fn len(&self) -> usize;

    /// Returns true when the store holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers a change listener and returns its handle.
    ///
    /// Registration is not idempotent: registering the same closure twice
    /// yields two independent deliveries per commit.
    fn register_listener(&self, listener: ChangeListener) -> ListenerId;

    /// Unregisters a listener, dropping the store's reference to it.
    ///
    /// Unknown or already-removed handles are ignored.
    fn unregister_listener(&self, id: ListenerId);
}

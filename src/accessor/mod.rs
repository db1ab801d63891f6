//! The typed accessor facade over a preference store.
//!
//! [`Prefs`] composes the primitive dispatch registry, the fallback codec,
//! and the change-notification bridge into the public surface: typed
//! get/put, existence and size queries, a raw stream of changed keys, and
//! the per-key `observe` / `get_and_observe` compositions.

mod changes;
mod registry;

#[cfg(test)]
mod tests;

use std::any::Any;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

pub use changes::KeyChanges;

use crate::codec::{Codec, JsonCodec};
use crate::core::{Error, Result};
use crate::descriptor::TypeDescriptor;
use crate::store::PreferenceStore;
use registry::Primitive;

/// Typed, observable accessor over a [`PreferenceStore`].
///
/// Values whose type has a native slot (bool, i32, i64, f32, f64, String)
/// are stored through the store's primitive methods; everything else is
/// serialized by the codec and stored as a string. Reads mirror the same
/// dispatch and never cache: every call round-trips to the store.
///
/// `Prefs` is cheap to clone; clones share the same store and codec.
pub struct Prefs<S: PreferenceStore, C: Codec = JsonCodec> {
    store: Arc<S>,
    codec: Arc<C>,
}

impl<S: PreferenceStore> Prefs<S> {
    /// Wraps a store with the default JSON codec.
    pub fn new(store: S) -> Self {
        Self::with_codec(store, JsonCodec)
    }
}

impl<S: PreferenceStore, C: Codec + 'static> Prefs<S, C> {
    /// Wraps a store with a caller-supplied codec.
    pub fn with_codec(store: S, codec: C) -> Self {
        Self {
            store: Arc::new(store),
            codec: Arc::new(codec),
        }
    }

    /// Returns the backing store, for callers that need to bypass the
    /// typed surface.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns true if a value is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.store.contains(key)
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true when no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Reads the value under `key`, or `default` when the key is absent.
    ///
    /// Primitive types go through their native slot; other types are
    /// decoded from the stored string. An absent key returns `default`
    /// without touching the codec.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] - `key` is empty
    /// * [`Error::Deserialization`] - the stored value does not decode as `T`
    pub fn get<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: Any + DeserializeOwned,
    {
        check_key(key)?;

        let descriptor = TypeDescriptor::of::<T>();
        if let Some(kind) = Primitive::of(&descriptor) {
            let value = registry::read(self.store.as_ref(), kind, key, Box::new(default))?;
            return registry::take(value);
        }

        if !self.store.contains(key) {
            return Ok(default);
        }

        let raw = self.store.get_string(key, "");
        self.codec.decode(key, &raw)
    }

    /// Reads the value under `key`, or `None` when the key is absent.
    ///
    /// A missing key is not an error on this path; it is `Ok(None)`,
    /// uniformly for every type.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] - `key` is empty
    /// * [`Error::Deserialization`] - the stored value does not decode as `T`
    pub fn try_get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: Any + DeserializeOwned,
    {
        check_key(key)?;

        if !self.store.contains(key) {
            return Ok(None);
        }

        let descriptor = TypeDescriptor::of::<T>();
        if let Some(kind) = Primitive::of(&descriptor) {
            let value =
                registry::read(self.store.as_ref(), kind, key, registry::zero_default(kind))?;
            return registry::take(value).map(Some);
        }

        let raw = self.store.get_string(key, "");
        self.codec.decode(key, &raw).map(Some)
    }

    /// Stores `value` under `key`.
    ///
    /// Dispatch follows the value's own runtime type: primitives write
    /// through their native slot, everything else is encoded by the codec
    /// and stored as a string. The write commits fire-and-forget.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] - `key` is empty
    /// * [`Error::Serialization`] - the codec could not encode the value
    #[instrument(skip(self, value))]
    pub fn put<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Any + Serialize,
    {
        check_key(key)?;

        let descriptor = TypeDescriptor::from_value(value);
        if let Some(kind) = Primitive::of(&descriptor) {
            return registry::write(self.store.as_ref(), kind, key, value);
        }

        let raw = self.codec.encode(key, value)?;
        self.store.put_string(key, &raw);
        Ok(())
    }

    /// Deletes the value under `key`. Absent keys are a no-op, not an
    /// error.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] - `key` is empty
    #[instrument(skip(self))]
    pub fn remove(&self, key: &str) -> Result<()> {
        check_key(key)?;

        if !self.store.contains(key) {
            return Ok(());
        }

        self.store.remove(key);
        Ok(())
    }

    /// Deletes every stored entry. A no-op when already empty.
    pub fn clear(&self) {
        if self.store.is_empty() {
            return;
        }

        debug!(entries = self.store.len(), "clearing all preferences");
        self.store.clear();
    }

    /// Opens a raw stream of changed keys, for every key in the store.
    ///
    /// Each call registers its own listener with the store; independent
    /// streams do not share delivery. The stream never completes on its
    /// own; cancel it explicitly or drop it.
    pub fn changes(&self) -> KeyChanges {
        KeyChanges::register(&self.store)
    }

    /// Streams the value under `key` after every change to that key.
    ///
    /// Composed as `changes -> filter(changed == key) -> re-read`. Each
    /// emission re-reads the current value at emission time rather than
    /// carrying a snapshot, so a slow consumer observes the latest state
    /// (last write wins) while still receiving one emission per commit.
    /// The listener is registered before this call returns; commits that
    /// land before the first poll are buffered, not lost.
    ///
    /// A re-read that fails to decode surfaces as an `Err` item; the
    /// stream itself keeps going.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] - `key` is empty
    pub fn observe<T>(
        &self,
        key: &str,
        default: T,
    ) -> Result<impl Stream<Item = Result<T>> + Send + use<S, C, T>>
    where
        T: Any + DeserializeOwned + Clone + Send,
    {
        check_key(key)?;

        let changes = self.changes();
        let this = self.clone();
        let watched = key.to_string();
        let key = key.to_string();

        Ok(changes
            .filter(move |changed| futures::future::ready(*changed == watched))
            .map(move |_| this.get(&key, default.clone())))
    }

    /// Streams the current value immediately, then every future change.
    ///
    /// A deferred single-shot read is chained in front of
    /// [`observe`](Self::observe): the first emission is the value stored
    /// at first poll (or `default` when absent), even if nothing ever
    /// changes. The live listener is registered before the initial read,
    /// so no commit slips between the two. Never completes.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] - `key` is empty
    pub fn get_and_observe<T>(
        &self,
        key: &str,
        default: T,
    ) -> Result<impl Stream<Item = Result<T>> + Send + use<S, C, T>>
    where
        T: Any + DeserializeOwned + Clone + Send,
    {
        let live = self.observe(key, default.clone())?;

        let this = self.clone();
        let key = key.to_string();
        let first = futures::stream::once(Box::pin(async move { this.get(&key, default) }));

        Ok(first.chain(live))
    }
}

impl<S: PreferenceStore, C: Codec> Clone for Prefs<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            codec: Arc::clone(&self.codec),
        }
    }
}

fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::invalid_argument("key", "empty key"));
    }
    Ok(())
}

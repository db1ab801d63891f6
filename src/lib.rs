//! Prefstream - typed, observable access to a key-value preference store.
//!
//! Prefstream wraps a persistent preference store with a typed surface and
//! live change notification. The main features include:
//!
//! - Typed get/put for primitives through the store's native slots
//! - A pluggable JSON fallback codec for collections and custom types
//! - Cancellable streams of changed keys, with per-key observation
//! - An in-memory store backend for tests and embedding
//!
//! # Quick Start
//!
//! ```rust
//! use prefstream::{MemoryStore, Prefs};
//!
//! # fn main() -> prefstream::Result<()> {
//! let prefs = Prefs::new(MemoryStore::new());
//!
//! prefs.put("volume", &0.8f64)?;
//! prefs.put("greeting", &"hello".to_string())?;
//!
//! let volume: f64 = prefs.get("volume", 0.5)?;
//! assert_eq!(volume, 0.8);
//! # Ok(())
//! # }
//! ```
//!
//! Observing a single key:
//!
//! ```rust,no_run
//! # async fn doc(prefs: prefstream::Prefs<prefstream::MemoryStore>) -> prefstream::Result<()> {
//! use futures::StreamExt;
//!
//! let mut volume_changes = prefs.get_and_observe("volume", 0.5f64)?;
//! while let Some(volume) = volume_changes.next().await {
//!     println!("volume is now {}", volume?);
//! }
//! # Ok(())
//! # }
//! ```

/// Typed accessor facade, primitive dispatch, and change streams.
pub mod accessor;

/// Fallback string codec for types without a native store slot.
pub mod codec;

/// Core error types and result alias.
pub mod core;

/// Runtime type descriptors for dispatch and diagnostics.
pub mod descriptor;

/// The preference store contract and the in-memory backend.
pub mod store;

pub use accessor::{KeyChanges, Prefs};
pub use codec::{Codec, JsonCodec};
pub use core::{Error, Result};
pub use descriptor::TypeDescriptor;
pub use store::{ChangeListener, ListenerId, MemoryStore, PreferenceStore};

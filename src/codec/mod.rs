//! Fallback string codec for values without a native store slot.
//!
//! Anything the primitive accessor registry does not recognize is routed
//! through a [`Codec`]: collections, maps, and user-defined serde types all
//! persist as a single encoded string under their key. The codec is
//! pluggable via the facade's generic parameter; [`JsonCodec`] is the
//! default.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::{Error, Result};

/// Converts values of arbitrary serde-capable types to and from their
/// persisted string representation.
///
/// Implementations must be stateless or internally synchronized; the
/// facade shares one codec instance across clones and subscriptions.
pub trait Codec: Send + Sync {
    /// Encodes a value to the string persisted under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the value cannot be encoded.
    fn encode<T>(&self, key: &str, value: &T) -> Result<String>
    where
        T: Serialize + ?Sized;

    /// Decodes a stored string back into a value of type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Deserialization`] if `raw` does not parse as the
    /// requested shape.
    fn decode<T>(&self, key: &str, raw: &str) -> Result<T>
    where
        T: DeserializeOwned;
}

/// The default JSON codec, backed by `serde_json`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T>(&self, key: &str, value: &T) -> Result<String>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_string(value).map_err(|e| Error::serialization(key, e))
    }

    fn decode<T>(&self, key: &str, raw: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(raw).map_err(|e| Error::deserialization(key, e))
    }
}

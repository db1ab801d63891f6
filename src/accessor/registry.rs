//! Closed dispatch table routing primitive types to native store slots.
//!
//! The original open "class to strategy" map is a fixed set of six cases
//! here, so the routing is statically checkable: anything [`Primitive::of`]
//! does not recognize falls through to the codec one layer up. Doubles have
//! no native slot and ride the string path with a numeric encoding.

use std::any::{Any, TypeId};

use crate::core::{Error, Result};
use crate::descriptor::TypeDescriptor;
use crate::store::PreferenceStore;

/// The six natively stored primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Primitive {
    Bool,
    Int,
    Long,
    Float,
    Double,
    Str,
}

impl Primitive {
    /// Maps a descriptor to its native kind, or `None` for codec types.
    pub(crate) fn of(descriptor: &TypeDescriptor) -> Option<Self> {
        let id = descriptor.type_id();

        if id == TypeId::of::<bool>() {
            Some(Self::Bool)
        } else if id == TypeId::of::<i32>() {
            Some(Self::Int)
        } else if id == TypeId::of::<i64>() {
            Some(Self::Long)
        } else if id == TypeId::of::<f32>() {
            Some(Self::Float)
        } else if id == TypeId::of::<f64>() {
            Some(Self::Double)
        } else if id == TypeId::of::<String>() || id == TypeId::of::<&str>() {
            Some(Self::Str)
        } else {
            None
        }
    }
}

/// Reads a primitive value through its native slot.
///
/// `default` must box the same type the kind was derived from; it is
/// handed to the native getter as the absent-key fallback.
pub(crate) fn read<S>(
    store: &S,
    kind: Primitive,
    key: &str,
    default: Box<dyn Any>,
) -> Result<Box<dyn Any>>
where
    S: PreferenceStore + ?Sized,
{
    match kind {
        Primitive::Bool => {
            let default = take::<bool>(default)?;
            Ok(Box::new(store.get_bool(key, default)))
        }
        Primitive::Int => {
            let default = take::<i32>(default)?;
            Ok(Box::new(store.get_int(key, default)))
        }
        Primitive::Long => {
            let default = take::<i64>(default)?;
            Ok(Box::new(store.get_long(key, default)))
        }
        Primitive::Float => {
            let default = take::<f32>(default)?;
            Ok(Box::new(store.get_float(key, default)))
        }
        Primitive::Double => {
            let default = take::<f64>(default)?;
            let raw = store.get_string(key, &default.to_string());
            let parsed: f64 = raw.trim().parse().map_err(|e| {
                Error::deserialization(key, format!("stored double '{raw}': {e}"))
            })?;
            Ok(Box::new(parsed))
        }
        Primitive::Str => {
            let default = take::<String>(default)?;
            Ok(Box::new(store.get_string(key, &default)))
        }
    }
}

/// Writes a primitive value through its native slot.
pub(crate) fn write<S>(store: &S, kind: Primitive, key: &str, value: &dyn Any) -> Result<()>
where
    S: PreferenceStore + ?Sized,
{
    match kind {
        Primitive::Bool => store.put_bool(key, *expect::<bool>(value)?),
        Primitive::Int => store.put_int(key, *expect::<i32>(value)?),
        Primitive::Long => store.put_long(key, *expect::<i64>(value)?),
        Primitive::Float => store.put_float(key, *expect::<f32>(value)?),
        Primitive::Double => store.put_string(key, &expect::<f64>(value)?.to_string()),
        Primitive::Str => {
            if let Some(owned) = value.downcast_ref::<String>() {
                store.put_string(key, owned);
            } else {
                store.put_string(key, expect::<&str>(value)?);
            }
        }
    }

    Ok(())
}

/// The absent-key fallback used when the caller supplied no default.
pub(crate) fn zero_default(kind: Primitive) -> Box<dyn Any> {
    match kind {
        Primitive::Bool => Box::new(false),
        Primitive::Int => Box::new(0i32),
        Primitive::Long => Box::new(0i64),
        Primitive::Float => Box::new(0f32),
        Primitive::Double => Box::new(0f64),
        Primitive::Str => Box::new(String::new()),
    }
}

/// Unboxes a dispatched value back to its concrete type.
///
/// A mismatch means the kind and the value type disagree, which the
/// dispatch above never produces; it is reported instead of panicking.
pub(crate) fn take<T: Any>(value: Box<dyn Any>) -> Result<T> {
    value.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
        Error::invalid_argument("value", "primitive dispatch type mismatch")
    })
}

fn expect<T: Any>(value: &dyn Any) -> Result<&T> {
    value
        .downcast_ref::<T>()
        .ok_or_else(|| Error::invalid_argument("value", "primitive dispatch type mismatch"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_six_primitives_are_recognized() {
        assert_eq!(Primitive::of(&TypeDescriptor::of::<bool>()), Some(Primitive::Bool));
        assert_eq!(Primitive::of(&TypeDescriptor::of::<i32>()), Some(Primitive::Int));
        assert_eq!(Primitive::of(&TypeDescriptor::of::<i64>()), Some(Primitive::Long));
        assert_eq!(Primitive::of(&TypeDescriptor::of::<f32>()), Some(Primitive::Float));
        assert_eq!(Primitive::of(&TypeDescriptor::of::<f64>()), Some(Primitive::Double));
        assert_eq!(Primitive::of(&TypeDescriptor::of::<String>()), Some(Primitive::Str));
        assert_eq!(Primitive::of(&TypeDescriptor::of::<&str>()), Some(Primitive::Str));
    }

    #[test]
    fn codec_types_are_not_recognized() {
        assert_eq!(Primitive::of(&TypeDescriptor::of::<Vec<f64>>()), None);
        assert_eq!(Primitive::of(&TypeDescriptor::of::<Vec<String>>()), None);
        assert_eq!(Primitive::of(&TypeDescriptor::of::<u8>()), None);
    }

    #[test]
    fn double_round_trips_through_the_string_slot() {
        let store = crate::store::MemoryStore::new();

        write(&store, Primitive::Double, "ratio", &2.75f64).unwrap();
        let value = read(&store, Primitive::Double, "ratio", Box::new(0f64)).unwrap();

        assert_eq!(take::<f64>(value).unwrap(), 2.75);
    }

    #[test]
    fn malformed_stored_double_is_a_deserialization_error() {
        let store = crate::store::MemoryStore::new();
        store.put_string("ratio", "not-a-number");

        let err = read(&store, Primitive::Double, "ratio", Box::new(0f64)).unwrap_err();
        assert!(matches!(err, crate::core::Error::Deserialization { .. }));
    }
}

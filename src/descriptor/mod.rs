//! Runtime type descriptors for accessor and codec dispatch.
//!
//! A [`TypeDescriptor`] is a comparable, hashable stand-in for "the type
//! parameter T". Rust reifies generics, so a descriptor for `Vec<f64>` and
//! one for `Vec<String>` are distinct without any reflection; the
//! descriptor is a thin wrapper over [`std::any::TypeId`] plus the type
//! name for diagnostics.

use std::any::{Any, TypeId, type_name};

use crate::core::{Error, Result};

/// A runtime-inspectable stand-in for a (possibly parameterized) type.
///
/// Two descriptors compare equal and hash identically iff they denote the
/// same resolved type, including generic parameters, regardless of which
/// construction route produced them. Descriptors are cheap `Copy` values
/// with no persistent identity; build one per call and discard it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
}

impl TypeDescriptor {
    /// Builds a descriptor for the concrete type `T`.
    ///
    /// Parameterized types are fully resolved: `of::<Vec<f64>>()` and
    /// `of::<Vec<String>>()` are not equal.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Builds a descriptor from a value's own runtime type.
    pub fn from_value<T: Any>(_value: &T) -> Self {
        Self::of::<T>()
    }

    /// Parses a descriptor from a textual type name.
    ///
    /// Intended for callers that receive the type name at runtime rather
    /// than as a generic parameter. The grammar is closed:
    /// `bool | int | long | float | double | string | sequence<scalar>`,
    /// where `int` is `i32`, `long` is `i64`, `float` is `f32`, `double`
    /// is `f64`, and `sequence<scalar>` maps to `Vec<scalar>`.
    ///
    /// # Errors
    ///
    /// * [`Error::MissingTypeParameter`] - `sequence` given without an
    ///   element parameter (e.g. `"sequence"` or `"sequence<>"`)
    /// * [`Error::InvalidArgument`] - empty input, an unknown type name,
    ///   or a nested sequence (outside the closed grammar)
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(Error::invalid_argument("type", "empty type name"));
        }

        if let Some(rest) = trimmed.strip_prefix("sequence") {
            let rest = rest.trim();
            if rest.is_empty() || rest.starts_with('<') {
                return Self::parse_sequence(trimmed, rest);
            }
        }

        Self::parse_scalar(trimmed).ok_or_else(|| {
            Error::invalid_argument("type", format!("unknown type name '{trimmed}'"))
        })
    }

    /// Returns the resolved [`TypeId`] this descriptor denotes.
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Returns the type name, for diagnostics only.
    ///
    /// The name comes from [`std::any::type_name`] and is not guaranteed
    /// stable across compiler versions; never use it for dispatch.
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn parse_scalar(name: &str) -> Option<Self> {
        match name {
            "bool" => Some(Self::of::<bool>()),
            "int" => Some(Self::of::<i32>()),
            "long" => Some(Self::of::<i64>()),
            "float" => Some(Self::of::<f32>()),
            "double" => Some(Self::of::<f64>()),
            "string" => Some(Self::of::<String>()),
            _ => None,
        }
    }

    fn parse_sequence(input: &str, param: &str) -> Result<Self> {
        let inner = param
            .strip_prefix('<')
            .and_then(|p| p.strip_suffix('>'))
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| Error::MissingTypeParameter {
                input: input.to_string(),
            })?;

        match inner {
            "bool" => Ok(Self::of::<Vec<bool>>()),
            "int" => Ok(Self::of::<Vec<i32>>()),
            "long" => Ok(Self::of::<Vec<i64>>()),
            "float" => Ok(Self::of::<Vec<f32>>()),
            "double" => Ok(Self::of::<Vec<f64>>()),
            "string" => Ok(Self::of::<Vec<String>>()),
            _ => Err(Error::invalid_argument(
                "type",
                format!("unsupported sequence element '{inner}'"),
            )),
        }
    }
}

use thiserror::Error;

/// Error types for preference access.
///
/// Every variant is raised synchronously at the call that detects the
/// problem; nothing is retried and nothing is silently swallowed.
#[derive(Error, Debug)]
pub enum Error {
    /// A precondition on a caller-supplied argument was violated.
    #[error("invalid argument '{what}': {reason}")]
    InvalidArgument {
        /// The argument that failed the precondition.
        what: &'static str,
        /// Why the argument was rejected.
        reason: String,
    },

    /// A parameterized type descriptor was requested without its parameter.
    #[error("missing type parameter in '{input}'")]
    MissingTypeParameter {
        /// The descriptor input that omitted the parameter.
        input: String,
    },

    /// A value could not be encoded for storage.
    #[error("failed to serialize value for key '{key}': {details}")]
    Serialization {
        /// Key the value was being stored under.
        key: String,
        /// Encoder error details.
        details: String,
    },

    /// A stored string did not decode as the requested type.
    #[error("failed to deserialize value for key '{key}': {details}")]
    Deserialization {
        /// Key whose stored value failed to decode.
        key: String,
        /// Decoder error details.
        details: String,
    },
}

/// A specialized `Result` type for preference operations.
///
/// This type alias simplifies error handling by defaulting the error type
/// to [`Error`] for all preference operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates an `InvalidArgument` error for the named argument.
    pub fn invalid_argument(what: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            what,
            reason: reason.into(),
        }
    }

    /// Creates a `Serialization` error with key context.
    pub fn serialization(key: impl Into<String>, details: impl std::fmt::Display) -> Self {
        Error::Serialization {
            key: key.into(),
            details: details.to_string(),
        }
    }

    /// Creates a `Deserialization` error with key context.
    pub fn deserialization(key: impl Into<String>, details: impl std::fmt::Display) -> Self {
        Error::Deserialization {
            key: key.into(),
            details: details.to_string(),
        }
    }
}

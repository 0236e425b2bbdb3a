//! Error taxonomy shared by the registry, the stores and the configuration.
//!
//! Every failure in this crate is a caller contract violation: a key that was
//! never registered, a typed lookup against a value of another kind, or an
//! index that escaped its sequence. Nothing is retried; errors are returned to
//! the owning application, which decides how to present them.

use thiserror::Error;

use crate::resources::objectregistry::ObjectId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A value store or animation store lookup missed.
    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    /// No object with this id is registered (or it is currently checked out
    /// for its own update).
    #[error("object {id} not found")]
    ObjectNotFound { id: ObjectId },

    /// The stored value exists but is of a different runtime type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// An animation record violates its own invariants.
    #[error("invalid animation '{name}': {reason}")]
    InvalidAnimation { name: String, reason: String },

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    pub fn key_not_found(key: impl Into<String>) -> Self {
        CoreError::KeyNotFound { key: key.into() }
    }
}

//! Error types for the store.

use std::fmt;

use crate::path::PathError;

/// The check that failed when access to a property was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Reading the property, or passing through it on a read.
    Read,
    /// Assigning the final segment of a write.
    Write,
    /// Passing through an intermediate segment on a write. Existing segments
    /// need read or write; missing ones need write because they get created.
    Traverse,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Read => f.write_str("read"),
            Access::Write => f.write_str("write"),
            Access::Traverse => f.write_str("traverse"),
        }
    }
}

/// Errors raised by store operations.
///
/// Nothing is recovered internally: every error propagates to the caller of
/// the top-level operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The path string could not be parsed.
    #[error("{0}")]
    InvalidPath(#[from] PathError),

    /// The node owning `name` refused the requested access.
    #[error("permission denied: cannot {access} property '{name}'")]
    PermissionDenied { name: String, access: Access },

    /// A value could not be converted into the requested shape.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// A value could not be converted into the store's value model.
    #[error("encode error: {message}")]
    Encode { message: String },
}

impl Error {
    pub fn denied(name: impl Into<String>, access: Access) -> Self {
        Error::PermissionDenied {
            name: name.into(),
            access,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Error::Decode {
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Error::Encode {
            message: message.into(),
        }
    }

    /// Whether this is a permission failure (of any access kind).
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Error::PermissionDenied { .. })
    }
}

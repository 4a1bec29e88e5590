//! Domain error types

use thiserror::Error;

use crate::id::TabId;

/// Domain-level errors raised by validation or tab store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not one of GET, POST, PUT or DELETE.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The named tab field does not exist.
    #[error("unknown tab field: {0}")]
    UnknownField(String),

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// No tab with this id is open.
    #[error("tab {0} not found")]
    TabNotFound(TabId),

    /// The first tab can never be closed.
    #[error("tab {0} is permanent and cannot be closed")]
    PermanentTab(TabId),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

//! Application error types

use thiserror::Error;

/// Reasons a send is refused before anything is dispatched.
///
/// Refused sends leave the tab untouched and are reported to the user as a
/// transient notice.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SendError {
    /// The URL is empty after trimming.
    #[error("URL is required")]
    EmptyUrl,
}

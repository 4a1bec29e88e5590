//! Courier Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - The send-request use case
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod send_request;

pub use error::SendError;
pub use ports::{HttpClient, HttpClientError, TransportResponse};
pub use send_request::{PreparedSend, SendRequest, normalize};

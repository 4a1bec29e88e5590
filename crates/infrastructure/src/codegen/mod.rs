//! Code generation infrastructure.
//!
//! Renders built requests as commands that can be replayed outside Courier.

mod curl;

pub use curl::generate_curl;

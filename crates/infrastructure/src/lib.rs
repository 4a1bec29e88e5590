//! Courier Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod codegen;

pub use adapters::{ClientSettings, ReqwestHttpClient};
pub use codegen::generate_curl;

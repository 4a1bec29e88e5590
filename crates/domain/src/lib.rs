//! Courier Domain - Core types
//!
//! This crate defines the domain model for the Courier request composer:
//! request tabs and the store that owns them, HTTP methods, the outbound
//! request built from a tab, and the normalized response written back.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod id;
pub mod request;
pub mod response;
pub mod tab;

pub use error::{DomainError, DomainResult};
pub use id::{TabId, TabIdAllocator};
pub use request::{HttpMethod, OutboundRequest, RequestBuildError, RequestDraft};
pub use response::{NormalizedResponse, ResponseMeta};
pub use tab::{SendOutcome, SendTicket, Tab, TabEdit, TabField, TabStore};

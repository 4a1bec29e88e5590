//! HTTP Request domain types

mod draft;
mod method;
mod outbound;

pub use draft::RequestDraft;
pub use method::HttpMethod;
pub use outbound::{AUTHORIZATION, OutboundRequest, RequestBuildError};

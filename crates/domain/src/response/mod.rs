//! HTTP Response domain types

mod normalized;

pub use normalized::{NormalizedResponse, ResponseMeta};

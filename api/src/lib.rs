//! Typed client for the attendance backend. All HTTP plumbing lives here so
//! the UI crate only deals in domain types and `ApiError`.

mod client;
mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;

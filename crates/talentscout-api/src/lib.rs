//! HTTP access to the candidate sourcing backend.
//!
//! [`Backend`] is the surface the dashboard consumes; [`ApiClient`] implements
//! it over reqwest.

pub mod backend;
pub mod client;
pub mod error;

pub use backend::Backend;
pub use client::{ApiClient, ClientConfig};
pub use error::ApiError;

//! HTTP access to the matrix service
//!
//! [`ApiClient`] issues one request per call and maps HTTP failures onto
//! [`eisen_utils::EisenError`]. It never retries.

mod client;
mod status;

pub use client::ApiClient;

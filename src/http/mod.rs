//! HTTP client module with error classification.

mod client;

pub use client::HttpClient;

//! HTTP transport shared by the REST adapters.

mod client;

pub use client::{endpoint, parse_base_url, HttpClient, HttpClientBuilder};

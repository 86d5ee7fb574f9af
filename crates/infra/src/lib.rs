//! # Kindred Infrastructure
//!
//! Implementations of the ports defined in `kindred-core`.
//!
//! This crate contains:
//! - Configuration loading (environment, JSON/TOML files)
//! - A retrying HTTP client and REST document/blob stores
//! - Filesystem-backed photo asset reader
//! - In-memory stores, sample profile source and auth provider
//! - Log-backed interaction log and notice sink
//!
//! ## Architecture
//! - Implements traits defined in `kindred-core`
//! - Contains all "impure" code (I/O, network)

pub mod assets;
pub mod config;
pub mod errors;
pub mod http;
pub mod memory;
pub mod rest;
pub mod sinks;

pub use assets::FileAssetReader;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use memory::{ChannelAuthProvider, InMemoryBlobStore, InMemoryDocumentStore, StaticProfileSource};
pub use rest::{RestBlobStore, RestDocumentStore};
pub use sinks::{TracingInteractionLog, TracingNoticeSink};

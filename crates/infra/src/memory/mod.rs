//! In-process adapters for offline runs, demos and tests.

mod auth;
mod blobs;
mod documents;
mod profiles;

pub use auth::ChannelAuthProvider;
pub use blobs::InMemoryBlobStore;
pub use documents::InMemoryDocumentStore;
pub use profiles::StaticProfileSource;

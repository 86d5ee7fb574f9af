//! REST adapters for the document and blob ports.

mod blob_store;
mod document_store;

pub use blob_store::RestBlobStore;
pub use document_store::RestDocumentStore;

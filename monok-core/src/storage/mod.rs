//! Persistence for per-identity documents
//!
//! The engine never touches files directly: it loads and saves whole JSON
//! documents through a [`StorageBackend`], wrapped by [`DocumentStore`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use monok_core::storage::{Document, DocumentStore, FileBackend};
//!
//! let documents = DocumentStore::new(Arc::new(FileBackend::new("./data/monok")));
//! let store: SessionStore = documents.load("user-1", Document::SessionSummaries).await?;
//! ```

mod backend;
mod document;
mod file;
mod inmemory;

pub use backend::{validate_identity, Document, StorageBackend};
pub use document::DocumentStore;
pub use file::FileBackend;
pub use inmemory::InMemoryBackend;

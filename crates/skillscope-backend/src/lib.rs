//! skillscope-backend — Hosted persistence for the evaluation store.
//!
//! Implements the `DocumentBackend` trait for a PostgREST-style hosted
//! table and an in-memory mock, plus the autosave scheduler that flushes
//! the store whenever the dirty flag is set.

use async_trait::async_trait;

use skillscope_core::document::StoreDocument;

pub mod autosave;
pub mod config;
pub mod error;
pub mod mock;
pub mod rest;

pub use config::{create_backend, load_config, BackendConfig, SkillscopeConfig};
pub use error::BackendError;

/// Opaque upsert/fetch of the whole store as one document.
///
/// Upsert replaces the entire row; fetch returns it whole or `None` when
/// the row has never been written.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Human-readable backend name (e.g. "rest").
    fn name(&self) -> &str;

    /// Fetch the stored document, if any.
    async fn fetch(&self) -> anyhow::Result<Option<StoreDocument>>;

    /// Replace the stored document.
    async fn upsert(&self, document: &StoreDocument) -> anyhow::Result<()>;
}

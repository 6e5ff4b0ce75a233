//! Mock backend for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use skillscope_core::document::StoreDocument;

use crate::error::BackendError;
use crate::DocumentBackend;

/// An in-memory document backend for testing the save paths without a
/// hosted table.
///
/// Holds at most one document, counts calls, and can be told to fail the
/// next N upserts with a transient error.
#[derive(Default)]
pub struct MockBackend {
    document: Mutex<Option<StoreDocument>>,
    fetch_count: AtomicU32,
    upsert_count: AtomicU32,
    failures_remaining: AtomicU32,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that already holds a document.
    pub fn with_document(document: StoreDocument) -> Self {
        Self {
            document: Mutex::new(Some(document)),
            ..Self::default()
        }
    }

    /// Fail the next `n` upserts with a transient network error.
    pub fn fail_next_upserts(&self, n: u32) {
        self.failures_remaining.store(n, Ordering::Relaxed);
    }

    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::Relaxed)
    }

    pub fn upsert_count(&self) -> u32 {
        self.upsert_count.load(Ordering::Relaxed)
    }

    /// The currently stored document, if any.
    pub fn stored(&self) -> Option<StoreDocument> {
        self.document.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentBackend for MockBackend {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch(&self) -> anyhow::Result<Option<StoreDocument>> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.document.lock().unwrap().clone())
    }

    async fn upsert(&self, document: &StoreDocument) -> anyhow::Result<()> {
        self.upsert_count.fetch_add(1, Ordering::Relaxed);

        let remaining = self.failures_remaining.load(Ordering::Relaxed);
        if remaining > 0 {
            self.failures_remaining.store(remaining - 1, Ordering::Relaxed);
            return Err(BackendError::NetworkError("injected failure".into()).into());
        }

        *self.document.lock().unwrap() = Some(document.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillscope_core::store::EvaluationStore;

    fn sample_document() -> StoreDocument {
        let mut store = EvaluationStore::new();
        store.add_member();
        StoreDocument::from_store(&store)
    }

    #[tokio::test]
    async fn fetch_empty_then_upsert_then_fetch() {
        let backend = MockBackend::new();
        assert!(backend.fetch().await.unwrap().is_none());

        backend.upsert(&sample_document()).await.unwrap();
        let fetched = backend.fetch().await.unwrap().unwrap();
        assert_eq!(fetched.employees.len(), 1);

        assert_eq!(backend.fetch_count(), 2);
        assert_eq!(backend.upsert_count(), 1);
    }

    #[tokio::test]
    async fn injected_failures_are_transient_and_finite() {
        let backend = MockBackend::new();
        backend.fail_next_upserts(2);

        let doc = sample_document();
        assert!(backend.upsert(&doc).await.is_err());
        assert!(backend.upsert(&doc).await.is_err());
        backend.upsert(&doc).await.unwrap();
        assert!(backend.stored().is_some());
    }
}

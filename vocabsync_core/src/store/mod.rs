//! Access to the record store, the system-of-record for term records.
//!
//! The store is an external service; [`channel`] reaches it over the
//! request/response channel, [`memory`] stands in for it in tests.

pub mod channel;
pub mod memory;
pub mod models;

use async_trait::async_trait;
use serde_json::Value;

use self::models::{CollectionOptions, GetOptions, LocalRecord, RecordCollection};
use crate::Result;

/// Get/create/update access to one term kind's records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch one record by id. Fails with the kind's typed not-found error
    /// when no record matches.
    async fn get(&self, id: &str, options: GetOptions) -> Result<LocalRecord>;

    /// Query records matching `filter`.
    async fn get_collection(
        &self,
        filter: Value,
        options: CollectionOptions,
    ) -> Result<RecordCollection>;

    /// Create `record` unconditionally; existence checks are the caller's job.
    async fn create(&self, record: &LocalRecord) -> Result<LocalRecord>;

    /// Apply a partial update; fields absent from `updates` keep their
    /// server-side value, a null field is cleared.
    async fn update(&self, id: &str, updates: Value) -> Result<LocalRecord>;
}

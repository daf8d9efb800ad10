//! The inventory store capability consumed by the chat engine.

use async_trait::async_trait;

use sp_protocol::{Item, ItemDraft};

use crate::error::StoreResult;

/// CRUD access to the external inventory service.
///
/// Implementations own transport and timeouts. Callers guarantee that
/// quantities are non-negative at this boundary, and only pass ids read
/// from a previously fetched snapshot.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Fetch the full item collection.
    async fn list(&self) -> StoreResult<Vec<Item>>;

    /// Create a new item; the store assigns the id.
    async fn create(&self, draft: &ItemDraft) -> StoreResult<Item>;

    /// Replace the full record stored under `id`.
    async fn update(&self, id: i64, draft: &ItemDraft) -> StoreResult<Item>;

    /// Remove the record stored under `id`.
    async fn delete(&self, id: i64) -> StoreResult<()>;
}

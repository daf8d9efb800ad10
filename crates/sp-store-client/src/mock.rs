//! In-memory inventory store for tests — deterministic ids, no network.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use sp_protocol::{Item, ItemDraft};

use crate::error::{StoreError, StoreResult};
use crate::store::InventoryStore;

struct MockState {
    items: Vec<Item>,
    next_id: i64,
}

/// A mock store backed by a vector behind a mutex.
///
/// Write calls honor an optional injected delay (for admission-gate tests)
/// and a failure switch (for error-path tests). Reads always succeed.
pub struct MockInventoryStore {
    state: Mutex<MockState>,
    fail_writes: AtomicBool,
    write_delay: Mutex<Option<Duration>>,
}

impl MockInventoryStore {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Seed the mock with the given items; new ids continue after the
    /// highest seeded id.
    pub fn with_items(items: Vec<Item>) -> Self {
        let next_id = items.iter().map(|it| it.id).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(MockState { items, next_id }),
            fail_writes: AtomicBool::new(false),
            write_delay: Mutex::new(None),
        }
    }

    /// A small stocked inventory: one healthy item, one low item, one
    /// item with a digit in its name.
    pub fn with_sample_items() -> Self {
        Self::with_items(vec![
            Item {
                id: 1,
                name: "Mango".into(),
                quantity: 10,
                description: Some("fruit".into()),
            },
            Item {
                id: 2,
                name: "Apple".into(),
                quantity: 2,
                description: Some(String::new()),
            },
            Item {
                id: 3,
                name: "Bolt M4".into(),
                quantity: 40,
                description: None,
            },
        ])
    }

    /// Make every subsequent write call fail with a transport error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Delay every subsequent write call by `delay` before it resolves.
    pub fn set_write_delay(&self, delay: Duration) {
        *self.write_delay.lock().unwrap() = Some(delay);
    }

    /// Snapshot of the current mock contents.
    pub fn items(&self) -> Vec<Item> {
        self.state.lock().unwrap().items.clone()
    }

    async fn write_gate(&self) -> StoreResult<()> {
        let delay = *self.write_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Transport("injected write failure".into()));
        }
        Ok(())
    }
}

impl Default for MockInventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventoryStore for MockInventoryStore {
    async fn list(&self) -> StoreResult<Vec<Item>> {
        Ok(self.items())
    }

    async fn create(&self, draft: &ItemDraft) -> StoreResult<Item> {
        self.write_gate().await?;
        let mut state = self.state.lock().unwrap();
        let item = Item {
            id: state.next_id,
            name: draft.name.clone(),
            quantity: draft.quantity,
            description: Some(draft.description.clone()),
        };
        state.next_id += 1;
        state.items.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: i64, draft: &ItemDraft) -> StoreResult<Item> {
        self.write_gate().await?;
        let mut state = self.state.lock().unwrap();
        let Some(item) = state.items.iter_mut().find(|it| it.id == id) else {
            return Err(StoreError::Status { status: 404 });
        };
        item.name = draft.name.clone();
        item.quantity = draft.quantity;
        item.description = Some(draft.description.clone());
        Ok(item.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.write_gate().await?;
        let mut state = self.state.lock().unwrap();
        let Some(pos) = state.items.iter().position(|it| it.id == id) else {
            return Err(StoreError::Status { status: 404 });
        };
        state.items.remove(pos);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let store = MockInventoryStore::new();
        let a = store.create(&ItemDraft::new("Mango", 10)).await.unwrap();
        let b = store.create(&ItemDraft::new("Apple", 2)).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.items().len(), 2);
    }

    #[tokio::test]
    async fn ids_continue_after_seeded_items() {
        let store = MockInventoryStore::with_sample_items();
        let created = store.create(&ItemDraft::new("Crate", 4)).await.unwrap();
        assert_eq!(created.id, 4);
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let store = MockInventoryStore::new();
        let err = store
            .update(99, &ItemDraft::new("Ghost", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 404 }));
    }

    #[tokio::test]
    async fn delete_removes_item() {
        let store = MockInventoryStore::with_sample_items();
        store.delete(2).await.unwrap();
        assert!(store.items().iter().all(|it| it.id != 2));
    }

    #[tokio::test]
    async fn injected_failure_hits_writes_only() {
        let store = MockInventoryStore::with_sample_items();
        store.set_fail_writes(true);

        let err = store.create(&ItemDraft::new("Mango", 1)).await.unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)));

        // reads are unaffected
        assert_eq!(store.list().await.unwrap().len(), 3);
    }
}

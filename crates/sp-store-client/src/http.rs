//! HTTP implementation of the inventory store.
//!
//! Talks to the service's REST surface: `GET /items`, `POST /items`,
//! `PUT /items/{id}`, `DELETE /items/{id}`. All failures fold into
//! `StoreError`; the caller decides how to surface them.

use std::time::Duration;

use sp_protocol::{Item, ItemDraft};

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::store::InventoryStore;

/// REST client for the inventory service.
pub struct HttpInventoryStore {
    client: reqwest::Client,
    items_url: String,
}

impl HttpInventoryStore {
    pub fn new(config: &StoreConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build reqwest client");
        Self {
            client,
            items_url: format!("{}/items", config.base_url.trim_end_matches('/')),
        }
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{id}", self.items_url)
    }
}

#[async_trait::async_trait]
impl InventoryStore for HttpInventoryStore {
    async fn list(&self) -> StoreResult<Vec<Item>> {
        let response = self
            .client
            .get(&self.items_url)
            .send()
            .await?
            .error_for_status()?;
        let items: Vec<Item> = response.json().await?;
        tracing::debug!(count = items.len(), "inventory snapshot fetched");
        Ok(items)
    }

    async fn create(&self, draft: &ItemDraft) -> StoreResult<Item> {
        let response = self
            .client
            .post(&self.items_url)
            .json(draft)
            .send()
            .await?
            .error_for_status()?;
        let item: Item = response.json().await?;
        tracing::debug!(id = item.id, name = %item.name, "item created");
        Ok(item)
    }

    async fn update(&self, id: i64, draft: &ItemDraft) -> StoreResult<Item> {
        let response = self
            .client
            .put(self.item_url(id))
            .json(draft)
            .send()
            .await?
            .error_for_status()?;
        let item: Item = response.json().await?;
        tracing::debug!(id = item.id, quantity = item.quantity, "item updated");
        Ok(item)
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.client
            .delete(self.item_url(id))
            .send()
            .await?
            .error_for_status()?;
        tracing::debug!(id, "item deleted");
        Ok(())
    }
}

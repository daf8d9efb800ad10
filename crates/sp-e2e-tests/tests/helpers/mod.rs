//! Shared test harness for E2E chat cycles against a wiremock store.
//!
//! Exercises real code paths across all crate boundaries: HTTP store
//! client, classifier, resolver, dispatcher, and session.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sp_chatbot::dispatcher::Dispatcher;
use sp_chatbot::session::{ChatSession, Submission};
use sp_protocol::Item;
use sp_store_client::{HttpInventoryStore, InventoryStore, StoreConfig};

/// End-to-end harness: one mock store server, one HTTP client, one session.
pub struct TestHarness {
    pub server: MockServer,
    pub store: HttpInventoryStore,
    pub session: ChatSession,
}

impl TestHarness {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let store = HttpInventoryStore::new(&StoreConfig {
            base_url: server.uri(),
            timeout_secs: 2,
        });
        Self {
            server,
            store,
            session: ChatSession::new(),
        }
    }

    /// Mount `GET /items` returning the given JSON body.
    pub async fn mount_list(&self, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/items"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Fetch the snapshot through the real HTTP client.
    pub async fn fetch(&self) -> Vec<Item> {
        self.store.list().await.expect("snapshot fetch failed")
    }

    /// Run one full submit cycle against the given snapshot.
    pub async fn submit(&self, text: &str, items: &[Item]) -> Submission {
        let dispatcher = Dispatcher::new(&self.store);
        self.session.submit(text, items, &dispatcher).await
    }

    /// Unwrap a submission into its reply text, asserting it replied.
    pub fn reply_text(submission: Submission) -> String {
        match submission {
            Submission::Replied { reply, .. } => reply.text,
            Submission::Ignored => panic!("expected a reply, submission was ignored"),
        }
    }

    /// The stock three-item inventory used across suites.
    pub fn sample_items_json() -> serde_json::Value {
        json!([
            {"id": 1, "name": "Mango", "quantity": 10, "description": "fruit"},
            {"id": 2, "name": "Apple", "quantity": 2, "description": ""},
            {"id": 3, "name": "Bolt M4", "quantity": 40, "description": null},
        ])
    }
}

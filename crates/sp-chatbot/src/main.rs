//! StockPilot Inventory Assistant — terminal chat front-end for a remote
//! inventory store.
//!
//! Owns the snapshot fetch cycle: fetch once at startup, re-fetch after
//! every successful mutation, and feed each submitted line through the
//! chat engine. The snapshot itself is never mutated in place.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use sp_chatbot::config::BotConfig;
use sp_chatbot::dispatcher::Dispatcher;
use sp_chatbot::session::{ChatSession, Submission};
use sp_store_client::{HttpInventoryStore, InventoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the conversation on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "sp-chatbot starting");

    // ── Load config ─────────────────────────────────────────────
    let config = match std::env::args().nth(1) {
        Some(path) => BotConfig::from_file(&path)?,
        None => BotConfig::default(),
    };
    tracing::info!(base_url = %config.store.base_url, "config loaded");

    // ── Store client + session ──────────────────────────────────
    let store = HttpInventoryStore::new(&config.store);
    let dispatcher = Dispatcher::new(&store);
    let session = ChatSession::new();
    tracing::info!(session = %session.id(), "session opened");

    // ── Initial snapshot ────────────────────────────────────────
    let mut items = match store.list().await {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(%err, "initial fetch failed, starting with empty snapshot");
            Vec::new()
        }
    };

    for message in session.transcript().await {
        println!("{}\n", message.text);
    }

    // ── Interaction loop ────────────────────────────────────────
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match session.submit(&line, &items, &dispatcher).await {
            Submission::Ignored => {}
            Submission::Replied {
                reply,
                refresh_needed,
            } => {
                println!("{}\n", reply.text);
                if refresh_needed {
                    match store.list().await {
                        Ok(fresh) => items = fresh,
                        Err(err) => {
                            tracing::warn!(%err, "snapshot refresh failed, keeping previous snapshot");
                        }
                    }
                }
            }
        }
    }

    tracing::info!("sp-chatbot stopped");
    Ok(())
}

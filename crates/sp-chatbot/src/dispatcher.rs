//! Command dispatcher — turns a classified command into exactly one reply.
//!
//! Read-only commands answer from the snapshot alone. Mutating commands
//! resolve their target first, then call the injected store; a successful
//! write asks the caller to refresh the snapshot. Store failures never
//! escape: they fold into one generic reply and a warn-level log line.

use sp_protocol::{Command, Item, ItemDraft};
use sp_store_client::{InventoryStore, StoreError};

use crate::resolver::resolve;

/// Help reply for anything the classifier couldn't place.
pub const HELP_TEXT: &str = "🤖 Sorry, I didn't understand.\nTry commands like:\n• show inventory\n• total stock\n• low stock\n• find <name>\n• add <name> <qty>\n• update <name|id> <qty>\n• delete <name|id>";

/// The single user-facing reply for any store failure.
pub const ACTION_FAILED_TEXT: &str = "⚠️ There was an error performing that action.";

/// Row caps per reply kind.
const SHOW_MAX_ROWS: usize = 20;
const LOW_STOCK_MAX_ROWS: usize = 30;
const FIND_MAX_ROWS: usize = 20;

/// What a dispatched command produced: exactly one reply, plus whether
/// the caller should re-fetch the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub reply: String,
    pub refresh_needed: bool,
}

impl DispatchOutcome {
    fn reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            refresh_needed: false,
        }
    }

    fn mutated(reply: String) -> Self {
        Self {
            reply,
            refresh_needed: true,
        }
    }
}

/// Executes commands against a snapshot and an injected store.
pub struct Dispatcher<'a> {
    store: &'a dyn InventoryStore,
}

impl<'a> Dispatcher<'a> {
    pub fn new(store: &'a dyn InventoryStore) -> Self {
        Self { store }
    }

    /// Execute one command. Infallible: every branch produces exactly one
    /// reply, and store failures are folded into the generic failure text.
    pub async fn execute(&self, cmd: &Command, items: &[Item]) -> DispatchOutcome {
        match cmd {
            Command::ShowInventory => {
                let rows: Vec<&Item> = items.iter().collect();
                DispatchOutcome::reply(format!(
                    "{} items:\n{}",
                    items.len(),
                    format_rows(&rows, SHOW_MAX_ROWS)
                ))
            }

            Command::TotalStock => {
                let total: i64 = items.iter().map(|it| it.quantity).sum();
                DispatchOutcome::reply(format!("📦 Total stock across items: {total}"))
            }

            Command::LowStock { threshold } => {
                let low: Vec<&Item> = items
                    .iter()
                    .filter(|it| it.quantity < *threshold)
                    .collect();
                if low.is_empty() {
                    DispatchOutcome::reply(format!("✅ No items below {threshold}."))
                } else {
                    DispatchOutcome::reply(format!(
                        "⚠️ Items with qty < {threshold}:\n{}",
                        format_rows(&low, LOW_STOCK_MAX_ROWS)
                    ))
                }
            }

            Command::Find { query } => {
                let wanted = query.to_lowercase();
                let found: Vec<&Item> = items
                    .iter()
                    .filter(|it| it.name.to_lowercase().contains(&wanted))
                    .collect();
                if found.is_empty() {
                    DispatchOutcome::reply(format!("No items matching \"{query}\""))
                } else {
                    DispatchOutcome::reply(format!(
                        "🔍 Found {} item(s):\n{}",
                        found.len(),
                        format_rows(&found, FIND_MAX_ROWS)
                    ))
                }
            }

            Command::Add { name, qty } => {
                match self.store.create(&ItemDraft::new(name.clone(), *qty)).await {
                    Ok(created) => {
                        tracing::info!(id = created.id, name = %created.name, "item created");
                        DispatchOutcome::mutated(format!("✅ Added \"{name}\" (qty: {qty})."))
                    }
                    Err(err) => action_failed("create", &err),
                }
            }

            Command::Update { target, qty } => {
                let Some(item) = resolve(target, items) else {
                    return DispatchOutcome::reply("❌ Item not found to update.");
                };
                match self
                    .store
                    .update(item.id, &ItemDraft::requantify(item, *qty))
                    .await
                {
                    Ok(updated) => {
                        tracing::info!(id = updated.id, quantity = updated.quantity, "item updated");
                        DispatchOutcome::mutated(format!(
                            "✏️ Updated \"{}\" → qty {qty}.",
                            item.name
                        ))
                    }
                    Err(err) => action_failed("update", &err),
                }
            }

            Command::Delete { target } => {
                let Some(item) = resolve(target, items) else {
                    return DispatchOutcome::reply("❌ Item not found to delete.");
                };
                match self.store.delete(item.id).await {
                    Ok(()) => {
                        tracing::info!(id = item.id, name = %item.name, "item deleted");
                        DispatchOutcome::mutated(format!("🗑️ Deleted \"{}\".", item.name))
                    }
                    Err(err) => action_failed("delete", &err),
                }
            }

            Command::Unknown => DispatchOutcome::reply(HELP_TEXT),
        }
    }
}

fn action_failed(op: &str, err: &StoreError) -> DispatchOutcome {
    tracing::warn!(%err, op, "inventory store call failed");
    DispatchOutcome::reply(ACTION_FAILED_TEXT)
}

/// Render up to `max` items as `name (qty: N)` lines.
fn format_rows(items: &[&Item], max: usize) -> String {
    if items.is_empty() {
        return "No items.".into();
    }
    items
        .iter()
        .take(max)
        .map(|it| format!("{} (qty: {})", it.name, it.quantity))
        .collect::<Vec<_>>()
        .join("\n")
}

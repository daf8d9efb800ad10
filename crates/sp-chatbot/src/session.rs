//! Conversational session state — an append-only transcript plus the busy
//! gate that admits one command at a time.
//!
//! The cycle is strictly submit → classify → dispatch → reply: the user
//! message lands in the log before dispatch starts, the bot reply after it
//! finishes, so the transcript alternates in submission order. The busy
//! flag is the sole admission control; it is released on every exit path.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use uuid::Uuid;

use sp_protocol::{Item, Message};

use crate::dispatcher::Dispatcher;
use crate::rules;

/// Greeting seeded into every new transcript. Enumerates the same command
/// shapes as the help reply.
pub const GREETING_TEXT: &str = "👋 Hello! I'm Inventory Assistant.\nHere are some commands you can try:\n- total stock\n- low stock\n- find <name>\n- add <name> <qty>\n- update <name> <qty>\n- delete <name>";

/// Outcome of a submit call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Input was blank or the session was busy; the log is untouched.
    Ignored,
    /// One full cycle ran and the reply was appended to the transcript.
    Replied {
        reply: Message,
        refresh_needed: bool,
    },
}

/// One user's conversation with the assistant.
pub struct ChatSession {
    id: Uuid,
    log: Mutex<Vec<Message>>,
    busy: AtomicBool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            log: Mutex::new(vec![Message::bot(GREETING_TEXT)]),
            busy: AtomicBool::new(false),
        }
    }

    /// Session id used for log correlation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Whether a submitted command is still in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Cloned snapshot of the transcript, in insertion order.
    pub async fn transcript(&self) -> Vec<Message> {
        self.log.lock().await.clone()
    }

    pub async fn log_len(&self) -> usize {
        self.log.lock().await.len()
    }

    /// Run one submit → classify → dispatch → reply cycle.
    ///
    /// A blank line is ignored, and so is any submission made while an
    /// earlier one is still in flight. The busy flag is held by an RAII
    /// guard, so the session returns to idle even if dispatch panics.
    pub async fn submit(
        &self,
        text: &str,
        items: &[Item],
        dispatcher: &Dispatcher<'_>,
    ) -> Submission {
        let text = text.trim();
        if text.is_empty() {
            return Submission::Ignored;
        }
        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            tracing::debug!(session = %self.id, "submission ignored, session busy");
            return Submission::Ignored;
        };

        self.log.lock().await.push(Message::user(text));

        let command = rules::classify(text);
        tracing::debug!(session = %self.id, ?command, "command classified");

        let outcome = dispatcher.execute(&command, items).await;

        let reply = Message::bot(outcome.reply);
        self.log.lock().await.push(reply.clone());

        Submission::Replied {
            reply,
            refresh_needed: outcome.refresh_needed,
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the busy flag for one submit cycle; releases it on drop.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
            .then_some(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use sp_protocol::Sender;
    use sp_store_client::MockInventoryStore;

    #[tokio::test]
    async fn new_session_is_greeted_and_idle() {
        let session = ChatSession::new();
        let transcript = session.transcript().await;
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].sender, Sender::Bot);
        assert!(transcript[0].text.contains("total stock"));
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let store = MockInventoryStore::new();
        let dispatcher = Dispatcher::new(&store);
        let session = ChatSession::new();

        assert_eq!(session.submit("   ", &[], &dispatcher).await, Submission::Ignored);
        assert_eq!(session.log_len().await, 1);
    }

    #[tokio::test]
    async fn submit_appends_user_then_bot() {
        let store = MockInventoryStore::with_sample_items();
        let dispatcher = Dispatcher::new(&store);
        let session = ChatSession::new();

        let submission = session
            .submit("total stock", &store.items(), &dispatcher)
            .await;
        let Submission::Replied { reply, refresh_needed } = submission else {
            panic!("expected a reply");
        };
        assert!(!refresh_needed);
        assert_eq!(reply.text, "📦 Total stock across items: 52");

        let transcript = session.transcript().await;
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1].sender, Sender::User);
        assert_eq!(transcript[1].text, "total stock");
        assert_eq!(transcript[2].sender, Sender::Bot);
    }

    #[tokio::test]
    async fn session_returns_to_idle_after_store_failure() {
        let store = MockInventoryStore::with_sample_items();
        store.set_fail_writes(true);
        let dispatcher = Dispatcher::new(&store);
        let session = ChatSession::new();
        let before = session.log_len().await;

        let submission = session
            .submit("add Mango 10", &store.items(), &dispatcher)
            .await;
        let Submission::Replied { reply, refresh_needed } = submission else {
            panic!("expected a reply");
        };
        assert!(reply.text.contains("error performing that action"));
        assert!(!refresh_needed);
        assert!(!session.is_busy());
        // exactly one user and one bot message were added
        assert_eq!(session.log_len().await, before + 2);
    }

    #[tokio::test]
    async fn busy_session_ignores_second_submit() {
        let store = MockInventoryStore::with_sample_items();
        store.set_write_delay(Duration::from_millis(100));
        let dispatcher = Dispatcher::new(&store);
        let session = ChatSession::new();
        let items = store.items();

        let (first, second) = tokio::join!(
            session.submit("add Durian 4", &items, &dispatcher),
            async {
                // let the first submission reach its in-flight store call
                tokio::time::sleep(Duration::from_millis(10)).await;
                assert!(session.is_busy());
                let second = session.submit("delete Mango", &items, &dispatcher).await;
                // the ignored submit left no trace: greeting + first user msg
                assert_eq!(session.log_len().await, 2);
                second
            }
        );

        assert_eq!(second, Submission::Ignored);
        let Submission::Replied { refresh_needed, .. } = first else {
            panic!("first submission should complete");
        };
        assert!(refresh_needed);
        assert!(!session.is_busy());
        // only the first command ran against the store
        assert_eq!(store.items().len(), 4);
    }

    #[tokio::test]
    async fn replies_are_appended_in_submission_order() {
        let store = MockInventoryStore::with_sample_items();
        let dispatcher = Dispatcher::new(&store);
        let session = ChatSession::new();
        let items = store.items();

        session.submit("find man", &items, &dispatcher).await;
        session.submit("low stock", &items, &dispatcher).await;

        let transcript = session.transcript().await;
        let texts: Vec<&str> = transcript.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(transcript.len(), 5);
        assert_eq!(texts[1], "find man");
        assert!(texts[2].contains("Found 1 item(s)"));
        assert_eq!(texts[3], "low stock");
        assert!(texts[4].contains("Apple (qty: 2)"));
    }
}

//! StockPilot chat engine — rule-based command interpretation over a live
//! inventory snapshot.
//!
//! Re-exports all modules so the driver binary and the e2e crate can use
//! `classify`, `Dispatcher`, and `ChatSession` directly.

pub mod config;
pub mod dispatcher;
pub mod resolver;
pub mod rules;
pub mod session;

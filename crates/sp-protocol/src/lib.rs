pub mod chat;
pub mod commands;
pub mod items;

pub use chat::*;
pub use commands::*;
pub use items::*;

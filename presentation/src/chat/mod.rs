//! Interactive chat module
//!
//! Provides a line-editor chat interface that keeps one conversation in
//! memory and feeds it back to the council on every turn.

mod repl;

pub use repl::{ChatCommand, ChatRepl};

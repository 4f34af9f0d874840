//! OpenRouter chat-completions adapter.
//!
//! - [`OpenRouterClient`] — [`ModelClient`](council_application::ModelClient) over one pooled reqwest client
//! - [`OpenRouterSettings`] — endpoint, key and pool settings

mod client;
mod types;

pub use client::{API_KEY_ENV, DEFAULT_API_URL, OpenRouterClient, OpenRouterSettings};

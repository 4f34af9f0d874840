//! Generate Title use case
//!
//! One lightweight call to the fast title model. Never fails: any problem
//! yields [`FALLBACK_TITLE`].

use crate::dispatch::CouncilContext;
use crate::ports::model_client::ModelClient;
use council_domain::core::string::{strip_quotes, truncate_chars};
use council_domain::{BackendId, ChatMessage, PromptTemplate};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Title used when the title model fails or returns nothing usable.
pub const FALLBACK_TITLE: &str = "New Conversation";

/// Longest title kept, ellipsis included.
pub const MAX_TITLE_CHARS: usize = 50;

/// Use case for naming a conversation after its first query
pub struct GenerateTitleUseCase<C: ModelClient + ?Sized> {
    ctx: CouncilContext<C>,
    title_model: BackendId,
    timeout: Duration,
}

impl<C: ModelClient + ?Sized> Clone for GenerateTitleUseCase<C> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            title_model: self.title_model.clone(),
            timeout: self.timeout,
        }
    }
}

impl<C: ModelClient + ?Sized> GenerateTitleUseCase<C> {
    pub fn new(ctx: CouncilContext<C>, title_model: BackendId, timeout: Duration) -> Self {
        Self {
            ctx,
            title_model,
            timeout,
        }
    }

    /// Produce a short title for `query`.
    pub async fn execute(&self, query: &str) -> String {
        let start = Instant::now();
        let messages = [ChatMessage::user(PromptTemplate::title_prompt(query))];

        let Some(completion) = self
            .ctx
            .call_or_none(&self.title_model, &messages, self.timeout)
            .await
        else {
            warn!(model = %self.title_model, "Title generation failed, using fallback");
            return FALLBACK_TITLE.to_string();
        };

        let title = clean_title(&completion.content);
        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            title = %title,
            "Title generated"
        );
        title
    }
}

/// Trim, strip surrounding quotes and cap at [`MAX_TITLE_CHARS`].
pub fn clean_title(raw: &str) -> String {
    let title = strip_quotes(raw.trim());
    if title.is_empty() {
        return FALLBACK_TITLE.to_string();
    }
    truncate_chars(title, MAX_TITLE_CHARS)
}

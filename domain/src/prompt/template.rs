//! Prompt templates for the council flow
//!
//! Wording is free to change; the ranking output contract
//! (`FINAL RANKING:` then `<n>. Response <Letter>`) is not, since
//! [`crate::council::parsing::parse_ranking`] depends on it.

use crate::council::label::AnonymizedAnswer;
use crate::council::parsing::RANKING_MARKER;
use crate::council::value_objects::{Stage1Result, Stage2Result};

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Stage 2 prompt: evaluate anonymized answers, then rank them.
    pub fn ranking_prompt(query: &str, answers: &[AnonymizedAnswer]) -> String {
        let responses_text = answers
            .iter()
            .map(|a| format!("{}:\n{}", a.label, a.text))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            r#"You are evaluating different responses to the following question:

Question: {query}

Here are the responses from different models (anonymized):

{responses_text}

Your task:
1. Evaluate each response on its own. Say what it does well and what it does poorly.
2. Then, at the very end of your reply, give a final ranking.

IMPORTANT: the final ranking MUST use exactly this format:
- A line reading "{marker}" (all caps, with the colon)
- Then the responses from best to worst as a numbered list
- Each line is a number, a period, a space, then ONLY the label (e.g. "1. Response A")
- No other text in the ranking section

Example of a complete reply:

Response A covers X in detail but misses Y...
Response B is accurate but shallow on Z...
Response C gives the most complete answer...

{marker}
1. Response C
2. Response A
3. Response B

Now give your evaluation and ranking:"#,
            marker = RANKING_MARKER,
        )
    }

    /// Stage 3 prompt: synthesize one answer from everything the council produced.
    ///
    /// Unlike the ranking prompt, real backend ids are visible here.
    pub fn chairman_prompt(
        query: &str,
        history_transcript: &str,
        stage1: &[Stage1Result],
        stage2: &[Stage2Result],
    ) -> String {
        let stage1_text = stage1
            .iter()
            .map(|r| format!("Model: {}\nResponse: {}", r.backend, r.response))
            .collect::<Vec<_>>()
            .join("\n\n");

        let stage2_text = stage2
            .iter()
            .map(|r| format!("Model: {}\nRanking: {}", r.judge, r.raw_text))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            r#"You are the Chairman of an LLM Council. Several AI models answered a user's question and then ranked each other's answers.

Original Question: {query}

Conversation so far (recent turns):
{history_transcript}

STAGE 1 - Individual Responses:
{stage1_text}

STAGE 2 - Peer Rankings:
{stage2_text}

As Chairman, synthesize all of this into a single, complete and accurate answer to the original question. Take into account:
- the individual answers and their insights
- what the peer rankings say about answer quality
- where the models agree and where they disagree

Give a clear, well-reasoned final answer that represents the council's collective judgement:"#
        )
    }

    /// Title prompt for the first turn of a conversation.
    pub fn title_prompt(query: &str) -> String {
        format!(
            r#"Generate a very short title (3-5 words at most) that summarizes the following question.
Keep it concise and descriptive. Do not use quotes or punctuation in the title.

Question: {query}

Title:"#
        )
    }
}

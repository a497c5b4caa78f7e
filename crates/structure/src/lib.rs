pub mod marker;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use llm::AnthropicClient;

/// One structured trivia question/answer pair. Immutable once built; scoped
/// to a single analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QAPair {
    pub question: String,
    pub answer: String,
}

/// Turns raw user text into canonical question/answer pairs.
///
/// Input that already carries Q:/A: markers (or `question? answer` one-liners)
/// is split deterministically; anything messier goes through the LLM, which is
/// asked to emit a JSON list of {question, answer} objects.
pub struct Structurer {
    llm: AnthropicClient,
    model: String,
}

impl Structurer {
    pub fn new(llm: AnthropicClient, model: String) -> Self {
        Self { llm, model }
    }

    pub async fn structure(&self, raw_text: &str) -> Result<Vec<QAPair>> {
        let trimmed = raw_text.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(pairs) = marker::parse_marked(trimmed) {
            debug!(pairs = pairs.len(), "Structured input via marker parser");
            return Ok(pairs);
        }

        self.structure_with_llm(trimmed).await
    }

    async fn structure_with_llm(&self, raw_text: &str) -> Result<Vec<QAPair>> {
        let prompt = llm::prompt::build_structuring_prompt(raw_text);
        let response = self
            .llm
            .complete(&self.model, 2048, &prompt)
            .await
            .context("Structuring request failed")?;

        let json = llm::extract_json_array(&response)
            .context("Structuring response contained no JSON list")?;
        let pairs: Vec<QAPair> = serde_json::from_str(json)
            .context("Structuring response was not a list of question/answer objects")?;

        let pairs: Vec<QAPair> = pairs
            .into_iter()
            .filter(|p| !p.question.trim().is_empty() && !p.answer.trim().is_empty())
            .collect();

        debug!(pairs = pairs.len(), "Structured input via LLM");
        Ok(pairs)
    }
}

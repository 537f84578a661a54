//! Car lookups phrased as a single-turn prompt

use super::{LlmError, LlmMessage, LlmRequest, LlmService};
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Sampling parameters for car lookups
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarInfoSettings {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for CarInfoSettings {
    fn default() -> Self {
        Self {
            max_tokens: 300,
            temperature: 0.7,
        }
    }
}

/// Asks the language model about a car make/model.
///
/// Every call is independent: no history is carried between queries.
#[derive(Clone)]
pub struct CarInfo {
    llm: Arc<dyn LlmService>,
    settings: CarInfoSettings,
}

impl CarInfo {
    pub fn new(llm: Arc<dyn LlmService>, settings: CarInfoSettings) -> Self {
        Self { llm, settings }
    }

    pub fn prompt(query: &str) -> String {
        format!(
            "Tell me about the car {query}, including its engine, transmission, and other specifications."
        )
    }

    fn build_request(&self, query: &str) -> LlmRequest {
        LlmRequest {
            system: Some(SYSTEM_PROMPT.to_string()),
            messages: vec![LlmMessage::user(Self::prompt(query))],
            max_tokens: Some(self.settings.max_tokens),
            temperature: Some(self.settings.temperature),
        }
    }

    /// Returns the trimmed text of the first completion.
    pub async fn ask(&self, query: &str) -> Result<String, LlmError> {
        let response = self.llm.complete(&self.build_request(query)).await?;
        Ok(response.text.trim().to_string())
    }
}

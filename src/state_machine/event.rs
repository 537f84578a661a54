//! Events that can occur in a conversation

use crate::llm::LlmError;
use crate::weather::{WeatherError, WeatherReport};

/// Events that trigger mode transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// Text typed (or a keyboard button pressed) by the user
    UserText { text: String },

    /// Weather provider answered, or failed to
    WeatherLookupComplete {
        city: String,
        outcome: Result<WeatherReport, WeatherError>,
    },

    /// Language model answered, or failed to
    CarLookupComplete {
        query: String,
        outcome: Result<String, LlmError>,
    },
}

impl Event {
    pub fn user_text(text: impl Into<String>) -> Self {
        Event::UserText { text: text.into() }
    }
}

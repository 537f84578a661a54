//! Effects produced by state transitions

use super::replies;

/// Quick-reply keyboard attached to a reply: rows of button labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<String>>,
}

impl Keyboard {
    /// The two-topic menu shown by `/start`
    pub fn topic_menu() -> Self {
        Self {
            rows: vec![vec![
                replies::WEATHER_LABEL.to_string(),
                replies::CAR_LABEL.to_string(),
            ]],
        }
    }

    #[cfg(test)]
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }
}

/// Effects to be executed after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Send text back to the conversation
    Reply {
        text: String,
        keyboard: Option<Keyboard>,
    },

    /// Query the weather provider for a city
    LookupWeather { city: String },

    /// Ask the language model about a car
    AskCar { query: String },
}

impl Effect {
    pub fn reply(text: impl Into<String>) -> Self {
        Effect::Reply {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn reply_with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Effect::Reply {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    /// Check if executing this effect calls an external provider
    #[cfg(test)]
    pub fn is_provider_call(&self) -> bool {
        matches!(self, Effect::LookupWeather { .. } | Effect::AskCar { .. })
    }
}

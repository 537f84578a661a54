//! Pure state transition function
//!
//! Given the same mode and event it always yields the same result, with no
//! I/O. Commands and menu labels are checked before the awaiting modes, so
//! `/start` or a menu label always wins over a pending question.

use super::replies;
use super::{Effect, Event, Keyboard, Mode};

/// Result of a state transition
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    pub new_mode: Mode,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(mode: Mode) -> Self {
        Self {
            new_mode: mode,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Pure transition function
pub fn transition(mode: Mode, event: Event) -> TransitionResult {
    match event {
        Event::UserText { text } => user_text(mode, text),

        // A lookup always ends the topic, whatever it returned
        Event::WeatherLookupComplete { outcome, .. } => {
            let body = match outcome {
                Ok(report) => report.to_string(),
                Err(_) => replies::WEATHER_FAILED.to_string(),
            };
            TransitionResult::new(Mode::Idle)
                .with_effect(Effect::reply(replies::weather_reply(&body)))
        }

        Event::CarLookupComplete { outcome, .. } => {
            let body = match outcome {
                Ok(text) => text,
                Err(e) if e.is_empty_result() => replies::CAR_NOT_FOUND.to_string(),
                Err(_) => replies::CAR_FAILED.to_string(),
            };
            TransitionResult::new(Mode::Idle)
                .with_effect(Effect::reply(replies::car_reply(&body)))
        }
    }
}

fn user_text(mode: Mode, text: String) -> TransitionResult {
    match (mode, text.as_str()) {
        (_, replies::START_COMMAND) => TransitionResult::new(Mode::Idle).with_effect(
            Effect::reply_with_keyboard(replies::WELCOME, Keyboard::topic_menu()),
        ),

        (_, replies::HELP_COMMAND) => {
            TransitionResult::new(Mode::Idle).with_effect(Effect::reply(replies::HELP))
        }

        (_, replies::WEATHER_LABEL) => TransitionResult::new(Mode::AwaitingWeatherCity)
            .with_effect(Effect::reply(replies::ASK_CITY)),

        (_, replies::CAR_LABEL) => TransitionResult::new(Mode::AwaitingCarQuery)
            .with_effect(Effect::reply(replies::ASK_CAR)),

        (Mode::AwaitingWeatherCity, _) => {
            TransitionResult::new(Mode::Idle).with_effect(Effect::LookupWeather { city: text })
        }

        (Mode::AwaitingCarQuery, _) => {
            TransitionResult::new(Mode::Idle).with_effect(Effect::AskCar { query: text })
        }

        (Mode::Idle, _) => {
            TransitionResult::new(Mode::Idle).with_effect(Effect::reply(replies::NOT_UNDERSTOOD))
        }
    }
}

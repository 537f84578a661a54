//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::*;
use crate::llm::{LlmError, LlmErrorKind};
use crate::weather::{WeatherError, WeatherErrorKind, WeatherReport};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_mode() -> impl Strategy<Value = Mode> {
    prop_oneof![
        Just(Mode::Idle),
        Just(Mode::AwaitingWeatherCity),
        Just(Mode::AwaitingCarQuery),
    ]
}

fn arb_command() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(replies::START_COMMAND.to_string()),
        Just(replies::HELP_COMMAND.to_string()),
        Just(replies::WEATHER_LABEL.to_string()),
        Just(replies::CAR_LABEL.to_string()),
    ]
}

/// Free text that is never one of the commands or labels
fn arb_free_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.'-]{0,40}".prop_filter("must not be a command", |s| !is_command(s))
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![arb_command(), arb_free_text()]
}

fn arb_weather_outcome() -> impl Strategy<Value = Result<WeatherReport, WeatherError>> {
    prop_oneof![
        ("[a-zA-Z ]{1,20}", "[a-z ]{1,20}", -50.0f64..50.0).prop_map(
            |(city, description, temperature)| Ok::<_, WeatherError>(WeatherReport {
                city,
                description,
                temperature,
            })
        ),
        prop_oneof![
            Just(WeatherErrorKind::Network),
            Just(WeatherErrorKind::Status),
            Just(WeatherErrorKind::Parse),
        ]
        .prop_map(|kind| Err::<WeatherReport, _>(WeatherError::new(kind, "failed"))),
    ]
}

fn arb_llm_error_kind() -> impl Strategy<Value = LlmErrorKind> {
    prop_oneof![
        Just(LlmErrorKind::Network),
        Just(LlmErrorKind::RateLimit),
        Just(LlmErrorKind::ServerError),
        Just(LlmErrorKind::Auth),
        Just(LlmErrorKind::InvalidRequest),
        Just(LlmErrorKind::NoCompletion),
        Just(LlmErrorKind::Unknown),
    ]
}

fn arb_car_outcome() -> impl Strategy<Value = Result<String, LlmError>> {
    prop_oneof![
        "[a-zA-Z0-9 .]{1,60}".prop_map(Ok::<String, LlmError>),
        arb_llm_error_kind().prop_map(|kind| Err::<String, _>(LlmError::new(kind, "failed"))),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_text().prop_map(|text| Event::UserText { text }),
        ("[a-zA-Z ]{1,20}", arb_weather_outcome())
            .prop_map(|(city, outcome)| Event::WeatherLookupComplete { city, outcome }),
        ("[a-zA-Z ]{1,20}", arb_car_outcome())
            .prop_map(|(query, outcome)| Event::CarLookupComplete { query, outcome }),
    ]
}

// ============================================================================
// Helpers
// ============================================================================

fn is_command(text: &str) -> bool {
    [
        replies::START_COMMAND,
        replies::HELP_COMMAND,
        replies::WEATHER_LABEL,
        replies::CAR_LABEL,
    ]
    .contains(&text)
}

fn replies_in(result: &TransitionResult) -> usize {
    result
        .effects
        .iter()
        .filter(|e| matches!(e, Effect::Reply { .. }))
        .count()
}

fn provider_calls_in(result: &TransitionResult) -> usize {
    result.effects.iter().filter(|e| e.is_provider_call()).count()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Every event yields exactly one effect: a reply or a single provider call
    #[test]
    fn prop_exactly_one_effect(mode in arb_mode(), event in arb_event()) {
        let result = transition(mode, event);
        prop_assert_eq!(result.effects.len(), 1);
        prop_assert_eq!(replies_in(&result) + provider_calls_in(&result), 1);
    }

    /// Provider calls always leave the conversation idle
    #[test]
    fn prop_provider_call_resets_to_idle(mode in arb_mode(), text in arb_text()) {
        let result = transition(mode, Event::UserText { text });
        if provider_calls_in(&result) > 0 {
            prop_assert_eq!(result.new_mode, Mode::Idle);
        }
    }

    /// Completed lookups always end in Idle with one reply, success or failure
    #[test]
    fn prop_completion_goes_idle(
        mode in arb_mode(),
        city in "[a-zA-Z ]{1,20}",
        weather in arb_weather_outcome(),
        query in "[a-zA-Z ]{1,20}",
        car in arb_car_outcome(),
    ) {
        let result = transition(mode, Event::WeatherLookupComplete { city, outcome: weather });
        prop_assert_eq!(result.new_mode, Mode::Idle);
        prop_assert_eq!(replies_in(&result), 1);

        let result = transition(mode, Event::CarLookupComplete { query, outcome: car });
        prop_assert_eq!(result.new_mode, Mode::Idle);
        prop_assert_eq!(replies_in(&result), 1);
    }

    /// `/start` from any mode shows both topic labels and goes Idle
    #[test]
    fn prop_start_shows_menu(mode in arb_mode()) {
        let result = transition(mode, Event::user_text(replies::START_COMMAND));
        prop_assert_eq!(result.new_mode, Mode::Idle);
        match &result.effects[0] {
            Effect::Reply { keyboard: Some(keyboard), .. } => {
                let labels: Vec<_> = keyboard.labels().collect();
                prop_assert!(labels.contains(&replies::WEATHER_LABEL));
                prop_assert!(labels.contains(&replies::CAR_LABEL));
            }
            other => prop_assert!(false, "Expected menu reply, got {:?}", other),
        }
    }

    /// Help is idempotent: same reply, Idle both times
    #[test]
    fn prop_help_idempotent(mode in arb_mode()) {
        let first = transition(mode, Event::user_text(replies::HELP_COMMAND));
        let second = transition(first.new_mode, Event::user_text(replies::HELP_COMMAND));
        prop_assert_eq!(first.new_mode, Mode::Idle);
        prop_assert_eq!(second.new_mode, Mode::Idle);
        prop_assert_eq!(first.effects, second.effects);
    }

    /// After "Weather Info", any non-command text becomes the city verbatim
    #[test]
    fn prop_weather_label_then_city(mode in arb_mode(), city in arb_free_text()) {
        let armed = transition(mode, Event::user_text(replies::WEATHER_LABEL));
        prop_assert_eq!(armed.new_mode, Mode::AwaitingWeatherCity);

        let result = transition(armed.new_mode, Event::UserText { text: city.clone() });
        prop_assert_eq!(result.new_mode, Mode::Idle);
        prop_assert_eq!(result.effects, vec![Effect::LookupWeather { city }]);
    }

    /// After "Car Info", any non-command text becomes the query verbatim
    #[test]
    fn prop_car_label_then_query(mode in arb_mode(), query in arb_free_text()) {
        let armed = transition(mode, Event::user_text(replies::CAR_LABEL));
        prop_assert_eq!(armed.new_mode, Mode::AwaitingCarQuery);

        let result = transition(armed.new_mode, Event::UserText { text: query.clone() });
        prop_assert_eq!(result.new_mode, Mode::Idle);
        prop_assert_eq!(result.effects, vec![Effect::AskCar { query }]);
    }

    /// Unrecognized text while Idle is rejected without a mode change
    #[test]
    fn prop_idle_rejects_free_text(text in arb_free_text()) {
        let result = transition(Mode::Idle, Event::UserText { text });
        prop_assert_eq!(result.new_mode, Mode::Idle);
        prop_assert_eq!(result.effects, vec![Effect::reply(replies::NOT_UNDERSTOOD)]);
    }

    /// Commands behave the same regardless of the current mode
    #[test]
    fn prop_commands_ignore_mode(a in arb_mode(), b in arb_mode(), command in arb_command()) {
        let left = transition(a, Event::UserText { text: command.clone() });
        let right = transition(b, Event::UserText { text: command });
        prop_assert_eq!(left, right);
    }

    /// Sequences of events never strand a conversation after a lookup completes
    #[test]
    fn prop_sequences_stay_consistent(events in proptest::collection::vec(arb_event(), 0..20)) {
        let mut mode = Mode::Idle;
        for event in events {
            let completes = matches!(
                event,
                Event::WeatherLookupComplete { .. } | Event::CarLookupComplete { .. }
            );
            let result = transition(mode, event);
            prop_assert_eq!(result.effects.len(), 1);
            if completes {
                prop_assert_eq!(result.new_mode, Mode::Idle);
            }
            mode = result.new_mode;
        }
    }
}

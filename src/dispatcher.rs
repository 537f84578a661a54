//! Turns one inbound message into exactly one reply
//!
//! The dispatcher holds the conversation's mode lock for the whole exchange,
//! runs the pure transition function, and executes the resulting effects.
//! Provider outcomes go back through the transition function as events, so
//! failures become apology replies and never escape.

#[cfg(test)]
pub mod testing;

use crate::llm::CarInfo;
use crate::message::{InboundMessage, MessageKind, OutboundReply};
use crate::session::{ConversationId, SessionStore};
use crate::state_machine::{replies, transition, Effect, Event, Mode};
use crate::weather::WeatherService;
use std::sync::Arc;

pub struct Dispatcher {
    sessions: Arc<SessionStore>,
    weather: Arc<dyn WeatherService>,
    car_info: CarInfo,
}

impl Dispatcher {
    pub fn new(
        sessions: Arc<SessionStore>,
        weather: Arc<dyn WeatherService>,
        car_info: CarInfo,
    ) -> Self {
        Self {
            sessions,
            weather,
            car_info,
        }
    }

    #[cfg(test)]
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Handle one message. Returns `None` only for non-text payloads.
    pub async fn dispatch(&self, message: &InboundMessage) -> Option<OutboundReply> {
        let conv_id = message.conversation_id;
        let MessageKind::Text(text) = &message.kind else {
            tracing::debug!(conv_id = %conv_id, "Ignoring non-text message");
            return None;
        };

        let mut guard = self.sessions.lock(conv_id).await;
        let (new_mode, reply) = self.process(conv_id, *guard, Event::user_text(text)).await;
        *guard = new_mode;

        Some(reply)
    }

    async fn process(
        &self,
        conv_id: ConversationId,
        mut mode: Mode,
        event: Event,
    ) -> (Mode, OutboundReply) {
        let mut reply = None;
        let mut events_to_process = vec![event];

        while let Some(current_event) = events_to_process.pop() {
            let result = transition(mode, current_event);

            if result.new_mode != mode {
                tracing::debug!(
                    conv_id = %conv_id,
                    from = %mode,
                    to = %result.new_mode,
                    "Mode changed"
                );
            }
            mode = result.new_mode;

            for effect in result.effects {
                match effect {
                    Effect::Reply { text, keyboard } => {
                        if reply.is_some() {
                            tracing::warn!(conv_id = %conv_id, "Replacing an earlier reply");
                        }
                        reply = Some(OutboundReply {
                            conversation_id: conv_id,
                            text,
                            keyboard,
                        });
                    }
                    Effect::LookupWeather { city } => {
                        events_to_process.push(self.lookup_weather(conv_id, city).await);
                    }
                    Effect::AskCar { query } => {
                        events_to_process.push(self.ask_car(conv_id, query).await);
                    }
                }
            }
        }

        let reply = reply.unwrap_or_else(|| {
            tracing::error!(conv_id = %conv_id, "Transition produced no reply");
            OutboundReply::text(conv_id, replies::NOT_UNDERSTOOD)
        });

        (mode, reply)
    }

    async fn lookup_weather(&self, conv_id: ConversationId, city: String) -> Event {
        tracing::debug!(conv_id = %conv_id, city = %city, "Looking up weather");
        let outcome = self.weather.current(&city).await;
        if let Err(e) = &outcome {
            tracing::warn!(
                conv_id = %conv_id,
                kind = e.kind.as_str(),
                error = %e,
                "Weather lookup failed"
            );
        }
        Event::WeatherLookupComplete { city, outcome }
    }

    async fn ask_car(&self, conv_id: ConversationId, query: String) -> Event {
        tracing::debug!(conv_id = %conv_id, query = %query, "Asking about car");
        let outcome = self.car_info.ask(&query).await;
        if let Err(e) = &outcome {
            tracing::warn!(
                conv_id = %conv_id,
                kind = e.kind.as_str(),
                error = %e,
                "Car lookup failed"
            );
        }
        Event::CarLookupComplete { query, outcome }
    }
}

//! Conversation mode

use std::fmt;

/// How the next text from a conversation is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Only commands and menu labels are understood
    #[default]
    Idle,

    /// Next non-command text is a city name
    AwaitingWeatherCity,

    /// Next non-command text is a car make/model
    AwaitingCarQuery,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::AwaitingWeatherCity => "awaiting_weather_city",
            Mode::AwaitingCarQuery => "awaiting_car_query",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

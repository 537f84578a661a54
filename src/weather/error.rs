//! Weather error types

use thiserror::Error;

/// Weather lookup failure with classification
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct WeatherError {
    pub kind: WeatherErrorKind,
    pub message: String,
}

impl WeatherError {
    pub fn new(kind: WeatherErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(WeatherErrorKind::Network, message)
    }

    pub fn status(message: impl Into<String>) -> Self {
        Self::new(WeatherErrorKind::Status, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(WeatherErrorKind::Parse, message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherErrorKind {
    /// Connection failures, timeouts, truncated bodies
    Network,
    /// Non-2xx answer, including unknown cities
    Status,
    /// Body missing the expected fields
    Parse,
}

impl WeatherErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Status => "status",
            Self::Parse => "parse",
        }
    }
}

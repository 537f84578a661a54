//! Weather provider abstraction
//!
//! Backs the "Weather Info" topic. Every failure collapses into a
//! [`WeatherError`]; the kind only feeds logging.

mod error;
mod openweather;

pub use error::{WeatherError, WeatherErrorKind};
pub use openweather::OpenWeatherService;

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Current conditions for one city
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    /// City exactly as the user typed it
    pub city: String,
    pub description: String,
    /// Degrees Celsius
    pub temperature: f64,
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Current weather in {}: {}, {}°C",
            self.city, self.description, self.temperature
        )
    }
}

/// Common interface for weather providers
#[async_trait]
pub trait WeatherService: Send + Sync {
    /// Look up current conditions for a free-text city name
    async fn current(&self, city: &str) -> Result<WeatherReport, WeatherError>;
}

/// Logging wrapper for weather services
pub struct LoggingWeatherService {
    inner: Arc<dyn WeatherService>,
}

impl LoggingWeatherService {
    pub fn new(inner: Arc<dyn WeatherService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl WeatherService for LoggingWeatherService {
    async fn current(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let start = std::time::Instant::now();
        let result = self.inner.current(city).await;
        let duration = start.elapsed();

        match &result {
            Ok(_) => {
                tracing::info!(
                    duration_ms = %duration.as_millis(),
                    "Weather lookup completed"
                );
            }
            Err(e) => {
                tracing::warn!(
                    duration_ms = %duration.as_millis(),
                    kind = e.kind.as_str(),
                    error = %e.message,
                    "Weather lookup failed"
                );
            }
        }

        result
    }
}

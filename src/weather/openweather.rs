//! `OpenWeatherMap` current-weather provider

use super::{WeatherError, WeatherReport, WeatherService};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub struct OpenWeatherService {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl OpenWeatherService {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WeatherError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            endpoint: format!("{}/data/2.5/weather", base_url.trim_end_matches('/')),
        })
    }

    fn parse_body(city: &str, body: &str) -> Result<WeatherReport, WeatherError> {
        let resp: CurrentWeatherResponse = serde_json::from_str(body)
            .map_err(|e| WeatherError::parse(format!("Failed to parse response: {e}")))?;

        let condition = resp
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::parse("Response has an empty weather array"))?;

        Ok(WeatherReport {
            city: city.to_string(),
            description: condition.description,
            temperature: resp.main.temp,
        })
    }

    fn status_error(status: reqwest::StatusCode, body: &str) -> WeatherError {
        // The provider reports unknown cities as {"cod":"404","message":"city not found"}
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(err) => WeatherError::status(format!("HTTP {status}: {}", err.message)),
            Err(_) => WeatherError::status(format!("HTTP {status}")),
        }
    }
}

#[async_trait]
impl WeatherService for OpenWeatherService {
    async fn current(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            // The URL carries the API key and the city
            .map_err(|e| {
                let timed_out = e.is_timeout();
                let e = e.without_url();
                if timed_out {
                    WeatherError::network(format!("Request timeout: {e}"))
                } else {
                    WeatherError::network(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| {
                WeatherError::network(format!("Failed to read response: {}", e.without_url()))
            })?;

        if !status.is_success() {
            return Err(Self::status_error(status, &body));
        }

        Self::parse_body(city, &body)
    }
}

// OpenWeatherMap API types

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    weather: Vec<Condition>,
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

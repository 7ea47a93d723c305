//! Current-weather lookup against an OpenWeather-compatible endpoint.
//!
//! The recommendation core only needs one thing from here: the condition
//! string found in `weather[0].main` (e.g. `Rain`, `Clear`).

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::{config, types::WeatherResponse};

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Weather service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Weather response did not contain a condition")]
    MissingCondition,

    #[error("Invalid coordinates: lat {lat}, lon {lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },
}

pub struct WeatherClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, config::weather_api_url())
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Looks up the current condition at the given coordinates.
    pub async fn current_condition(&self, lat: f64, lon: f64) -> Result<String, WeatherError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(WeatherError::InvalidCoordinates { lat, lon });
        }

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::Status { status, body });
        }

        let body = response.json::<WeatherResponse>().await?;
        condition_from_response(&body)
    }
}

/// Extracts `weather[0].main`.
pub fn condition_from_response(response: &WeatherResponse) -> Result<String, WeatherError> {
    response
        .weather
        .first()
        .map(|w| w.main.trim().to_string())
        .filter(|main| !main.is_empty())
        .ok_or(WeatherError::MissingCondition)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_first_condition() {
        let response: WeatherResponse = serde_json::from_str(
            r#"{"weather":[{"main":"Rain","description":"light rain"},{"main":"Mist"}],"name":"Ghent"}"#,
        )
        .unwrap();
        assert_eq!(condition_from_response(&response).unwrap(), "Rain");
    }

    #[test]
    fn empty_weather_list_is_an_error() {
        let response: WeatherResponse = serde_json::from_str(r#"{"weather":[]}"#).unwrap();
        assert!(matches!(
            condition_from_response(&response),
            Err(WeatherError::MissingCondition)
        ));
    }

    #[tokio::test]
    async fn rejects_out_of_range_coordinates() {
        let client = WeatherClient::with_base_url("key", "http://127.0.0.1:9");
        let result = client.current_condition(91.0, 0.0).await;
        assert!(matches!(result, Err(WeatherError::InvalidCoordinates { .. })));
    }
}

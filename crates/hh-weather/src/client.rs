//! HTTP client for the Open-Meteo forecast API.
//!
//! Wraps `reqwest` with typed response deserialization and retry on transient
//! failures. Only current conditions are requested.

use std::time::Duration;

use hh_core::{find_province, Province, WeatherData};
use reqwest::{Client, Url};

use crate::error::WeatherError;
use crate::normalize::normalize_forecast;
use crate::retry::RetryPolicy;
use crate::types::ForecastResponse;

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,weather_code";
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_BACKOFF_BASE_MS: u64 = 500;

/// Client for current weather by province.
///
/// Use [`WeatherClient::new`] for production or [`WeatherClient::with_base_url`]
/// to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl WeatherClient {
    /// Creates a client pointed at the public Open-Meteo API.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, WeatherError> {
        Self::with_base_url(timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`WeatherError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(timeout_secs: u64, base_url: &str) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("hungers-harmony/0.1 (weather)")
            .build()?;

        // Exactly one trailing slash so `join` appends to the base path.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| WeatherError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            retry: RetryPolicy::new(DEFAULT_MAX_RETRIES, DEFAULT_BACKOFF_BASE_MS),
        })
    }

    /// Overrides the retry policy. `max_retries = 0` disables retries.
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.retry = RetryPolicy::new(max_retries, backoff_base_ms);
        self
    }

    /// Current conditions at the province's capital.
    ///
    /// # Errors
    ///
    /// - [`WeatherError::Http`] on network failure or a non-2xx status after
    ///   retries are exhausted.
    /// - [`WeatherError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn current(&self, province: &Province) -> Result<WeatherData, WeatherError> {
        let url = self.forecast_url(province);
        let context = format!("forecast(province={})", province.id);
        let response = self
            .retry
            .run(|| self.request_json(&url, &context))
            .await?;

        let weather = normalize_forecast(&response);
        tracing::debug!(
            province = province.id,
            temperature = weather.temperature,
            condition = %weather.condition_id,
            "fetched current weather"
        );
        Ok(weather)
    }

    /// Like [`WeatherClient::current`], resolving the province by slug first.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::UnknownProvince`] for an unrecognised slug, or
    /// any error from [`WeatherClient::current`].
    pub async fn current_for(&self, province_id: &str) -> Result<WeatherData, WeatherError> {
        let province = find_province(province_id)
            .ok_or_else(|| WeatherError::UnknownProvince(province_id.to_string()))?;
        self.current(province).await
    }

    fn forecast_url(&self, province: &Province) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!("{}v1/forecast", self.base_url.path()));
        url.query_pairs_mut()
            .append_pair("latitude", &province.lat.to_string())
            .append_pair("longitude", &province.lng.to_string())
            .append_pair("current", CURRENT_FIELDS);
        url
    }

    async fn request_json(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<ForecastResponse, WeatherError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| WeatherError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

//! Public weather forecast API client.
//!
//! Fetches an hourly series for a coordinate, in knots, retrying transient
//! failures. When the upstream is unreachable the batch degrades to a
//! synthetic series of identical shape, flagged `estimated` so the UI can
//! say so; the core algorithms treat both the same.

use anyhow::{Context, Result};
use serde::Deserialize;
use shared::models::WeatherSample;

use crate::config::config;
use crate::mock;
use crate::retry::{Backoff, RetryError};

/// Hourly variables requested from the forecast API.
const HOURLY_FIELDS: &str = "temperature_2m,wind_speed_10m,wind_gusts_10m,wind_direction_10m,weather_code";

/// Default forecast window, hours.
pub const DEFAULT_FORECAST_HOURS: u32 = 72;

/// Longest requestable forecast window, hours (one week). Requests beyond
/// this are clamped; the window size drives allocation in both the real
/// fetch and the synthetic fallback.
pub const MAX_FORECAST_HOURS: u32 = 168;

fn clamp_hours(hours: u32) -> u32 {
    hours.clamp(1, MAX_FORECAST_HOURS)
}

/// One fetched (or synthesized) forecast series.
pub struct WeatherBatch {
    pub samples: Vec<WeatherSample>,
    /// True when the series is synthetic fallback data.
    pub estimated: bool,
}

pub struct WeatherSource {
    client: reqwest::Client,
    backoff: Backoff,
}

impl WeatherSource {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, backoff: Backoff::default() }
    }

    /// Build the forecast URL for a coordinate and window.
    pub fn build_url(base: &str, lat: f64, lon: f64, hours: u32) -> String {
        format!(
            "{}/v1/forecast?latitude={:.4}&longitude={:.4}&hourly={}&windspeed_unit=kn&timeformat=unixtime&forecast_hours={}",
            base, lat, lon, HOURLY_FIELDS, hours
        )
    }

    /// Fetch the hourly series for `(lat, lon)`, falling back to the demo
    /// generator when the upstream fails for good. The window is clamped
    /// to [`MAX_FORECAST_HOURS`].
    pub async fn fetch(&self, lat: f64, lon: f64, hours: u32) -> WeatherBatch {
        let hours = clamp_hours(hours);
        let result = self.backoff.run(|| self.try_fetch(lat, lon, hours)).await;
        match result {
            Ok(samples) => WeatherBatch { samples, estimated: false },
            Err(RetryError::Retryable(err)) | Err(RetryError::NonRetryable(err)) => {
                log::warn!("Weather fetch failed, serving estimated data: {:#}", err);
                WeatherBatch {
                    samples: mock::forecast_series(lat, lon, hours),
                    estimated: true,
                }
            }
        }
    }

    async fn try_fetch(&self, lat: f64, lon: f64, hours: u32) -> Result<Vec<WeatherSample>, RetryError> {
        let url = Self::build_url(&config().weather_url, lat, lon, hours);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach weather API")
            .map_err(RetryError::Retryable)?;

        let status = response.status();
        if status.is_server_error() {
            return Err(RetryError::Retryable(anyhow::anyhow!(
                "Weather API returned status: {}",
                status
            )));
        }
        if !status.is_success() {
            return Err(RetryError::NonRetryable(anyhow::anyhow!(
                "Weather API returned status: {}",
                status
            )));
        }

        let payload: ForecastResponse = response
            .json()
            .await
            .context("Malformed weather payload")
            .map_err(RetryError::NonRetryable)?;

        Ok(payload.into_samples())
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: HourlyBlock,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Vec<i64>,
    wind_speed_10m: Vec<f64>,
    wind_gusts_10m: Vec<f64>,
    temperature_2m: Vec<f64>,
    weather_code: Vec<u16>,
    #[serde(default)]
    wind_direction_10m: Vec<f64>,
}

impl ForecastResponse {
    /// Zip the columnar payload into row samples. Rows missing any
    /// required column are dropped rather than guessed at.
    fn into_samples(self) -> Vec<WeatherSample> {
        let h = self.hourly;
        (0..h.time.len())
            .filter_map(|i| {
                Some(WeatherSample {
                    timestamp: *h.time.get(i)?,
                    wind_speed_knots: *h.wind_speed_10m.get(i)?,
                    wind_gust_knots: *h.wind_gusts_10m.get(i)?,
                    temperature_c: *h.temperature_2m.get(i)?,
                    icon: h.weather_code.get(i)?.to_string(),
                    wind_direction_deg: h.wind_direction_10m.get(i).copied(),
                })
            })
            .collect()
    }
}

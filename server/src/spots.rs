//! Client for the hosted spot datastore's REST interface.
//!
//! Failures never cross this boundary as errors: callers always get a
//! (possibly empty) spot list plus a `degraded` flag.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shared::models::{Difficulty, GeoPoint};

use crate::config::config;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SpotFilter {
    pub country: Option<String>,
    pub difficulty: Option<Difficulty>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotList {
    pub spots: Vec<GeoPoint>,
    /// True when the upstream fetch failed and the list is empty because
    /// of it, not because there is nothing to show.
    pub degraded: bool,
}

pub struct SpotSource {
    client: reqwest::Client,
}

impl SpotSource {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Build the spot listing URL for a filter.
    pub fn build_url(base: &str, filter: &SpotFilter) -> String {
        let mut url = format!("{}/spots?select=*", base);
        if let Some(country) = &filter.country {
            url.push_str(&format!("&country=eq.{}", country));
        }
        if let Some(difficulty) = &filter.difficulty {
            let tag = match difficulty {
                Difficulty::Beginner => "beginner",
                Difficulty::Intermediate => "intermediate",
                Difficulty::Advanced => "advanced",
            };
            url.push_str(&format!("&difficulty=eq.{}", tag));
        }
        url
    }

    /// Fetch spots matching `filter`, degrading to an empty list on any
    /// upstream failure.
    pub async fn fetch(&self, filter: &SpotFilter) -> SpotList {
        match self.try_fetch(filter).await {
            Ok(spots) => SpotList { spots, degraded: false },
            Err(err) => {
                log::error!("Spot datastore fetch failed: {:#}", err);
                SpotList { spots: Vec::new(), degraded: true }
            }
        }
    }

    async fn try_fetch(&self, filter: &SpotFilter) -> Result<Vec<GeoPoint>> {
        let url = Self::build_url(&config().spots_url, filter);

        let mut request = self.client.get(&url);
        if let Some(key) = &config().spots_api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.context("Failed to reach spot datastore")?;

        match response.status() {
            reqwest::StatusCode::OK => {}
            status => {
                return Err(anyhow::anyhow!("Spot datastore returned status: {}", status));
            }
        }

        response
            .json::<Vec<GeoPoint>>()
            .await
            .context("Malformed spot list payload")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_without_filters() {
        let url = SpotSource::build_url("https://api.example.com/rest/v1", &SpotFilter::default());
        assert_eq!(url, "https://api.example.com/rest/v1/spots?select=*");
    }

    #[test]
    fn test_build_url_with_filters() {
        let filter = SpotFilter {
            country: Some("Spain".to_string()),
            difficulty: Some(Difficulty::Advanced),
        };
        let url = SpotSource::build_url("https://api.example.com/rest/v1", &filter);
        assert_eq!(
            url,
            "https://api.example.com/rest/v1/spots?select=*&country=eq.Spain&difficulty=eq.advanced"
        );
    }

    #[test]
    fn test_spot_payload_parses_with_optional_fields_missing() {
        let payload = r#"[
            {"id": "tarifa", "name": "Tarifa", "country": "Spain",
             "latitude": 36.0143, "longitude": -5.6044,
             "difficulty": "intermediate", "waterType": "choppy"},
            {"id": "somewhere", "name": "Somewhere", "country": "France",
             "latitude": 43.48, "longitude": -1.56}
        ]"#;
        let spots: Vec<GeoPoint> = serde_json::from_str(payload).unwrap();
        assert_eq!(spots.len(), 2);
        assert_eq!(spots[0].difficulty, Some(Difficulty::Intermediate));
        assert_eq!(spots[1].difficulty, None);
        assert_eq!(spots[1].water_type, None);
    }
}

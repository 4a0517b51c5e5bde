use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Base URL of the hosted spot datastore's REST interface.
    #[serde(default = "default_spots_url")]
    pub spots_url: String,
    /// API key for the spot datastore, sent as a bearer token when set.
    #[serde(default)]
    pub spots_api_key: Option<String>,
    /// Base URL of the public weather forecast API.
    #[serde(default = "default_weather_url")]
    pub weather_url: String,
    /// Endpoint receiving fire-and-forget interaction events.
    #[serde(default = "default_interactions_url")]
    pub interactions_url: String,
}

fn default_spots_url() -> String {
    "https://api.kitecast.app/rest/v1".to_string()
}

fn default_weather_url() -> String {
    "https://api.open-meteo.com".to_string()
}

fn default_interactions_url() -> String {
    "https://api.kitecast.app/rest/v1/interactions".to_string()
}

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    envy::prefixed("KITECAST_")
        .from_env::<Config>()
        .expect("Invalid KITECAST_* environment configuration")
});

pub fn config() -> &'static Config {
    &CONFIG
}

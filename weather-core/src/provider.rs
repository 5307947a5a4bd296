use crate::{Config, WeatherRecord, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Why a fetch produced no record.
///
/// The panel collapses all of these into "no data"; the distinction only
/// matters for diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("weather request could not complete: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("weather request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse weather response: {0}")]
    Parse(#[source] serde_json::Error),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a free-text city name, metric units.
    async fn current_weather(&self, city: &str) -> Result<WeatherRecord, FetchError>;
}

/// Construct the upstream provider from a resolved config.
///
/// A missing API key is not fatal: requests go out with an empty `appid`
/// and the upstream rejects them, which the panel shows as "no data".
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    let api_key = match config.api_key() {
        Some(key) => key.to_owned(),
        None => {
            tracing::warn!(
                "no OpenWeather API key configured; every lookup will be rejected upstream \
                 (hint: set OPENWEATHER_API_KEY or run `weather configure`)"
            );
            String::new()
        }
    };

    Box::new(OpenWeatherProvider::new(api_key).with_base_url(config.base_url()))
}

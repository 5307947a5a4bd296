//! Core library for the `weather` panel.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The upstream provider abstraction and its OpenWeather client
//! - The weather record model
//! - The panel component (fetch lifecycle) and its text renderer
//!
//! It is used by `weather-panel-cli`, but the panel can be hosted by any front end.

pub mod config;
pub mod model;
pub mod panel;
pub mod provider;
pub mod render;

pub use config::{Config, DEFAULT_CITY};
pub use model::WeatherRecord;
pub use panel::{PanelState, PanelView, WeatherPanel};
pub use provider::{FetchError, WeatherProvider, provider_from_config};

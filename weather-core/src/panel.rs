//! The weather panel: fetch lifecycle plus the state the renderer reads.
//!
//! State lives in a [`watch`] channel so every transition is atomic and
//! observers (a front end re-rendering on change, tests) can follow along.
//! There is deliberately no sequencing between overlapping fetches: each one
//! writes its outcome when it resolves, so the last to resolve wins.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use crate::model::WeatherRecord;
use crate::provider::WeatherProvider;

/// Everything the panel renders from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelState {
    /// Last successful response, or the empty record.
    pub weather: WeatherRecord,
    /// True while a fetch is in flight.
    pub loading: bool,
    /// Search input text, not yet submitted.
    pub city_query: String,
}

/// Render-ready projection of [`PanelState`].
#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    Loading,
    Weather { query: String, record: WeatherRecord },
    NoData { query: String },
}

impl PanelState {
    pub fn view(&self) -> PanelView {
        if self.loading {
            PanelView::Loading
        } else if self.weather.has_data() {
            PanelView::Weather {
                query: self.city_query.clone(),
                record: self.weather.clone(),
            }
        } else {
            PanelView::NoData {
                query: self.city_query.clone(),
            }
        }
    }
}

pub struct WeatherPanel {
    provider: Box<dyn WeatherProvider>,
    default_city: String,
    state: watch::Sender<PanelState>,
    activated: AtomicBool,
}

impl WeatherPanel {
    pub fn new(provider: Box<dyn WeatherProvider>, default_city: impl Into<String>) -> Self {
        let (state, _) = watch::channel(PanelState::default());
        Self {
            provider,
            default_city: default_city.into(),
            state,
            activated: AtomicBool::new(false),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> PanelState {
        self.state.borrow().clone()
    }

    pub fn view(&self) -> PanelView {
        self.state.borrow().view()
    }

    /// Notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<PanelState> {
        self.state.subscribe()
    }

    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|s| s.city_query = text);
    }

    /// First activation fetches the default city. Later calls return `None`.
    ///
    /// The panel counts as activated as soon as this returns `Some`, not when
    /// the fetch runs: dropping the returned future unpolled skips the
    /// default-city fetch for good. Await it, or use [`Self::fetch_weather`]
    /// to load a city explicitly afterwards.
    pub fn activate<'a>(&'a self) -> Option<impl Future<Output = ()> + Send + use<'a>> {
        if self.activated.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(self.fetch_weather(&self.default_city))
    }

    /// Fetch the current query, or `None` (and no state change) when it is empty.
    pub fn handle_search<'a>(&'a self) -> Option<impl Future<Output = ()> + Send + use<'a>> {
        let query = self.state.borrow().city_query.clone();
        if query.is_empty() {
            tracing::debug!("search submitted with empty query");
            return None;
        }
        Some(self.fetch_weather(&query))
    }

    /// Start a fetch for `city`.
    ///
    /// `loading` flips to true before this returns, so a caller can render
    /// the loading view while awaiting. The outcome replaces `weather`
    /// wholesale: the parsed record on success, the empty record on any
    /// failure. `loading` is reset when the future completes or is dropped.
    pub fn fetch_weather<'a>(&'a self, city: &str) -> impl Future<Output = ()> + Send + use<'a> {
        let guard = LoadingGuard::engage(&self.state);
        let city = city.to_owned();

        async move {
            let _guard = guard;
            tracing::debug!(%city, "fetching current weather");

            match self.provider.current_weather(&city).await {
                Ok(record) => {
                    tracing::debug!(%city, name = ?record.name, "weather fetched");
                    self.state.send_modify(|s| s.weather = record);
                }
                Err(err) => {
                    tracing::warn!(%city, error = %err, "weather fetch failed");
                    self.state.send_modify(|s| s.weather = WeatherRecord::default());
                }
            }
        }
    }
}

impl std::fmt::Debug for WeatherPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherPanel")
            .field("provider", &self.provider)
            .field("default_city", &self.default_city)
            .field("state", &*self.state.borrow())
            .finish()
    }
}

/// Holds `loading = true` for its lifetime.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<PanelState>,
}

impl<'a> LoadingGuard<'a> {
    fn engage(state: &'a watch::Sender<PanelState>) -> Self {
        state.send_modify(|s| s.loading = true);
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.loading = false);
    }
}

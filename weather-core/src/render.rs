//! Plain-text rendering of a [`PanelView`].

use chrono::NaiveDate;

use crate::model::WeatherRecord;
use crate::panel::PanelView;

pub const LOADING_TEXT: &str = "Loading...";
pub const NO_DATA_TEXT: &str = "No weather data available. Please try another city.";
pub const SEARCH_PLACEHOLDER: &str = "Search for a city name...";

const LABEL_WIDTH: usize = 12;

/// Render a view. `today` is supplied by the caller at render time.
pub fn render(view: &PanelView, today: NaiveDate) -> String {
    let lines = match view {
        PanelView::Loading => vec![LOADING_TEXT.to_string()],
        PanelView::Weather { query, record } => {
            let mut lines = search_lines(query);
            lines.extend(weather_lines(record, today));
            lines
        }
        PanelView::NoData { query } => {
            let mut lines = search_lines(query);
            lines.push(NO_DATA_TEXT.to_string());
            lines
        }
    };

    lines.join("\n")
}

/// Date as month/day/year, e.g. `10/16/2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

fn search_lines(query: &str) -> Vec<String> {
    let text = if query.is_empty() { SEARCH_PLACEHOLDER } else { query };
    vec![format!("[ {text} ]"), String::new()]
}

fn weather_lines(record: &WeatherRecord, today: NaiveDate) -> Vec<String> {
    let mut lines = vec![
        record.name.clone().unwrap_or_default(),
        format_date(today),
        String::new(),
    ];

    lines.extend(record.condition_descriptions().map(str::to_string));

    let visibility = record
        .visibility_km()
        .map_or_else(|| "N/A".to_string(), |km| format!("{km:.1}"));

    lines.extend([
        format!("{}°C", number(record.temperature_c())),
        String::new(),
        format!("{:<LABEL_WIDTH$}{} KM/H", "Wind", number(record.wind_speed())),
        format!("{:<LABEL_WIDTH$}{}%", "Humidity", number(record.humidity_pct())),
        format!("{:<LABEL_WIDTH$}{visibility} KM", "Visibility"),
    ]);

    lines
}

// Shortest form: 18 rather than 18.0.
fn number(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

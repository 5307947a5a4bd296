use serde::{Deserialize, Deserializer, Serialize};

/// Snapshot of one OpenWeather "current weather" response.
///
/// Mirrors the upstream JSON shape. Every field is optional because the
/// remote payload is not validated; fields we don't render are dropped on
/// deserialization. `WeatherRecord::default()` is the empty record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub weather: Vec<Condition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<MainReadings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<Wind>,

    /// Meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Upstream condition code. Kept as a float so `800.0` parses too.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    /// Degrees Celsius (requested with `units=metric`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl WeatherRecord {
    /// A record is displayable once the provider gave us a non-empty city name.
    pub fn has_data(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn condition_descriptions(&self) -> impl Iterator<Item = &str> {
        self.weather.iter().filter_map(|c| c.description.as_deref())
    }

    pub fn temperature_c(&self) -> Option<f64> {
        self.main.as_ref().and_then(|m| m.temp)
    }

    pub fn humidity_pct(&self) -> Option<f64> {
        self.main.as_ref().and_then(|m| m.humidity)
    }

    pub fn wind_speed(&self) -> Option<f64> {
        self.wind.as_ref().and_then(|w| w.speed)
    }

    pub fn visibility_km(&self) -> Option<f64> {
        self.visibility.map(|meters| meters / 1000.0)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Condition>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Condition>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: &str = r#"{
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
        "base": "stations",
        "main": {"temp": 14.2, "feels_like": 13.6, "pressure": 1012, "humidity": 77},
        "visibility": 10000,
        "wind": {"speed": 4.63, "deg": 250},
        "dt": 1760620000,
        "name": "London",
        "cod": 200
    }"#;

    #[test]
    fn parses_provider_payload_and_ignores_extra_fields() {
        let record: WeatherRecord = serde_json::from_str(LONDON).expect("valid payload");

        assert_eq!(record.name.as_deref(), Some("London"));
        assert_eq!(record.temperature_c(), Some(14.2));
        assert_eq!(record.humidity_pct(), Some(77.0));
        assert_eq!(record.wind_speed(), Some(4.63));
        assert_eq!(record.visibility_km(), Some(10.0));
        assert_eq!(
            record.condition_descriptions().collect::<Vec<_>>(),
            vec!["broken clouds"]
        );
        assert!(record.has_data());
    }

    #[test]
    fn empty_object_is_the_empty_record() {
        let record: WeatherRecord = serde_json::from_str("{}").expect("empty object");

        assert!(record.is_empty());
        assert!(!record.has_data());
        assert_eq!(record.temperature_c(), None);
        assert_eq!(record.visibility_km(), None);
    }

    #[test]
    fn null_condition_list_keeps_the_rest_of_the_record() {
        let record: WeatherRecord =
            serde_json::from_str(r#"{"name":"Paris","weather":null,"main":{"temp":18}}"#)
                .expect("null list is tolerated");

        assert!(record.weather.is_empty());
        assert!(record.has_data());
        assert_eq!(record.temperature_c(), Some(18.0));
    }

    #[test]
    fn float_condition_id_parses() {
        let record: WeatherRecord = serde_json::from_str(
            r#"{"name":"Paris","weather":[{"id":800.0,"description":"clear sky"}]}"#,
        )
        .expect("float id is tolerated");

        assert_eq!(record.weather[0].id, Some(800.0));
        assert_eq!(
            record.condition_descriptions().collect::<Vec<_>>(),
            vec!["clear sky"]
        );
    }

    #[test]
    fn blank_name_has_no_data() {
        let record: WeatherRecord =
            serde_json::from_str(r#"{"name":"","main":{"temp":18}}"#).expect("valid payload");

        assert!(!record.has_data());
    }

    #[test]
    fn record_without_name_has_no_data() {
        let record: WeatherRecord =
            serde_json::from_str(r#"{"main": {"temp": 3}}"#).expect("partial payload");

        assert!(!record.has_data());
        assert!(!record.is_empty());
    }
}

// OpenWeather payloads and their mapping to domain models
use crate::domain::conditions::CurrentConditions;
use crate::domain::forecast::{ForecastSample, ForecastSeries, DEFAULT_ICON};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct ForecastPayload {
    #[serde(default)]
    pub list: Vec<ForecastItem>,
    #[serde(default)]
    pub city: Option<CityInfo>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastItem {
    #[serde(default)]
    pub dt: Option<i64>,
    #[serde(default)]
    pub main: Option<MainBlock>,
    #[serde(default)]
    pub weather: Vec<WeatherBlock>,
    #[serde(default)]
    pub pop: Option<f64>,
    #[serde(default)]
    pub rain: Option<RainBlock>,
}

#[derive(Debug, Deserialize, Default)]
pub struct MainBlock {
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub temp_min: Option<f64>,
    #[serde(default)]
    pub temp_max: Option<f64>,
    #[serde(default)]
    pub humidity: Option<u8>,
}

#[derive(Debug, Deserialize, Default)]
pub struct WeatherBlock {
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RainBlock {
    #[serde(rename = "3h", default)]
    pub three_hours: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct CityInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub timezone: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sys: Option<SysBlock>,
    #[serde(default)]
    pub main: Option<MainBlock>,
    #[serde(default)]
    pub wind: Option<WindBlock>,
    #[serde(default)]
    pub weather: Vec<WeatherBlock>,
}

#[derive(Debug, Deserialize)]
pub struct SysBlock {
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WindBlock {
    #[serde(default)]
    pub speed: Option<f64>,
}

pub fn forecast_to_domain(payload: ForecastPayload) -> ForecastSeries {
    let (city_name, country, timezone_offset_seconds) = match payload.city {
        Some(city) => (
            city.name.unwrap_or_default(),
            city.country.unwrap_or_default(),
            city.timezone.unwrap_or(0),
        ),
        None => (String::new(), String::new(), 0),
    };

    let samples = payload
        .list
        .into_iter()
        .filter_map(|item| {
            let sample = item_to_sample(item);
            if sample.is_none() {
                tracing::debug!("Dropping forecast item without a timestamp");
            }
            sample
        })
        .collect();

    ForecastSeries {
        city_name,
        country,
        timezone_offset_seconds,
        samples,
    }
}

fn item_to_sample(item: ForecastItem) -> Option<ForecastSample> {
    let dt = item.dt?;
    let main = item.main.unwrap_or_default();
    let weather = item.weather.into_iter().next().unwrap_or_default();

    Some(ForecastSample {
        timestamp_utc_seconds: dt,
        temperature_min: main.temp_min,
        temperature_max: main.temp_max,
        temperature_current: main.temp,
        condition_main: weather.main.unwrap_or_default(),
        condition_icon: weather.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
        condition_description: weather.description.unwrap_or_default(),
        precipitation_probability: item.pop,
        precipitation_volume_mm: item.rain.and_then(|r| r.three_hours),
    })
}

pub fn current_to_domain(payload: CurrentPayload) -> CurrentConditions {
    let main = payload.main.unwrap_or_default();
    let weather = payload.weather.into_iter().next().unwrap_or_default();

    CurrentConditions {
        city_name: payload.name.unwrap_or_default(),
        country: payload.sys.and_then(|s| s.country).unwrap_or_default(),
        temperature: main.temp,
        humidity: main.humidity,
        wind_speed: payload.wind.and_then(|w| w.speed),
        condition_main: weather.main.unwrap_or_default(),
        condition_description: weather.description.unwrap_or_default(),
        condition_icon: weather.icon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_payload_mapping() {
        let json = r#"{
            "cod": "200",
            "list": [
                {
                    "dt": 1704110400,
                    "main": {"temp": 25.3, "temp_min": 24.1, "temp_max": 26.8, "humidity": 80},
                    "weather": [{"id": 500, "main": "Rain", "description": "chuva leve", "icon": "10d"}],
                    "pop": 0.72,
                    "rain": {"3h": 1.35},
                    "dt_txt": "2024-01-01 12:00:00"
                },
                {
                    "dt": 1704121200,
                    "main": {"temp": 27.0},
                    "weather": []
                },
                {
                    "main": {"temp": 20.0}
                }
            ],
            "city": {"name": "Recife", "country": "BR", "timezone": -10800}
        }"#;

        let payload: ForecastPayload = serde_json::from_str(json).expect("valid payload");
        let series = forecast_to_domain(payload);

        assert_eq!(series.city_name, "Recife");
        assert_eq!(series.timezone_offset_seconds, -10800);
        assert_eq!(series.samples.len(), 2);

        let first = &series.samples[0];
        assert_eq!(first.timestamp_utc_seconds, 1_704_110_400);
        assert_eq!(first.temperature_min, Some(24.1));
        assert_eq!(first.temperature_max, Some(26.8));
        assert_eq!(first.condition_icon, "10d");
        assert_eq!(first.precipitation_probability, Some(0.72));
        assert_eq!(first.precipitation_volume_mm, Some(1.35));

        let second = &series.samples[1];
        assert_eq!(second.temperature_min, None);
        assert_eq!(second.temperature_current, Some(27.0));
        assert_eq!(second.condition_icon, DEFAULT_ICON);
        assert_eq!(second.precipitation_probability, None);
        assert_eq!(second.precipitation_volume_mm, None);
    }

    #[test]
    fn test_forecast_without_city_defaults_to_utc() {
        let payload: ForecastPayload = serde_json::from_str(r#"{"list": []}"#).expect("valid payload");
        let series = forecast_to_domain(payload);
        assert_eq!(series.timezone_offset_seconds, 0);
        assert!(series.samples.is_empty());
    }

    #[test]
    fn test_current_payload_mapping() {
        let json = r#"{
            "name": "Recife",
            "sys": {"country": "BR", "sunrise": 1704096000},
            "main": {"temp": 29.4, "humidity": 70},
            "wind": {"speed": 5.1, "deg": 120},
            "weather": [{"main": "Clouds", "description": "nuvens dispersas", "icon": "03d"}]
        }"#;

        let payload: CurrentPayload = serde_json::from_str(json).expect("valid payload");
        let current = current_to_domain(payload);

        assert_eq!(current.city_name, "Recife");
        assert_eq!(current.country, "BR");
        assert_eq!(current.temperature, Some(29.4));
        assert_eq!(current.humidity, Some(70));
        assert_eq!(current.wind_speed, Some(5.1));
        assert_eq!(current.condition_icon.as_deref(), Some("03d"));
    }

    #[test]
    fn test_current_payload_tolerates_missing_blocks() {
        let payload: CurrentPayload = serde_json::from_str(r#"{"name": "Natal"}"#).expect("valid payload");
        let current = current_to_domain(payload);
        assert_eq!(current.temperature, None);
        assert_eq!(current.country, "");
        assert_eq!(current.condition_icon, None);
    }
}

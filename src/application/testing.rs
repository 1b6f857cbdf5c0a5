// Test doubles for the weather provider
use crate::application::weather_provider::{Endpoint, ProviderError, RawPayload, WeatherProvider};
use crate::domain::conditions::CurrentConditions;
use crate::domain::forecast::{ForecastSample, ForecastSeries};
use crate::domain::location::LocationQuery;
use async_trait::async_trait;
use std::sync::Mutex;

pub struct StubProvider {
    pub current: Result<CurrentConditions, ProviderError>,
    pub forecast: Result<ForecastSeries, ProviderError>,
    pub raw: Result<RawPayload, ProviderError>,
    pub has_key: bool,
    pub calls: Mutex<Vec<(Endpoint, LocationQuery)>>,
}

impl StubProvider {
    pub fn with_forecast(series: ForecastSeries) -> Self {
        Self {
            forecast: Ok(series),
            ..Self::default()
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            has_key: !matches!(error, ProviderError::MissingApiKey),
            current: Err(error.clone()),
            forecast: Err(error.clone()),
            raw: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded_calls(&self) -> Vec<(Endpoint, LocationQuery)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, endpoint: Endpoint, query: &LocationQuery) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((endpoint, query.clone()));
        }
    }
}

impl Default for StubProvider {
    fn default() -> Self {
        Self {
            current: Ok(sample_conditions()),
            forecast: Ok(sample_series()),
            raw: Ok(RawPayload {
                content_type: Some("application/json".to_string()),
                body: r#"{"name":"Recife"}"#.to_string(),
            }),
            has_key: true,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl WeatherProvider for StubProvider {
    fn has_credentials(&self) -> bool {
        self.has_key
    }

    async fn fetch_raw(&self, endpoint: Endpoint, query: &LocationQuery) -> Result<RawPayload, ProviderError> {
        self.record(endpoint, query);
        self.raw.clone()
    }

    async fn current_conditions(&self, query: &LocationQuery) -> Result<CurrentConditions, ProviderError> {
        self.record(Endpoint::CurrentWeather, query);
        self.current.clone()
    }

    async fn forecast_series(&self, query: &LocationQuery) -> Result<ForecastSeries, ProviderError> {
        self.record(Endpoint::Forecast, query);
        self.forecast.clone()
    }
}

pub fn sample_conditions() -> CurrentConditions {
    CurrentConditions {
        city_name: "Recife".to_string(),
        country: "BR".to_string(),
        temperature: Some(29.46),
        humidity: Some(74),
        wind_speed: Some(4.1),
        condition_main: "Clouds".to_string(),
        condition_description: "nuvens dispersas".to_string(),
        condition_icon: Some("03d".to_string()),
    }
}

/// Recife (UTC-3). With "now" at 2024-01-01T12:00Z, three samples fall on
/// the local 1st and one on the 2nd.
pub fn sample_series() -> ForecastSeries {
    const JAN_1_NOON: i64 = 1_704_110_400;
    const HOUR: i64 = 3600;

    let entry = |offset_hours: i64, pop: f64, mm: Option<f64>, icon: &str| ForecastSample {
        temperature_min: Some(24.0 + offset_hours as f64 / 3.0),
        temperature_max: Some(27.0 + offset_hours as f64 / 3.0),
        temperature_current: Some(25.5),
        condition_main: "Rain".to_string(),
        condition_icon: icon.to_string(),
        condition_description: "chuva leve".to_string(),
        precipitation_probability: Some(pop),
        precipitation_volume_mm: mm,
        ..ForecastSample::new(JAN_1_NOON + offset_hours * HOUR)
    };

    ForecastSeries {
        city_name: "Recife".to_string(),
        country: "BR".to_string(),
        timezone_offset_seconds: -3 * HOUR,
        samples: vec![
            entry(0, 0.3, None, "04d"),
            entry(3, 0.8, Some(4.0), "10d"),
            entry(6, 0.5, Some(2.0), "10d"),
            entry(15, 0.1, None, "01n"),
        ],
    }
}

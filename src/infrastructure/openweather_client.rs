// OpenWeather provider implementation
use crate::application::weather_provider::{Endpoint, ProviderError, RawPayload, WeatherProvider};
use crate::domain::conditions::CurrentConditions;
use crate::domain::forecast::ForecastSeries;
use crate::domain::location::LocationQuery;
use crate::infrastructure::openweather_mapper::{
    current_to_domain, forecast_to_domain, CurrentPayload, ForecastPayload,
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl OpenWeatherClient {
    pub fn new(base_url: String, api_key: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            http,
        })
    }

    fn build_query_url(&self, endpoint: Endpoint, query: &LocationQuery, api_key: &str) -> String {
        let mut url = format!(
            "{}/{}?units={}&lang={}&appid={}",
            self.base_url,
            endpoint.path(),
            query.units.as_str(),
            urlencoding::encode(&query.lang),
            urlencoding::encode(api_key)
        );

        if let Some(city) = &query.city {
            url.push_str(&format!("&q={}", urlencoding::encode(city)));
        }
        if let Some((lat, lon)) = query.coordinates {
            url.push_str(&format!("&lat={}&lon={}", lat, lon));
        }

        url
    }

    async fn execute(&self, endpoint: Endpoint, query: &LocationQuery) -> Result<reqwest::Response, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;
        let url = self.build_query_url(endpoint, query, api_key);

        let response = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            // the URL carries the key
            .map_err(|e| ProviderError::Transport(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                "OpenWeather {} for {} failed with status {}",
                endpoint.path(),
                query.describe(),
                status
            );
            return Err(ProviderError::Upstream { status, body });
        }

        Ok(response)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch_raw(&self, endpoint: Endpoint, query: &LocationQuery) -> Result<RawPayload, ProviderError> {
        let response = self.execute(endpoint, query).await?;
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.without_url().to_string()))?;

        Ok(RawPayload { content_type, body })
    }

    async fn current_conditions(&self, query: &LocationQuery) -> Result<CurrentConditions, ProviderError> {
        let payload = self
            .execute(Endpoint::CurrentWeather, query)
            .await?
            .json::<CurrentPayload>()
            .await
            .map_err(|e| ProviderError::Decode(e.without_url().to_string()))?;

        Ok(current_to_domain(payload))
    }

    async fn forecast_series(&self, query: &LocationQuery) -> Result<ForecastSeries, ProviderError> {
        let payload = self
            .execute(Endpoint::Forecast, query)
            .await?
            .json::<ForecastPayload>()
            .await
            .map_err(|e| ProviderError::Decode(e.without_url().to_string()))?;

        Ok(forecast_to_domain(payload))
    }
}

// Proxy service - Forwards browser requests upstream with the server-held key
use crate::application::weather_provider::{Endpoint, ProviderError, RawPayload, WeatherProvider};
use crate::domain::location::LocationQuery;
use serde::de::IgnoredAny;
use std::sync::Arc;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

#[derive(Clone)]
pub struct ProxyService {
    provider: Arc<dyn WeatherProvider>,
}

impl ProxyService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Fails before any parameter validation when no key is configured
    pub fn ensure_ready(&self) -> Result<(), ProviderError> {
        if self.provider.has_credentials() {
            Ok(())
        } else {
            Err(ProviderError::MissingApiKey)
        }
    }

    /// Relays a successful upstream body once it is known to be JSON
    pub async fn forward(&self, endpoint: Endpoint, query: &LocationQuery) -> Result<RawPayload, ProviderError> {
        tracing::debug!("Proxying {} for {}", endpoint.path(), query.describe());
        let payload = self.provider.fetch_raw(endpoint, query).await?;

        serde_json::from_str::<IgnoredAny>(&payload.body).map_err(|e| {
            tracing::warn!("OpenWeather {} answered a non-JSON body: {}", endpoint.path(), e);
            ProviderError::Transport(format!("upstream body is not JSON: {}", e))
        })?;

        Ok(RawPayload {
            content_type: Some(JSON_CONTENT_TYPE.to_string()),
            body: payload.body,
        })
    }
}

// HTTP request handlers
use crate::application::weather_provider::Endpoint;
use crate::domain::location::LocationQuery;
use crate::infrastructure::http_response::{accepts_brotli, json_response, proxy_response};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use crate::presentation::view_model::{current_to_view, forecast_to_view};
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct LocationParams {
    pub q: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub units: Option<String>,
    pub lang: Option<String>,
}

impl LocationParams {
    fn to_query(&self, default_lang: &str) -> Result<LocationQuery, ApiError> {
        Ok(LocationQuery::from_params(
            self.q.as_deref(),
            self.lat.as_deref(),
            self.lon.as_deref(),
            self.units.as_deref(),
            self.lang.as_deref(),
            default_lang,
        )?)
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Any non-GET method on a known route
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn forward(
    endpoint: Endpoint,
    params: &LocationParams,
    headers: &HeaderMap,
    state: &AppState,
) -> Result<Response, ApiError> {
    state.proxy_service.ensure_ready()?;
    let query = params.to_query(&state.default_lang)?;

    let payload = state.proxy_service.forward(endpoint, &query).await?;
    proxy_response(payload, accepts_brotli(headers))
        .await
        .map_err(ApiError::Response)
}

/// Current weather, relayed from OpenWeather with the server-held key
pub async fn weather_proxy(
    Query(params): Query<LocationParams>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    forward(Endpoint::CurrentWeather, &params, &headers, &state).await
}

/// 5-day / 3-hour forecast, relayed from OpenWeather with the server-held key
pub async fn forecast_proxy(
    Query(params): Query<LocationParams>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    forward(Endpoint::Forecast, &params, &headers, &state).await
}

/// Aggregated 5-day and same-day views
pub async fn forecast_summary(
    Query(params): Query<LocationParams>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    state.proxy_service.ensure_ready()?;
    let query = params.to_query(&state.default_lang)?;

    let overview = state.forecast_service.get_overview(&query).await?;
    json_response(&forecast_to_view(overview), accepts_brotli(&headers))
        .await
        .map_err(ApiError::Response)
}

/// Current conditions card
pub async fn current_summary(
    Query(params): Query<LocationParams>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    state.proxy_service.ensure_ready()?;
    let query = params.to_query(&state.default_lang)?;

    let overview = state.weather_service.get_current(&query).await?;
    json_response(&current_to_view(overview), accepts_brotli(&headers))
        .await
        .map_err(ApiError::Response)
}

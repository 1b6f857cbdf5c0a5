// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    current_summary, forecast_proxy, forecast_summary, health_check, method_not_allowed, weather_proxy,
};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check).fallback(method_not_allowed))
        .route("/api/weather", get(weather_proxy).fallback(method_not_allowed))
        .route("/api/forecast", get(forecast_proxy).fallback(method_not_allowed))
        .route("/api/forecast/summary", get(forecast_summary).fallback(method_not_allowed))
        .route("/api/current", get(current_summary).fallback(method_not_allowed))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Application state for HTTP handlers
use crate::application::forecast_service::ForecastService;
use crate::application::proxy_service::ProxyService;
use crate::application::weather_service::WeatherService;

#[derive(Clone)]
pub struct AppState {
    pub weather_service: WeatherService,
    pub forecast_service: ForecastService,
    pub proxy_service: ProxyService,
    pub default_lang: String,
}

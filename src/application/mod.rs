// Application layer - Use cases over the weather provider port
pub mod clock;
pub mod forecast_service;
pub mod proxy_service;
pub mod weather_provider;
pub mod weather_service;

#[cfg(test)]
pub mod testing;

// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_response;
pub mod openweather_client;
pub mod openweather_mapper;

// Domain layer - Forecast models and the pure aggregation logic
pub mod aggregation;
pub mod conditions;
pub mod forecast;
pub mod location;
pub mod units;

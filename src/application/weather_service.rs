// Weather service - Use case for the current conditions card
use crate::application::weather_provider::{ProviderError, WeatherProvider};
use crate::domain::conditions::{mood_phrase, CurrentConditions, WeatherCategory};
use crate::domain::location::LocationQuery;
use crate::domain::units::Units;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CurrentOverview {
    pub conditions: CurrentConditions,
    pub units: Units,
    pub category: WeatherCategory,
    pub mood: &'static str,
}

#[derive(Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub async fn get_current(&self, query: &LocationQuery) -> Result<CurrentOverview, ProviderError> {
        let conditions = self.provider.current_conditions(query).await?;
        let category = WeatherCategory::from_main(&conditions.condition_main);
        let mood = mood_phrase(&conditions.condition_main, conditions.temperature, query.units);

        Ok(CurrentOverview {
            conditions,
            units: query.units,
            category,
            mood,
        })
    }
}

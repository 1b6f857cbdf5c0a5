// Forecast service - Use case for the 5-day and same-day views
use crate::application::clock::Clock;
use crate::application::weather_provider::{ProviderError, WeatherProvider};
use crate::domain::aggregation::{summarize_five_day, summarize_today_with};
use crate::domain::forecast::{DaySummary, HighlightThresholds, RollupHighlights, TodayView};
use crate::domain::location::LocationQuery;
use crate::domain::units::Units;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ForecastOverview {
    pub city_name: String,
    pub country: String,
    pub timezone_offset_seconds: i64,
    pub units: Units,
    pub days: Vec<DaySummary>,
    pub today: TodayView,
    /// Present only when today has samples
    pub rollup_highlights: Option<RollupHighlights>,
}

#[derive(Clone)]
pub struct ForecastService {
    provider: Arc<dyn WeatherProvider>,
    clock: Arc<dyn Clock>,
    thresholds: HighlightThresholds,
}

impl ForecastService {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        clock: Arc<dyn Clock>,
        thresholds: HighlightThresholds,
    ) -> Self {
        Self {
            provider,
            clock,
            thresholds,
        }
    }

    pub fn thresholds(&self) -> &HighlightThresholds {
        &self.thresholds
    }

    pub async fn get_overview(&self, query: &LocationQuery) -> Result<ForecastOverview, ProviderError> {
        let series = self.provider.forecast_series(query).await?;
        let now_millis = self.clock.now_millis();

        tracing::debug!(
            "Aggregating {} samples for {} (offset {}s)",
            series.samples.len(),
            query.describe(),
            series.timezone_offset_seconds
        );

        let days = summarize_five_day(&series.samples, series.timezone_offset_seconds);
        let today = summarize_today_with(
            &series.samples,
            series.timezone_offset_seconds,
            now_millis,
            &self.thresholds,
        );
        let rollup_highlights = today.rollup.map(|r| r.highlights(&self.thresholds));

        Ok(ForecastOverview {
            city_name: series.city_name,
            country: series.country,
            timezone_offset_seconds: series.timezone_offset_seconds,
            units: query.units,
            days,
            today,
            rollup_highlights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::clock::FixedClock;
    use crate::application::testing::{StubProvider, sample_series};
    use crate::domain::forecast::{HighlightClass, TodayStatus};

    // 2024-01-01T12:00:00Z
    const NOON_JAN_1_MS: i64 = 1_704_110_400_000;

    fn service(provider: StubProvider, thresholds: HighlightThresholds) -> ForecastService {
        ForecastService::new(Arc::new(provider), Arc::new(FixedClock(NOON_JAN_1_MS)), thresholds)
    }

    #[tokio::test]
    async fn test_overview_combines_both_views() {
        let provider = StubProvider::with_forecast(sample_series());
        let overview = service(provider, HighlightThresholds::default())
            .get_overview(&LocationQuery::city("Recife"))
            .await
            .expect("overview");

        assert_eq!(overview.city_name, "Recife");
        assert_eq!(overview.days.len(), 2);
        assert_eq!(overview.today.status(), TodayStatus::RainSignal);
        assert_eq!(overview.today.entries.len(), 3);

        let highlights = overview.rollup_highlights.expect("highlights");
        assert_eq!(highlights.probability, HighlightClass::Likely);
        assert_eq!(highlights.volume, HighlightClass::Rainy);
    }

    #[tokio::test]
    async fn test_configured_thresholds_are_applied() {
        let provider = StubProvider::with_forecast(sample_series());
        let thresholds = HighlightThresholds {
            probability_pct: 95,
            volume_mm: 50.0,
        };
        let overview = service(provider, thresholds)
            .get_overview(&LocationQuery::city("Recife"))
            .await
            .expect("overview");

        let highlights = overview.rollup_highlights.expect("highlights");
        assert_eq!(highlights.probability, HighlightClass::None);
        assert_eq!(highlights.volume, HighlightClass::None);
    }

    #[tokio::test]
    async fn test_empty_series_has_no_highlights() {
        let mut series = sample_series();
        series.samples.clear();
        let overview = service(StubProvider::with_forecast(series), HighlightThresholds::default())
            .get_overview(&LocationQuery::city("Recife"))
            .await
            .expect("overview");

        assert!(overview.days.is_empty());
        assert_eq!(overview.today.status(), TodayStatus::NoData);
        assert!(overview.rollup_highlights.is_none());
    }

    #[tokio::test]
    async fn test_provider_errors_propagate() {
        let provider = StubProvider::failing(ProviderError::Upstream {
            status: 404,
            body: "city not found".to_string(),
        });
        let result = service(provider, HighlightThresholds::default())
            .get_overview(&LocationQuery::city("Nowhere"))
            .await;

        assert!(matches!(result, Err(ProviderError::Upstream { status: 404, .. })));
    }
}

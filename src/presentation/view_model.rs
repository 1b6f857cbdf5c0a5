// Mapper from application results to JSON view models
use crate::application::forecast_service::ForecastOverview;
use crate::application::weather_service::CurrentOverview;
use crate::domain::conditions::icon_url;
use crate::domain::forecast::{
    round_half_up, DaySummary, RollupHighlights, TodayEntry, TodayRollup, TodayView,
};
use crate::domain::units::{capitalize, weekday_label};
use chrono::Timelike;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ForecastSummaryResponse {
    pub city: String,
    pub country: String,
    pub timezone_offset_seconds: i64,
    pub units: &'static str,
    pub temperature_unit: &'static str,
    pub days: Vec<DayView>,
    pub today: TodayResponse,
}

#[derive(Debug, Serialize)]
pub struct DayView {
    pub date: String,
    pub weekday: &'static str,
    /// null when the day had no defined minimum
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub icon: String,
    pub icon_url: String,
}

#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub date: String,
    pub status: &'static str,
    pub entries: Vec<TodayEntryView>,
    pub rollup: Option<RollupView>,
}

#[derive(Debug, Serialize)]
pub struct TodayEntryView {
    pub time: String,
    pub timestamp: i64,
    pub temperature: Option<i64>,
    pub probability_pct: u32,
    pub volume_mm: f64,
    pub volume_label: Option<String>,
    pub highlight: &'static str,
    pub icon: String,
    pub icon_url: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct RollupView {
    pub max_probability_pct: u32,
    pub total_volume_mm: f64,
    pub probability_label: String,
    pub volume_label: String,
    pub probability_highlight: &'static str,
    pub volume_highlight: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CurrentResponse {
    pub city: String,
    pub country: String,
    pub units: &'static str,
    pub temperature: Option<f64>,
    pub temperature_label: Option<String>,
    pub humidity: Option<u8>,
    pub wind_label: String,
    pub description: String,
    pub icon_url: Option<String>,
    pub category: &'static str,
    pub mood: &'static str,
}

fn finite_rounded(value: f64) -> Option<i64> {
    value.is_finite().then(|| round_half_up(value) as i64)
}

fn format_mm(mm: f64) -> String {
    format!("{:.1} mm", mm)
}

fn day_view(day: DaySummary) -> DayView {
    DayView {
        weekday: weekday_label(&day.local_date),
        min: finite_rounded(day.temperature_min),
        max: finite_rounded(day.temperature_max),
        icon_url: icon_url(&day.representative_icon, 2),
        icon: day.representative_icon,
        date: day.date_key,
    }
}

fn entry_view(entry: TodayEntry) -> TodayEntryView {
    TodayEntryView {
        time: format!("{:02}:00", entry.local_time.hour()),
        timestamp: entry.timestamp_utc_seconds,
        temperature: entry.display_temperature,
        probability_pct: entry.probability_pct,
        volume_mm: entry.volume_mm,
        volume_label: (entry.volume_mm > 0.0).then(|| format_mm(entry.volume_mm)),
        highlight: entry.highlight.as_str(),
        icon_url: icon_url(&entry.condition_icon, 2),
        icon: entry.condition_icon,
        description: capitalize(&entry.condition_description),
    }
}

fn rollup_view(rollup: TodayRollup, highlights: RollupHighlights) -> RollupView {
    RollupView {
        max_probability_pct: rollup.max_probability_pct,
        total_volume_mm: rollup.total_volume_mm,
        probability_label: format!("{}%", rollup.max_probability_pct),
        volume_label: format_mm(rollup.total_volume_mm),
        probability_highlight: highlights.probability.as_str(),
        volume_highlight: highlights.volume.as_str(),
    }
}

fn today_response(today: TodayView, highlights: Option<RollupHighlights>) -> TodayResponse {
    let status = today.status().as_str();
    let rollup = today.rollup.zip(highlights).map(|(r, h)| rollup_view(r, h));

    TodayResponse {
        date: today.today_key,
        status,
        entries: today.entries.into_iter().map(entry_view).collect(),
        rollup,
    }
}

pub fn forecast_to_view(overview: ForecastOverview) -> ForecastSummaryResponse {
    ForecastSummaryResponse {
        city: overview.city_name,
        country: overview.country,
        timezone_offset_seconds: overview.timezone_offset_seconds,
        units: overview.units.as_str(),
        temperature_unit: overview.units.temperature_symbol(),
        days: overview.days.into_iter().map(day_view).collect(),
        today: today_response(overview.today, overview.rollup_highlights),
    }
}

pub fn current_to_view(overview: CurrentOverview) -> CurrentResponse {
    let conditions = overview.conditions;
    let units = overview.units;

    CurrentResponse {
        city: conditions.city_name,
        country: conditions.country,
        units: units.as_str(),
        temperature: conditions.temperature,
        temperature_label: conditions.temperature.map(|t| units.format_temperature(t)),
        humidity: conditions.humidity,
        // calm when the wind block is absent
        wind_label: units.format_wind(conditions.wind_speed.unwrap_or(0.0)),
        description: capitalize(&conditions.condition_description),
        icon_url: conditions.condition_icon.as_deref().map(|i| icon_url(i, 4)),
        category: overview.category.as_str(),
        mood: overview.mood,
    }
}

// Display units
use chrono::{DateTime, Datelike, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Anything other than "imperial" falls back to metric
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("imperial") => Units::Imperial,
            _ => Units::Metric,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    /// Upstream reports m/s for metric (shown as km/h) and mph for imperial
    pub fn format_wind(&self, speed: f64) -> String {
        match self {
            Units::Metric => format!("{:.0} km/h", speed * 3.6),
            Units::Imperial => format!("{:.0} mph", speed),
        }
    }

    pub fn format_temperature(&self, temperature: f64) -> String {
        format!("{:.1}{}", temperature, self.temperature_symbol())
    }
}

/// Short Portuguese weekday label for a local date
pub fn weekday_label(local: &DateTime<Utc>) -> &'static str {
    const DAYS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];
    DAYS[local.weekday().num_days_from_sunday() as usize]
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

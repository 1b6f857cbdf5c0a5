// Forecast domain models
use chrono::{DateTime, Utc};

/// Probability (%) at or above which a sample or the day box is marked as likely rain
pub const PROBABILITY_HIGHLIGHT_PCT: u32 = 60;

/// Accumulated volume (mm) at or above which the day rollup box is marked as rainy
pub const VOLUME_HIGHLIGHT_MM: f64 = 5.0;

/// Icon used when the upstream sample carries none
pub const DEFAULT_ICON: &str = "01d";

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub timestamp_utc_seconds: i64,
    pub temperature_min: Option<f64>,
    pub temperature_max: Option<f64>,
    pub temperature_current: Option<f64>,
    pub condition_main: String,
    pub condition_icon: String,
    pub condition_description: String,
    pub precipitation_probability: Option<f64>,
    pub precipitation_volume_mm: Option<f64>,
}

impl ForecastSample {
    pub fn new(timestamp_utc_seconds: i64) -> Self {
        Self {
            timestamp_utc_seconds,
            temperature_min: None,
            temperature_max: None,
            temperature_current: None,
            condition_main: String::new(),
            condition_icon: DEFAULT_ICON.to_string(),
            condition_description: String::new(),
            precipitation_probability: None,
            precipitation_volume_mm: None,
        }
    }

    /// Probability as a whole percentage, 0 when absent
    pub fn probability_pct(&self) -> u32 {
        self.precipitation_probability
            .map(|p| round_half_up(p * 100.0) as u32)
            .unwrap_or(0)
    }

    pub fn volume_mm(&self) -> f64 {
        self.precipitation_volume_mm.unwrap_or(0.0)
    }
}

/// A forecast series as delivered by the provider, with its constant UTC offset
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    pub city_name: String,
    pub country: String,
    pub timezone_offset_seconds: i64,
    pub samples: Vec<ForecastSample>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date_key: String,
    /// `+inf` when no sample of the day defined a minimum
    pub temperature_min: f64,
    /// `-inf` when no sample of the day defined a maximum
    pub temperature_max: f64,
    pub representative_icon: String,
    pub local_date: DateTime<Utc>,
}

impl DaySummary {
    /// False for the degenerate day whose bounds were never set
    pub fn has_temperature_bounds(&self) -> bool {
        self.temperature_min.is_finite() && self.temperature_max.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightClass {
    None,
    Likely,
    Rainy,
}

impl HighlightClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            HighlightClass::None => "none",
            HighlightClass::Likely => "likely",
            HighlightClass::Rainy => "rainy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightThresholds {
    pub probability_pct: u32,
    pub volume_mm: f64,
}

impl Default for HighlightThresholds {
    fn default() -> Self {
        Self {
            probability_pct: PROBABILITY_HIGHLIGHT_PCT,
            volume_mm: VOLUME_HIGHLIGHT_MM,
        }
    }
}

impl HighlightThresholds {
    /// Per-sample class: any volume wins over a high probability
    pub fn classify(&self, probability_pct: u32, volume_mm: f64) -> HighlightClass {
        if volume_mm > 0.0 {
            HighlightClass::Rainy
        } else if probability_pct >= self.probability_pct {
            HighlightClass::Likely
        } else {
            HighlightClass::None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodayEntry {
    pub timestamp_utc_seconds: i64,
    pub local_time: DateTime<Utc>,
    pub display_temperature: Option<i64>,
    pub probability_pct: u32,
    pub volume_mm: f64,
    pub highlight: HighlightClass,
    pub condition_icon: String,
    pub condition_description: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TodayRollup {
    pub max_probability_pct: u32,
    pub total_volume_mm: f64,
}

/// Box-level emphasis for the day rollup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollupHighlights {
    pub probability: HighlightClass,
    pub volume: HighlightClass,
}

impl TodayRollup {
    pub fn highlights(&self, thresholds: &HighlightThresholds) -> RollupHighlights {
        let probability = if self.max_probability_pct >= thresholds.probability_pct {
            HighlightClass::Likely
        } else {
            HighlightClass::None
        };
        let volume = if self.total_volume_mm >= thresholds.volume_mm {
            HighlightClass::Rainy
        } else {
            HighlightClass::None
        };
        RollupHighlights { probability, volume }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodayStatus {
    NoData,
    NoRainSignal,
    RainSignal,
}

impl TodayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodayStatus::NoData => "no_data",
            TodayStatus::NoRainSignal => "no_rain_signal",
            TodayStatus::RainSignal => "rain_signal",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodayView {
    pub today_key: String,
    pub entries: Vec<TodayEntry>,
    /// None when no sample falls on today's local date
    pub rollup: Option<TodayRollup>,
    pub has_any_rain_signal: bool,
}

impl TodayView {
    pub fn no_data(today_key: String) -> Self {
        Self {
            today_key,
            entries: Vec::new(),
            rollup: None,
            has_any_rain_signal: false,
        }
    }

    pub fn status(&self) -> TodayStatus {
        if self.rollup.is_none() {
            TodayStatus::NoData
        } else if self.has_any_rain_signal {
            TodayStatus::RainSignal
        } else {
            TodayStatus::NoRainSignal
        }
    }
}

/// Nearest integer, exact halves go up (-2.5 -> -2)
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

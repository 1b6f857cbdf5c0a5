use crate::domain::forecast::{HighlightThresholds, PROBABILITY_HIGHLIGHT_PCT, VOLUME_HIGHLIGHT_MM};
use crate::domain::location::DEFAULT_LANG;
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub openweather: OpenWeatherSettings,
    pub highlights: HighlightSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Clone)]
pub struct OpenWeatherSettings {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub default_lang: String,
    pub timeout_secs: u64,
}

impl fmt::Debug for OpenWeatherSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("default_lang", &self.default_lang)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl OpenWeatherSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HighlightSettings {
    pub probability_pct: u32,
    pub volume_mm: f64,
}

impl From<&HighlightSettings> for HighlightThresholds {
    fn from(settings: &HighlightSettings) -> Self {
        HighlightThresholds {
            probability_pct: settings.probability_pct,
            volume_mm: settings.volume_mm,
        }
    }
}

fn with_defaults() -> anyhow::Result<ConfigBuilder<DefaultState>> {
    Ok(config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080_i64)?
        .set_default("openweather.base_url", DEFAULT_BASE_URL)?
        .set_default("openweather.default_lang", DEFAULT_LANG)?
        .set_default("openweather.timeout_secs", 10_i64)?
        .set_default("highlights.probability_pct", i64::from(PROBABILITY_HIGHLIGHT_PCT))?
        .set_default("highlights.volume_mm", VOLUME_HIGHLIGHT_MM)?)
}

/// Defaults, then `config/clima.*` if present, then `CLIMA__SECTION__KEY`
/// variables. The API key only ever comes from `OPENWEATHER_API_KEY`.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty());

    let settings = with_defaults()?
        .add_source(config::File::with_name("config/clima").required(false))
        .add_source(
            config::Environment::with_prefix("CLIMA")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("openweather.api_key", api_key)?
        .build()?;

    Ok(settings.try_deserialize()?)
}

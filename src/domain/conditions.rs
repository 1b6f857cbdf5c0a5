// Current conditions and the labels derived from them
use super::units::Units;

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub city_name: String,
    pub country: String,
    pub temperature: Option<f64>,
    pub humidity: Option<u8>,
    pub wind_speed: Option<f64>,
    pub condition_main: String,
    pub condition_description: String,
    pub condition_icon: Option<String>,
}

/// Coarse category used to pick the dashboard background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCategory {
    Clear,
    Clouds,
    Rain,
    Snow,
    Mist,
    Thunderstorm,
}

impl WeatherCategory {
    pub fn from_main(main: &str) -> Self {
        let m = main.to_lowercase();
        if m.contains("thunder") {
            WeatherCategory::Thunderstorm
        } else if m.contains("drizzle") || m.contains("rain") {
            WeatherCategory::Rain
        } else if m.contains("snow") {
            WeatherCategory::Snow
        } else if ["mist", "fog", "haze", "smoke"].iter().any(|k| m.contains(k)) {
            WeatherCategory::Mist
        } else if m.contains("cloud") {
            WeatherCategory::Clouds
        } else {
            WeatherCategory::Clear
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCategory::Clear => "clear",
            WeatherCategory::Clouds => "clouds",
            WeatherCategory::Rain => "rain",
            WeatherCategory::Snow => "snow",
            WeatherCategory::Mist => "mist",
            WeatherCategory::Thunderstorm => "thunderstorm",
        }
    }
}

/// Friendly one-liner shown under the current temperature
pub fn mood_phrase(main: &str, temperature: Option<f64>, units: Units) -> &'static str {
    let (hot_at, cold_at) = match units {
        Units::Metric => (30.0, 10.0),
        Units::Imperial => (86.0, 50.0),
    };
    let hot = temperature.is_some_and(|t| t >= hot_at);
    let cold = temperature.is_some_and(|t| t <= cold_at);

    // Clear is the fallback category, so check the text itself
    let m = main.to_lowercase();
    match WeatherCategory::from_main(main) {
        WeatherCategory::Thunderstorm => "Tempestade chegando, fique em local seguro",
        WeatherCategory::Rain => "Vai chover! Pegue o guarda-chuva",
        WeatherCategory::Snow => "Neve à vista, agasalhe-se bem",
        WeatherCategory::Mist if !m.contains("smoke") => "Neblina à vista, dirija com cuidado",
        WeatherCategory::Clouds => "Nuvens pelo céu, clima ameno",
        WeatherCategory::Clear if m.contains("clear") => {
            if hot {
                "Sol forte, beba água e use protetor"
            } else if cold {
                "Céu limpo e frio, cachecol cai bem"
            } else {
                "Céu limpo, um ótimo dia para sair!"
            }
        }
        _ => "Tempo variado, aproveite com moderação",
    }
}

pub fn icon_url(icon: &str, scale: u8) -> String {
    format!("https://openweathermap.org/img/wn/{}@{}x.png", icon, scale)
}

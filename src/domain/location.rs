// Location query sent to the weather provider
use super::units::Units;
use thiserror::Error;

pub const DEFAULT_LANG: &str = "pt_br";

#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("Missing q or lat/lon")]
    MissingLocation,
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationQuery {
    pub city: Option<String>,
    pub coordinates: Option<(f64, f64)>,
    pub units: Units,
    pub lang: String,
}

impl LocationQuery {
    /// Build a query from raw request parameters. Either a city or both
    /// coordinates are required; when both are given both are forwarded.
    pub fn from_params(
        q: Option<&str>,
        lat: Option<&str>,
        lon: Option<&str>,
        units: Option<&str>,
        lang: Option<&str>,
        default_lang: &str,
    ) -> Result<Self, QueryError> {
        let city = q
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        let coordinates = match (non_empty(lat), non_empty(lon)) {
            (Some(lat), Some(lon)) => Some((parse_coordinate(lat)?, parse_coordinate(lon)?)),
            _ => None,
        };

        if city.is_none() && coordinates.is_none() {
            return Err(QueryError::MissingLocation);
        }

        let lang = non_empty(lang).unwrap_or(default_lang).to_string();

        Ok(Self {
            city,
            coordinates,
            units: Units::parse(units),
            lang,
        })
    }

    #[cfg(test)]
    pub fn city(name: &str) -> Self {
        Self {
            city: Some(name.to_string()),
            coordinates: None,
            units: Units::Metric,
            lang: DEFAULT_LANG.to_string(),
        }
    }

    /// Human-readable label for logs
    pub fn describe(&self) -> String {
        match (&self.city, self.coordinates) {
            (Some(city), _) => city.clone(),
            (None, Some((lat, lon))) => format!("{},{}", lat, lon),
            (None, None) => "<none>".to_string(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_coordinate(value: &str) -> Result<f64, QueryError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| QueryError::InvalidCoordinate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_query_defaults() {
        let query = LocationQuery::from_params(Some(" Recife "), None, None, None, None, DEFAULT_LANG)
            .expect("valid query");
        assert_eq!(query.city.as_deref(), Some("Recife"));
        assert_eq!(query.coordinates, None);
        assert_eq!(query.units, Units::Metric);
        assert_eq!(query.lang, "pt_br");
    }

    #[test]
    fn test_coordinates_and_units() {
        let query = LocationQuery::from_params(
            None,
            Some("-8.05"),
            Some("-34.9"),
            Some("imperial"),
            Some("en"),
            DEFAULT_LANG,
        )
        .expect("valid query");
        assert_eq!(query.coordinates, Some((-8.05, -34.9)));
        assert_eq!(query.units, Units::Imperial);
        assert_eq!(query.lang, "en");
    }

    #[test]
    fn test_missing_location() {
        assert_eq!(
            LocationQuery::from_params(None, Some("1.0"), None, None, None, DEFAULT_LANG),
            Err(QueryError::MissingLocation)
        );
        assert_eq!(
            LocationQuery::from_params(Some("  "), None, None, None, None, DEFAULT_LANG),
            Err(QueryError::MissingLocation)
        );
    }

    #[test]
    fn test_invalid_coordinate() {
        assert_eq!(
            LocationQuery::from_params(None, Some("north"), Some("1"), None, None, DEFAULT_LANG),
            Err(QueryError::InvalidCoordinate("north".to_string()))
        );
    }

    #[test]
    fn test_unknown_units_fall_back_to_metric() {
        let query = LocationQuery::from_params(Some("Natal"), None, None, Some("kelvin"), None, DEFAULT_LANG)
            .expect("valid query");
        assert_eq!(query.units, Units::Metric);
    }
}

//! Cache-or-fetch lookups for locations, forecasts and movies.
//!
//! Handlers only talk to [`LookupService`]; the store-backed implementation
//! lives in [`super::lookup_service_impl`].

use crate::clients::forecast::Forecast;
use crate::domain::Coordinates;
use crate::models::{LocationRecord, MovieRecord, WeatherRecord};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("No results for '{0}'")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Forecast returned for {echoed} but {requested} was requested")]
    CoordinateMismatch { requested: String, echoed: String },

    #[error("External API error: {service} - {message}")]
    Upstream { service: String, message: String },

    #[error("Database error: {0}")]
    Database(String),
}

impl LookupError {
    pub fn upstream(service: &str, msg: impl std::fmt::Display) -> Self {
        Self::Upstream {
            service: service.to_string(),
            message: msg.to_string(),
        }
    }

    pub fn database(err: impl std::fmt::Display) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<sea_orm::DbErr> for LookupError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait LookupService: Send + Sync {
    /// Returns the cached location for `query`, geocoding and storing it on a miss.
    ///
    /// # Errors
    ///
    /// - [`LookupError::InvalidInput`] if the query is blank
    /// - [`LookupError::NotFound`] if the geocoder has no match
    /// - [`LookupError::Upstream`] if the geocoder fails
    /// - [`LookupError::Database`] if the read or the insert fails
    async fn resolve_location(&self, query: &str) -> Result<LocationRecord, LookupError>;

    /// Fetches a fresh daily forecast. Coordinates arrive as raw query text.
    ///
    /// # Errors
    ///
    /// - [`LookupError::InvalidInput`] if either coordinate is not a valid number
    /// - [`LookupError::CoordinateMismatch`] if the service answers for other coordinates
    /// - [`LookupError::Upstream`] if the forecast service fails
    async fn resolve_weather(
        &self,
        latitude: &str,
        longitude: &str,
    ) -> Result<Vec<WeatherRecord>, LookupError>;

    /// Resolves `query` to a location, then searches movies by its city name.
    ///
    /// # Errors
    ///
    /// Everything [`LookupService::resolve_location`] returns, plus
    /// [`LookupError::Upstream`] if the movie service fails.
    async fn resolve_movies(&self, query: &str) -> Result<Vec<MovieRecord>, LookupError>;
}

/// Trims the query; blank input never reaches the store or the geocoder.
pub fn normalize_query(query: &str) -> Result<&str, LookupError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(LookupError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

pub fn parse_coordinates(latitude: &str, longitude: &str) -> Result<Coordinates, LookupError> {
    let parse = |name: &str, raw: &str| {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| LookupError::InvalidInput(format!("{name} is not a number: '{raw}'")))
    };

    let lat = parse("latitude", latitude)?;
    let lng = parse("longitude", longitude)?;

    Coordinates::new(lat, lng).ok_or_else(|| {
        LookupError::InvalidInput(format!("Coordinates out of range: {lat},{lng}"))
    })
}

/// One record per daily entry, in upstream order.
pub fn forecast_to_records(forecast: &Forecast) -> Result<Vec<WeatherRecord>, LookupError> {
    forecast
        .daily
        .data
        .iter()
        .map(|day| {
            WeatherRecord::from_daily(day.summary.clone(), day.time).ok_or_else(|| {
                LookupError::upstream("Forecast", format!("invalid timestamp {}", day.time))
            })
        })
        .collect()
}

//! Store-backed implementation of [`LookupService`].

use crate::clients::{ForecastClient, GeocodeClient, MovieClient};
use crate::db::Store;
use crate::domain::Coordinates;
use crate::models::{LocationRecord, MovieRecord, WeatherRecord};
use crate::services::lookup_service::{
    LookupError, LookupService, forecast_to_records, normalize_query, parse_coordinates,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct SeaOrmLookupService {
    store: Store,
    geocoder: Arc<GeocodeClient>,
    forecast: Arc<ForecastClient>,
    movies: Arc<MovieClient>,
}

impl SeaOrmLookupService {
    #[must_use]
    pub const fn new(
        store: Store,
        geocoder: Arc<GeocodeClient>,
        forecast: Arc<ForecastClient>,
        movies: Arc<MovieClient>,
    ) -> Self {
        Self {
            store,
            geocoder,
            forecast,
            movies,
        }
    }

    async fn geocode_and_store(&self, query: &str) -> Result<LocationRecord, LookupError> {
        let candidate = self
            .geocoder
            .geocode(query)
            .await
            .map_err(|e| LookupError::upstream("Geocoding", e))?
            .ok_or_else(|| LookupError::NotFound(query.to_string()))?;

        let location = candidate.geometry.location;
        let record = LocationRecord::new(
            query,
            candidate.formatted_address,
            location.lat,
            location.lng,
        );

        if record.coordinates().is_none() {
            return Err(LookupError::upstream(
                "Geocoding",
                format!("invalid coordinates {},{}", location.lat, location.lng),
            ));
        }

        let inserted = self
            .store
            .insert_location(&record)
            .await
            .map_err(LookupError::database)?;

        if inserted {
            info!(query = %query, formatted = %record.formatted_query, "Cached new location");
            return Ok(record);
        }

        // A concurrent miss stored this key first; its row is authoritative.
        debug!(query = %query, "Location stored concurrently, returning existing row");
        let existing = self
            .store
            .get_location(query)
            .await
            .map_err(LookupError::database)?;
        Ok(existing.map_or(record, |stored| stored.record))
    }

    /// Snapshot the forecast for a stored location at these coordinates.
    /// Failures are logged; the caller already has fresh data.
    async fn persist_forecast(&self, coordinates: Coordinates, records: &[WeatherRecord]) {
        let location = match self
            .store
            .get_location_at(coordinates.latitude(), coordinates.longitude())
            .await
        {
            Ok(Some(location)) => location,
            Ok(None) => return,
            Err(e) => {
                warn!("Failed to look up location for forecast: {e}");
                return;
            }
        };

        if let Err(e) = self.store.replace_weather(location.id, records).await {
            warn!(location_id = %location.id, "Failed to store forecast: {e}");
        }
    }
}

#[async_trait::async_trait]
impl LookupService for SeaOrmLookupService {
    async fn resolve_location(&self, query: &str) -> Result<LocationRecord, LookupError> {
        let query = normalize_query(query)?;

        let cached = self
            .store
            .get_location(query)
            .await
            .map_err(LookupError::database)?;

        if let Some(stored) = cached {
            metrics::counter!("lookup_cache_hits_total", "kind" => "location").increment(1);
            debug!(query = %query, "Location cache hit");
            return Ok(stored.record);
        }

        metrics::counter!("lookup_cache_misses_total", "kind" => "location").increment(1);
        self.geocode_and_store(query).await
    }

    async fn resolve_weather(
        &self,
        latitude: &str,
        longitude: &str,
    ) -> Result<Vec<WeatherRecord>, LookupError> {
        let coordinates = parse_coordinates(latitude, longitude)?;

        let forecast = self
            .forecast
            .daily(coordinates)
            .await
            .map_err(|e| LookupError::upstream("Forecast", e))?;

        if !forecast.echoes(coordinates) {
            warn!(
                requested = %coordinates,
                echoed_lat = forecast.latitude,
                echoed_lng = forecast.longitude,
                "Forecast coordinates do not match request"
            );
            return Err(LookupError::CoordinateMismatch {
                requested: coordinates.to_string(),
                echoed: format!("{},{}", forecast.latitude, forecast.longitude),
            });
        }

        let records = forecast_to_records(&forecast)?;
        self.persist_forecast(coordinates, &records).await;

        Ok(records)
    }

    async fn resolve_movies(&self, query: &str) -> Result<Vec<MovieRecord>, LookupError> {
        let location = self.resolve_location(query).await?;
        let city = location.city();

        if city.is_empty() {
            return Ok(Vec::new());
        }

        let movies = self
            .movies
            .search(city)
            .await
            .map_err(|e| LookupError::upstream("Movies", e))?;

        debug!(city = %city, count = movies.len(), "Movie search finished");
        Ok(movies.into_iter().map(MovieRecord::from).collect())
    }
}

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use std::sync::Arc;

use super::{ApiError, AppState, LocationQuery, MoviesQuery, WeatherQuery};
use crate::models::{LocationRecord, MovieRecord, WeatherRecord};

// Extractors take `Result<Query<_>, _>` so malformed query strings get the
// JSON error envelope instead of axum's plain-text rejection.

pub async fn get_location(
    State(state): State<Arc<AppState>>,
    params: Result<Query<LocationQuery>, QueryRejection>,
) -> Result<Json<LocationRecord>, ApiError> {
    let Query(params) = params?;
    let location = state.lookup().resolve_location(&params.data).await?;
    Ok(Json(location))
}

pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    params: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<Vec<WeatherRecord>>, ApiError> {
    let Query(params) = params?;
    let forecast = state
        .lookup()
        .resolve_weather(&params.latitude, &params.longitude)
        .await?;
    Ok(Json(forecast))
}

pub async fn get_movies(
    State(state): State<Arc<AppState>>,
    params: Result<Query<MoviesQuery>, QueryRejection>,
) -> Result<Json<Vec<MovieRecord>>, ApiError> {
    let Query(params) = params?;
    let query = params
        .query()
        .ok_or_else(|| ApiError::validation("Missing 'data' query parameter"))?;

    let movies = state.lookup().resolve_movies(query).await?;
    Ok(Json(movies))
}

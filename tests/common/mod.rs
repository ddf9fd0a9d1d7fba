//! Shared fixtures: an in-memory store plus one mock server standing in for
//! all three upstream APIs.

#![allow(dead_code)]

use city_explorer::config::Config;
use city_explorer::db::Store;
use city_explorer::state::SharedState;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GEOCODE_PATH: &str = "/maps/api/geocode/json";
pub const MOVIE_PATH: &str = "/3/search/movie";

pub fn test_config(upstream: &MockServer) -> Config {
    let mut config = Config::default();
    config.general.database_url = "sqlite::memory:".to_string();
    config.observability.metrics_enabled = false;
    config.upstream.geocode_api_key = "geo-key".to_string();
    config.upstream.weather_api_key = "sky-key".to_string();
    config.upstream.movie_api_key = "movie-key".to_string();
    config.upstream.geocode_base_url = upstream.uri();
    config.upstream.weather_base_url = upstream.uri();
    config.upstream.movie_base_url = upstream.uri();
    config.upstream.request_timeout_seconds = 5;
    config
}

pub async fn shared_state(upstream: &MockServer) -> SharedState {
    let store = Store::new("sqlite::memory:")
        .await
        .expect("failed to open in-memory store");
    SharedState::with_store(test_config(upstream), store).expect("failed to build state")
}

pub fn geocode_ok(formatted: &str, lat: f64, lng: f64) -> serde_json::Value {
    serde_json::json!({
        "status": "OK",
        "results": [{
            "formatted_address": formatted,
            "geometry": { "location": { "lat": lat, "lng": lng } }
        }]
    })
}

pub async fn mount_geocode(
    server: &MockServer,
    address: &str,
    body: serde_json::Value,
    expected_calls: u64,
) {
    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .and(query_param("address", address))
        .and(query_param("key", "geo-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub async fn mount_forecast(server: &MockServer, lat: f64, lng: f64, days: &[(&str, i64)]) {
    let data: Vec<serde_json::Value> = days
        .iter()
        .map(|(summary, time)| serde_json::json!({ "summary": summary, "time": time }))
        .collect();

    Mock::given(method("GET"))
        .and(path_regex(r"^/forecast/sky-key/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "latitude": lat,
            "longitude": lng,
            "daily": { "data": data }
        })))
        .mount(server)
        .await;
}

pub async fn mount_movies(server: &MockServer, city: &str, titles: &[&str]) {
    let results: Vec<serde_json::Value> = titles
        .iter()
        .map(|title| {
            serde_json::json!({
                "title": title,
                "overview": format!("{title} overview"),
                "vote_average": 7.1,
                "vote_count": 420,
                "popularity": 9.5,
                "release_date": "1993-06-25"
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path(MOVIE_PATH))
        .and(query_param("query", city))
        .and(query_param("api_key", "movie-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "page": 1,
            "results": results
        })))
        .expect(1)
        .mount(server)
        .await;
}

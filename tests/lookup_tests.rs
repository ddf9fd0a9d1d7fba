mod common;

use city_explorer::models::LocationRecord;
use city_explorer::services::LookupError;
use common::{
    GEOCODE_PATH, geocode_ok, mount_forecast, mount_geocode, mount_movies, shared_state,
};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn miss_geocodes_stores_and_then_hits_cache() {
    let upstream = MockServer::start().await;
    mount_geocode(
        &upstream,
        "Seattle",
        geocode_ok("Seattle, WA, USA", 47.6, -122.3),
        1,
    )
    .await;

    let state = shared_state(&upstream).await;

    let first = state.lookup_service.resolve_location("Seattle").await.unwrap();
    assert_eq!(
        first,
        LocationRecord::new("Seattle", "Seattle, WA, USA", 47.6, -122.3)
    );

    let stored = state.store.get_location("Seattle").await.unwrap().unwrap();
    assert_eq!(stored.record, first);

    // Served from the store; the mock's expect(1) fails the test on a second call.
    let second = state.lookup_service.resolve_location("Seattle").await.unwrap();
    assert_eq!(second, first);
    assert_eq!(state.store.count_locations("Seattle").await.unwrap(), 1);
}

#[tokio::test]
async fn concurrent_misses_store_a_single_row() {
    let upstream = MockServer::start().await;
    // Both lookups miss the store before either geocode answer arrives.
    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .and(query_param("address", "Seattle"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(geocode_ok("Seattle, WA, USA", 47.6, -122.3))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1..=2)
        .mount(&upstream)
        .await;

    let state = shared_state(&upstream).await;
    let (first, second) = tokio::join!(
        state.lookup_service.resolve_location("Seattle"),
        state.lookup_service.resolve_location("Seattle"),
    );

    let first = first.unwrap();
    let second = second.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.formatted_query, "Seattle, WA, USA");
    assert_eq!(state.store.count_locations("Seattle").await.unwrap(), 1);
}

#[tokio::test]
async fn seeded_location_never_calls_geocoder() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&upstream)
        .await;

    let state = shared_state(&upstream).await;
    let seeded = LocationRecord::new("Lynnwood", "Lynnwood, WA, USA", 47.82, -122.31);
    state.store.insert_location(&seeded).await.unwrap();

    let resolved = state
        .lookup_service
        .resolve_location("Lynnwood")
        .await
        .unwrap();
    assert_eq!(resolved, seeded);
}

#[tokio::test]
async fn query_is_trimmed_before_lookup() {
    let upstream = MockServer::start().await;
    mount_geocode(&upstream, "Boise", geocode_ok("Boise, ID, USA", 43.6, -116.2), 1).await;

    let state = shared_state(&upstream).await;
    let record = state
        .lookup_service
        .resolve_location("  Boise  ")
        .await
        .unwrap();

    assert_eq!(record.search_query, "Boise");
    assert!(state.store.get_location("Boise").await.unwrap().is_some());
}

#[tokio::test]
async fn zero_results_is_not_found_and_not_cached() {
    let upstream = MockServer::start().await;
    mount_geocode(
        &upstream,
        "Atlantis",
        serde_json::json!({ "status": "ZERO_RESULTS", "results": [] }),
        1,
    )
    .await;

    let state = shared_state(&upstream).await;
    let err = state
        .lookup_service
        .resolve_location("Atlantis")
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::NotFound(ref q) if q == "Atlantis"));
    assert!(state.store.get_location("Atlantis").await.unwrap().is_none());
}

#[tokio::test]
async fn geocoder_failure_is_upstream_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&upstream)
        .await;

    let state = shared_state(&upstream).await;
    let err = state
        .lookup_service
        .resolve_location("Denver")
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::Upstream { ref service, .. } if service == "Geocoding"));
}

#[tokio::test]
async fn blank_query_is_rejected_without_upstream_call() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let state = shared_state(&upstream).await;
    let err = state.lookup_service.resolve_location("   ").await.unwrap_err();

    assert!(matches!(err, LookupError::InvalidInput(_)));
}

#[tokio::test]
async fn weather_returns_one_record_per_day() {
    let upstream = MockServer::start().await;
    mount_forecast(
        &upstream,
        47.6062,
        -122.3321,
        &[
            ("Partly cloudy.", 1_704_182_400),
            ("Light rain.", 1_704_268_800),
            ("Overcast.", 1_704_355_200),
        ],
    )
    .await;

    let state = shared_state(&upstream).await;
    let forecast = state
        .lookup_service
        .resolve_weather("47.6062", "-122.3321")
        .await
        .unwrap();

    assert_eq!(forecast.len(), 3);
    assert_eq!(forecast[0].forecast, "Partly cloudy.");
    assert_eq!(forecast[0].time, "Tue Jan 02 2024");
    assert!(forecast.iter().all(|day| day.time.len() == 15));
}

#[tokio::test]
async fn weather_mismatch_is_reported() {
    let upstream = MockServer::start().await;
    mount_forecast(&upstream, 10.0, 20.0, &[("Hot.", 1_704_182_400)]).await;

    let state = shared_state(&upstream).await;
    let err = state
        .lookup_service
        .resolve_weather("47.6062", "-122.3321")
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::CoordinateMismatch { .. }));
}

#[tokio::test]
async fn weather_rejects_non_numeric_coordinates() {
    let upstream = MockServer::start().await;
    let state = shared_state(&upstream).await;

    let err = state
        .lookup_service
        .resolve_weather("forty-seven", "-122.3")
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::InvalidInput(_)));
}

#[tokio::test]
async fn weather_for_known_location_is_stored() {
    let upstream = MockServer::start().await;
    mount_forecast(
        &upstream,
        47.6,
        -122.3,
        &[("Drizzle.", 1_704_182_400), ("Sun.", 1_704_268_800)],
    )
    .await;

    let state = shared_state(&upstream).await;
    state
        .store
        .insert_location(&LocationRecord::new("Seattle", "Seattle, WA, USA", 47.6, -122.3))
        .await
        .unwrap();

    let forecast = state
        .lookup_service
        .resolve_weather("47.6", "-122.3")
        .await
        .unwrap();

    let location = state.store.get_location("Seattle").await.unwrap().unwrap();
    let stored = state.store.get_weather(location.id).await.unwrap();
    assert!(stored.iter().all(|day| day.location_id == location.id));
    let records: Vec<_> = stored.into_iter().map(|day| day.record).collect();
    assert_eq!(records, forecast);
}

#[tokio::test]
async fn movies_search_by_city_of_resolved_location() {
    let upstream = MockServer::start().await;
    mount_geocode(
        &upstream,
        "seattle",
        geocode_ok("Seattle, WA, USA", 47.6, -122.3),
        1,
    )
    .await;
    mount_movies(&upstream, "Seattle", &["Sleepless in Seattle", "Singles"]).await;

    let state = shared_state(&upstream).await;
    let movies = state
        .lookup_service
        .resolve_movies("seattle")
        .await
        .unwrap();

    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].title, "Sleepless in Seattle");
    assert_eq!(movies[0].total_votes, 420);
    assert_eq!(movies[1].released_on, "1993-06-25");
}

#[tokio::test]
async fn movies_for_unknown_place_is_not_found() {
    let upstream = MockServer::start().await;
    mount_geocode(
        &upstream,
        "Nowhere",
        serde_json::json!({ "status": "ZERO_RESULTS", "results": [] }),
        1,
    )
    .await;

    let state = shared_state(&upstream).await;
    let err = state
        .lookup_service
        .resolve_movies("Nowhere")
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::NotFound(_)));
}

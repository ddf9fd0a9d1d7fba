use std::sync::Arc;

use crate::clients::{ForecastClient, GeocodeClient, MovieClient};
use crate::config::Config;
use crate::db::Store;
use crate::services::{LookupService, SeaOrmLookupService};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// All upstream clients reuse it so connections are pooled.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(concat!("CityExplorer/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub lookup_service: Arc<dyn LookupService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Store) -> anyhow::Result<Self> {
        let upstream = &config.upstream;
        let http_client = build_shared_http_client(upstream.request_timeout_seconds)?;

        let geocoder = Arc::new(GeocodeClient::with_shared_client(
            http_client.clone(),
            &upstream.geocode_base_url,
            &upstream.geocode_api_key,
        ));
        let forecast = Arc::new(ForecastClient::with_shared_client(
            http_client.clone(),
            &upstream.weather_base_url,
            &upstream.weather_api_key,
        ));
        let movies = Arc::new(MovieClient::with_shared_client(
            http_client,
            &upstream.movie_base_url,
            &upstream.movie_api_key,
        ));

        let lookup_service: Arc<dyn LookupService> = Arc::new(SeaOrmLookupService::new(
            store.clone(),
            geocoder,
            forecast,
            movies,
        ));

        Ok(Self {
            config: Arc::new(config),
            store,
            lookup_service,
        })
    }
}

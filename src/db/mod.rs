use crate::domain::LocationId;
use crate::models::{LocationRecord, WeatherRecord};
use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

/// A stored location together with its row id.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredLocation {
    pub id: LocationId,
    pub record: LocationRecord,
}

impl From<crate::entities::locations::Model> for StoredLocation {
    fn from(model: crate::entities::locations::Model) -> Self {
        Self {
            id: LocationId::new(model.id),
            record: LocationRecord::from(model),
        }
    }
}

/// A stored forecast day and the location it was fetched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredWeather {
    pub location_id: LocationId,
    pub record: WeatherRecord,
}

impl From<crate::entities::weathers::Model> for StoredWeather {
    fn from(model: crate::entities::weathers::Model) -> Self {
        Self {
            location_id: LocationId::new(model.location_id),
            record: WeatherRecord {
                forecast: model.forecast,
                time: model.time,
            },
        }
    }
}

/// sea-orm cannot unset sqlx's pool timeouts, so the single `:memory:`
/// connection gets a lifetime no process will reach.
const IN_MEMORY_LIFETIME: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

fn connect_options(db_url: &str, max_connections: u32, min_connections: u32) -> ConnectOptions {
    let mut opt = ConnectOptions::new(db_url.to_string());
    opt.connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    // Every connection to `:memory:` is a separate database, so the pool
    // must hold exactly one connection that is never recycled.
    if db_url.contains(":memory:") {
        opt.max_connections(1)
            .min_connections(1)
            .idle_timeout(IN_MEMORY_LIFETIME)
            .max_lifetime(IN_MEMORY_LIFETIME);
    } else {
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600));
    }

    opt
}

/// Pooled handle over the relational store. Cheap to clone.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if let Some(path_str) = db_url.strip_prefix("sqlite:")
            && !in_memory
        {
            let path_str = path_str.trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file: {path_str}"))?;
            }
        }

        let opt = connect_options(db_url, max_connections, min_connections);

        let conn = Database::connect(opt)
            .await
            .context("Failed to connect to database")?;

        migrator::Migrator::up(&conn, None)
            .await
            .context("Failed to apply database migrations")?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn location_repo(&self) -> repositories::location::LocationRepository {
        repositories::location::LocationRepository::new(self.conn.clone())
    }

    fn weather_repo(&self) -> repositories::weather::WeatherRepository {
        repositories::weather::WeatherRepository::new(self.conn.clone())
    }

    pub async fn get_location(&self, search_query: &str) -> Result<Option<StoredLocation>> {
        Ok(self
            .location_repo()
            .find_by_query(search_query)
            .await?
            .map(StoredLocation::from))
    }

    pub async fn get_location_at(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<StoredLocation>> {
        Ok(self
            .location_repo()
            .find_by_coordinates(latitude, longitude)
            .await?
            .map(StoredLocation::from))
    }

    pub async fn insert_location(&self, record: &LocationRecord) -> Result<bool> {
        self.location_repo().insert(record).await
    }

    pub async fn count_locations(&self, search_query: &str) -> Result<u64> {
        self.location_repo().count_by_query(search_query).await
    }

    pub async fn replace_weather(
        &self,
        location_id: LocationId,
        records: &[WeatherRecord],
    ) -> Result<()> {
        self.weather_repo()
            .replace_for_location(location_id, records)
            .await
    }

    pub async fn get_weather(&self, location_id: LocationId) -> Result<Vec<StoredWeather>> {
        Ok(self
            .weather_repo()
            .list_for_location(location_id)
            .await?
            .into_iter()
            .map(StoredWeather::from)
            .collect())
    }
}

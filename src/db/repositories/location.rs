use crate::entities::{locations, prelude::*};
use crate::models::LocationRecord;
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    sea_query::OnConflict,
};

pub struct LocationRepository {
    conn: DatabaseConnection,
}

impl LocationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find_by_query(&self, search_query: &str) -> Result<Option<locations::Model>> {
        let model = Locations::find()
            .filter(locations::Column::SearchQuery.eq(search_query))
            .one(&self.conn)
            .await?;
        Ok(model)
    }

    /// Oldest row stored at exactly these coordinates.
    pub async fn find_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<locations::Model>> {
        let model = Locations::find()
            .filter(locations::Column::Latitude.eq(latitude))
            .filter(locations::Column::Longitude.eq(longitude))
            .order_by_asc(locations::Column::Id)
            .one(&self.conn)
            .await?;
        Ok(model)
    }

    /// Returns `false` when a row for the same search query already existed.
    pub async fn insert(&self, record: &LocationRecord) -> Result<bool> {
        let active_model = locations::ActiveModel {
            search_query: Set(record.search_query.clone()),
            formatted_query: Set(record.formatted_query.clone()),
            latitude: Set(record.latitude),
            longitude: Set(record.longitude),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let inserted = Locations::insert(active_model)
            .on_conflict(
                OnConflict::column(locations::Column::SearchQuery)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(inserted > 0)
    }

    pub async fn count_by_query(&self, search_query: &str) -> Result<u64> {
        let count = Locations::find()
            .filter(locations::Column::SearchQuery.eq(search_query))
            .count(&self.conn)
            .await?;
        Ok(count)
    }
}

use crate::domain::LocationId;
use crate::entities::{prelude::*, weathers};
use crate::models::WeatherRecord;
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

pub struct WeatherRepository {
    conn: DatabaseConnection,
}

impl WeatherRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Swaps the stored forecast of a location for `records` atomically.
    pub async fn replace_for_location(
        &self,
        location_id: LocationId,
        records: &[WeatherRecord],
    ) -> Result<()> {
        let txn = self.conn.begin().await?;

        Weathers::delete_many()
            .filter(weathers::Column::LocationId.eq(location_id.value()))
            .exec(&txn)
            .await?;

        if !records.is_empty() {
            let created_at = chrono::Utc::now().to_rfc3339();
            let models: Vec<weathers::ActiveModel> = records
                .iter()
                .map(|r| weathers::ActiveModel {
                    location_id: Set(location_id.value()),
                    forecast: Set(r.forecast.clone()),
                    time: Set(r.time.clone()),
                    created_at: Set(created_at.clone()),
                    ..Default::default()
                })
                .collect();

            // Forecasts are a handful of days; one statement stays well under
            // SQLite's bound-parameter limit.
            Weathers::insert_many(models).exec(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }

    pub async fn list_for_location(&self, location_id: LocationId) -> Result<Vec<weathers::Model>> {
        let rows = Weathers::find()
            .filter(weathers::Column::LocationId.eq(location_id.value()))
            .order_by_asc(weathers::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }
}

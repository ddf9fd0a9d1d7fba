use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        // Rows written by concurrent misses before the index existed.
        conn.execute_unprepared(
            "DELETE FROM locations WHERE id NOT IN (SELECT MIN(id) FROM locations GROUP BY search_query)",
        )
        .await?;

        conn.execute_unprepared("DROP INDEX IF EXISTS idx_locations_search_query")
            .await?;

        conn.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_locations_search_query_unique ON locations(search_query)",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared("DROP INDEX IF EXISTS idx_locations_search_query_unique")
            .await?;

        conn.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_locations_search_query ON locations(search_query)",
        )
        .await?;

        Ok(())
    }
}

use sea_orm_migration::prelude::*;

mod m20240101_create_locations;
mod m20240102_create_weathers;
mod m20240115_locations_unique_query;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_create_locations::Migration),
            Box::new(m20240102_create_weathers::Migration),
            Box::new(m20240115_locations_unique_query::Migration),
        ]
    }
}

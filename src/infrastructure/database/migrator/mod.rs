//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_conceptos;
mod m20250101_000002_create_clases;
mod m20250101_000003_create_matriculas;
mod m20250101_000004_create_cargos;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_conceptos::Migration),
            Box::new(m20250101_000002_create_clases::Migration),
            Box::new(m20250101_000003_create_matriculas::Migration),
            Box::new(m20250101_000004_create_cargos::Migration),
        ]
    }
}

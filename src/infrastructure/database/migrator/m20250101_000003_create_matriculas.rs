//! Create matriculas table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Matriculas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Matriculas::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Matriculas::Activo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Matriculas::AtletaId).string().not_null())
                    // Not a foreign key: enrollments are edited by the frontend
                    // and may point at a class that no longer exists.
                    .col(ColumnDef::new(Matriculas::ClaseId).string().not_null())
                    .col(ColumnDef::new(Matriculas::FechaInscripcion).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Matriculas::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Active enrollments are scanned newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_matriculas_activo_created")
                    .table(Matriculas::Table)
                    .col(Matriculas::Activo)
                    .col(Matriculas::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Matriculas::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Matriculas {
    Table,
    Id,
    Activo,
    AtletaId,
    ClaseId,
    FechaInscripcion,
    CreatedAt,
}

//! Create clases table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clases::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clases::Nombre).string().not_null())
                    .col(ColumnDef::new(Clases::ConceptoId).string())
                    .col(
                        ColumnDef::new(Clases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Clases::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Clases {
    Table,
    Id,
    Nombre,
    ConceptoId,
    CreatedAt,
}

//! Create conceptos table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Conceptos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Conceptos::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Conceptos::Nombre).string().not_null())
                    .col(
                        ColumnDef::new(Conceptos::PrecioCentavos)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Conceptos::Tipo)
                            .string()
                            .not_null()
                            .default("mensual"),
                    )
                    .col(
                        ColumnDef::new(Conceptos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Conceptos::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Conceptos {
    Table,
    Id,
    Nombre,
    PrecioCentavos,
    Tipo,
    CreatedAt,
}

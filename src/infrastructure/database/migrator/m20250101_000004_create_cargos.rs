//! Create cargos table

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_conceptos::Conceptos;
use super::m20250101_000003_create_matriculas::Matriculas;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cargos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cargos::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cargos::AtletaId).string().not_null())
                    .col(ColumnDef::new(Cargos::ConceptoId).string().not_null())
                    .col(ColumnDef::new(Cargos::PeriodoId).string().not_null())
                    .col(ColumnDef::new(Cargos::MatriculaId).string().not_null())
                    .col(
                        ColumnDef::new(Cargos::MontoTotalCentavos)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Cargos::Estado)
                            .string()
                            .not_null()
                            .default("pendiente"),
                    )
                    .col(
                        ColumnDef::new(Cargos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cargos_matricula")
                            .from(Cargos::Table, Cargos::MatriculaId)
                            .to(Matriculas::Table, Matriculas::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cargos_concepto")
                            .from(Cargos::Table, Cargos::ConceptoId)
                            .to(Conceptos::Table, Conceptos::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // One charge per enrollment and period
        manager
            .create_index(
                Index::create()
                    .name("idx_cargos_matricula_periodo")
                    .table(Cargos::Table)
                    .col(Cargos::MatriculaId)
                    .col(Cargos::PeriodoId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cargos_periodo")
                    .table(Cargos::Table)
                    .col(Cargos::PeriodoId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cargos::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Cargos {
    Table,
    Id,
    AtletaId,
    ConceptoId,
    PeriodoId,
    MatriculaId,
    MontoTotalCentavos,
    Estado,
    CreatedAt,
}

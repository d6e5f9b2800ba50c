//! Cargo entity (charges)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cargos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub atleta_id: String,

    pub concepto_id: String,

    /// Opaque billing period supplied by the caller
    pub periodo_id: String,

    pub matricula_id: String,

    /// Amount in minor units (cents), copied from the concept price
    pub monto_total_centavos: i64,

    /// `pendiente`, `pagado` or `anulado`
    pub estado: String,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::matricula::Entity",
        from = "Column::MatriculaId",
        to = "super::matricula::Column::Id"
    )]
    Matricula,
    #[sea_orm(
        belongs_to = "super::concepto::Entity",
        from = "Column::ConceptoId",
        to = "super::concepto::Column::Id"
    )]
    Concepto,
}

impl Related<super::matricula::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Matricula.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

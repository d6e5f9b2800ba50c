//! Clase entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub nombre: String,

    #[sea_orm(nullable)]
    pub concepto_id: Option<String>,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::concepto::Entity",
        from = "Column::ConceptoId",
        to = "super::concepto::Column::Id"
    )]
    Concepto,
    #[sea_orm(has_many = "super::matricula::Entity")]
    Matricula,
}

impl Related<super::concepto::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Concepto.def()
    }
}

impl Related<super::matricula::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Matricula.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

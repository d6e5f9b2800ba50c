//! Concepto entity (fee concepts)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "conceptos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub nombre: String,

    /// Price in minor units (cents)
    pub precio_centavos: i64,

    /// `mensual` or `opcional`
    pub tipo: String,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::clase::Entity")]
    Clase,
}

impl Related<super::clase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clase.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

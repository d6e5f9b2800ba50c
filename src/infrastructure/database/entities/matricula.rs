//! Matricula entity (enrollments)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "matriculas")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub activo: bool,

    pub atleta_id: String,

    pub clase_id: String,

    #[sea_orm(nullable)]
    pub fecha_inscripcion: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::clase::Entity",
        from = "Column::ClaseId",
        to = "super::clase::Column::Id"
    )]
    Clase,
    #[sea_orm(has_many = "super::cargo::Entity")]
    Cargo,
}

impl Related<super::clase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clase.def()
    }
}

impl Related<super::cargo::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cargo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

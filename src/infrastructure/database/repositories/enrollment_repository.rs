//! SeaORM implementation of EnrollmentRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::debug;

use crate::domain::{DomainResult, Enrollment, EnrollmentCursor, EnrollmentRepository};
use crate::infrastructure::database::entities::matricula;
use crate::infrastructure::database::new_record_id;

pub struct SeaOrmEnrollmentRepository {
    db: DatabaseConnection,
}

impl SeaOrmEnrollmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: matricula::Model) -> Enrollment {
    Enrollment {
        id: m.id,
        active: m.activo,
        athlete_id: m.atleta_id,
        class_id: m.clase_id,
        enrolled_at: m.fecha_inscripcion,
        created_at: m.created_at,
    }
}

#[async_trait]
impl EnrollmentRepository for SeaOrmEnrollmentRepository {
    async fn find_active_page(
        &self,
        after: Option<&EnrollmentCursor>,
        limit: u64,
    ) -> DomainResult<Vec<Enrollment>> {
        let mut query = matricula::Entity::find().filter(matricula::Column::Activo.eq(true));
        if let Some(cursor) = after {
            query = query.filter(
                Condition::any()
                    .add(matricula::Column::CreatedAt.lt(cursor.created_at))
                    .add(
                        Condition::all()
                            .add(matricula::Column::CreatedAt.eq(cursor.created_at))
                            .add(matricula::Column::Id.lt(cursor.id.as_str())),
                    ),
            );
        }

        let models = query
            .order_by_desc(matricula::Column::CreatedAt)
            .order_by_desc(matricula::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn save(&self, e: Enrollment) -> DomainResult<Enrollment> {
        let id = if e.id.is_empty() { new_record_id() } else { e.id };
        debug!(matricula_id = %id, clase_id = %e.class_id, "Saving enrollment");

        let model = matricula::ActiveModel {
            id: Set(id),
            activo: Set(e.active),
            atleta_id: Set(e.athlete_id),
            clase_id: Set(e.class_id),
            fecha_inscripcion: Set(e.enrolled_at),
            created_at: Set(e.created_at),
        };
        let saved = model.insert(&self.db).await?;
        Ok(model_to_domain(saved))
    }
}

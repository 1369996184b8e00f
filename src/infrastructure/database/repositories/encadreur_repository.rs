use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::{DomainResult, Encadreur, EncadreurRepository};
use crate::infrastructure::database::entities::encadreur;

use super::user_repository::db_err;

pub struct SeaOrmEncadreurRepository {
    db: DatabaseConnection,
}

impl SeaOrmEncadreurRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(super) fn encadreur_model_to_domain(model: encadreur::Model) -> Encadreur {
    Encadreur {
        id: model.id,
        user_id: model.user_id,
        department: model.department,
        specialization: model.specialization,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl EncadreurRepository for SeaOrmEncadreurRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Encadreur>> {
        let model = encadreur::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(encadreur_model_to_domain))
    }

    async fn find_by_user_id(&self, user_id: i64) -> DomainResult<Option<Encadreur>> {
        let model = encadreur::Entity::find()
            .filter(encadreur::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(encadreur_model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Encadreur>> {
        let models = encadreur::Entity::find()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(encadreur_model_to_domain).collect())
    }

    async fn update(&self, encadreur: Encadreur) -> DomainResult<Encadreur> {
        let active = encadreur::ActiveModel {
            id: Set(encadreur.id),
            user_id: Set(encadreur.user_id),
            department: Set(encadreur.department),
            specialization: Set(encadreur.specialization),
            created_at: Set(encadreur.created_at),
            updated_at: Set(Utc::now()),
        };

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(encadreur_model_to_domain(updated))
    }
}

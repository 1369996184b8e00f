use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::domain::{DomainError, DomainResult, Intern, InternRepository, InternshipStatus};
use crate::infrastructure::database::entities::intern;

use super::user_repository::db_err;

pub struct SeaOrmInternRepository {
    db: DatabaseConnection,
}

impl SeaOrmInternRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_intern_status_to_domain(status: intern::InternshipStatus) -> InternshipStatus {
    match status {
        intern::InternshipStatus::Pending => InternshipStatus::Pending,
        intern::InternshipStatus::Active => InternshipStatus::Active,
        intern::InternshipStatus::Completed => InternshipStatus::Completed,
        intern::InternshipStatus::Cancelled => InternshipStatus::Cancelled,
    }
}

pub(super) fn domain_intern_status_to_entity(status: InternshipStatus) -> intern::InternshipStatus {
    match status {
        InternshipStatus::Pending => intern::InternshipStatus::Pending,
        InternshipStatus::Active => intern::InternshipStatus::Active,
        InternshipStatus::Completed => intern::InternshipStatus::Completed,
        InternshipStatus::Cancelled => intern::InternshipStatus::Cancelled,
    }
}

pub(super) fn intern_model_to_domain(model: intern::Model) -> Intern {
    Intern {
        id: model.id,
        user_id: model.user_id,
        encadreur_id: model.encadreur_id,
        project_id: model.project_id,
        school: model.school,
        department: model.department,
        start_date: model.start_date,
        end_date: model.end_date,
        status: entity_intern_status_to_domain(model.status),
        cv: model.cv,
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl InternRepository for SeaOrmInternRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Intern>> {
        let model = intern::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(intern_model_to_domain))
    }

    async fn find_by_user_id(&self, user_id: i64) -> DomainResult<Option<Intern>> {
        let model = intern::Entity::find()
            .filter(intern::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(intern_model_to_domain))
    }

    async fn find_by_encadreur(&self, encadreur_id: i64) -> DomainResult<Vec<Intern>> {
        let models = intern::Entity::find()
            .filter(intern::Column::EncadreurId.eq(encadreur_id))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(intern_model_to_domain).collect())
    }

    async fn find_by_department(&self, department: &str) -> DomainResult<Vec<Intern>> {
        let models = intern::Entity::find()
            .filter(intern::Column::Department.eq(department))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(intern_model_to_domain).collect())
    }

    async fn find_by_project(&self, project_id: i64) -> DomainResult<Vec<Intern>> {
        let models = intern::Entity::find()
            .filter(intern::Column::ProjectId.eq(project_id))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(intern_model_to_domain).collect())
    }

    async fn find_by_status(&self, status: InternshipStatus) -> DomainResult<Vec<Intern>> {
        let models = intern::Entity::find()
            .filter(intern::Column::Status.eq(domain_intern_status_to_entity(status)))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(intern_model_to_domain).collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<Intern>> {
        let models = intern::Entity::find().all(&self.db).await.map_err(db_err)?;
        Ok(models.into_iter().map(intern_model_to_domain).collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        intern::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn update(&self, intern: Intern) -> DomainResult<Intern> {
        let active = intern::ActiveModel {
            id: Set(intern.id),
            user_id: Set(intern.user_id),
            encadreur_id: Set(intern.encadreur_id),
            project_id: Set(intern.project_id),
            school: Set(intern.school),
            department: Set(intern.department),
            start_date: Set(intern.start_date),
            end_date: Set(intern.end_date),
            status: Set(domain_intern_status_to_entity(intern.status)),
            cv: Set(intern.cv),
            notes: Set(intern.notes),
            created_at: Set(intern.created_at),
            updated_at: Set(Utc::now()),
        };

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(intern_model_to_domain(updated))
    }

    async fn set_project(&self, intern_id: i64, project_id: Option<i64>) -> DomainResult<()> {
        let existing = intern::Entity::find_by_id(intern_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("Intern", "id", intern_id));
        };

        let mut active: intern::ActiveModel = existing.into();
        active.project_id = Set(project_id);
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;

        Ok(())
    }
}

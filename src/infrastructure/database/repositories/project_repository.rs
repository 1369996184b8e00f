use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::{DomainError, DomainResult, NewProject, Project, ProjectRepository, ProjectStatus};
use crate::infrastructure::database::entities::{intern, project};

use super::user_repository::db_err;

pub struct SeaOrmProjectRepository {
    db: DatabaseConnection,
}

impl SeaOrmProjectRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_project_status_to_domain(status: project::ProjectStatus) -> ProjectStatus {
    match status {
        project::ProjectStatus::Planning => ProjectStatus::Planning,
        project::ProjectStatus::InProgress => ProjectStatus::InProgress,
        project::ProjectStatus::Completed => ProjectStatus::Completed,
        project::ProjectStatus::OnBug => ProjectStatus::OnBug,
    }
}

fn domain_project_status_to_entity(status: ProjectStatus) -> project::ProjectStatus {
    match status {
        ProjectStatus::Planning => project::ProjectStatus::Planning,
        ProjectStatus::InProgress => project::ProjectStatus::InProgress,
        ProjectStatus::Completed => project::ProjectStatus::Completed,
        ProjectStatus::OnBug => project::ProjectStatus::OnBug,
    }
}

fn project_model_to_domain(model: project::Model) -> Project {
    Project {
        id: model.id,
        title: model.title,
        description: model.description,
        encadreur_id: model.encadreur_id,
        start_date: model.start_date,
        end_date: model.end_date,
        status: entity_project_status_to_domain(model.status),
        progress: model.progress,
        department: model.department,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl ProjectRepository for SeaOrmProjectRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Project>> {
        let model = project::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(project_model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Project>> {
        let models = project::Entity::find()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(project_model_to_domain).collect())
    }

    async fn find_by_encadreur(&self, encadreur_id: i64) -> DomainResult<Vec<Project>> {
        let models = project::Entity::find()
            .filter(project::Column::EncadreurId.eq(encadreur_id))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(project_model_to_domain).collect())
    }

    async fn find_by_intern(&self, intern_id: i64) -> DomainResult<Vec<Project>> {
        // Assignment lives on the intern row, so "projects containing an
        // intern" is a lookup of that row's project link.
        let intern = intern::Entity::find_by_id(intern_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(project_id) = intern.and_then(|i| i.project_id) else {
            return Ok(Vec::new());
        };

        let model = project::Entity::find_by_id(project_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(project_model_to_domain).into_iter().collect())
    }

    async fn insert(&self, dto: NewProject) -> DomainResult<Project> {
        let now = Utc::now();
        let model = project::ActiveModel {
            title: Set(dto.title),
            description: Set(dto.description),
            encadreur_id: Set(dto.encadreur_id),
            start_date: Set(dto.start_date),
            end_date: Set(dto.end_date),
            status: Set(domain_project_status_to_entity(dto.status)),
            progress: Set(Some(dto.progress)),
            department: Set(dto.department),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        Ok(project_model_to_domain(model))
    }

    async fn update(&self, project: Project) -> DomainResult<Project> {
        let active = project::ActiveModel {
            id: Set(project.id),
            title: Set(project.title),
            description: Set(project.description),
            encadreur_id: Set(project.encadreur_id),
            start_date: Set(project.start_date),
            end_date: Set(project.end_date),
            status: Set(domain_project_status_to_entity(project.status)),
            progress: Set(project.progress),
            department: Set(project.department),
            created_at: Set(project.created_at),
            updated_at: Set(Utc::now()),
        };

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(project_model_to_domain(updated))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = project::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Project", "id", id));
        }

        Ok(())
    }
}

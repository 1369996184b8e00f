use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::{DomainError, DomainResult, NewTask, Task, TaskPriority, TaskRepository, TaskStatus};
use crate::infrastructure::database::entities::task;

use super::user_repository::db_err;

pub struct SeaOrmTaskRepository {
    db: DatabaseConnection,
}

impl SeaOrmTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_task_status_to_domain(status: task::TaskStatus) -> TaskStatus {
    match status {
        task::TaskStatus::Todo => TaskStatus::Todo,
        task::TaskStatus::InProgress => TaskStatus::InProgress,
        task::TaskStatus::Done => TaskStatus::Done,
    }
}

fn domain_task_status_to_entity(status: TaskStatus) -> task::TaskStatus {
    match status {
        TaskStatus::Todo => task::TaskStatus::Todo,
        TaskStatus::InProgress => task::TaskStatus::InProgress,
        TaskStatus::Done => task::TaskStatus::Done,
    }
}

fn entity_priority_to_domain(priority: task::TaskPriority) -> TaskPriority {
    match priority {
        task::TaskPriority::Low => TaskPriority::Low,
        task::TaskPriority::Medium => TaskPriority::Medium,
        task::TaskPriority::High => TaskPriority::High,
    }
}

fn domain_priority_to_entity(priority: TaskPriority) -> task::TaskPriority {
    match priority {
        TaskPriority::Low => task::TaskPriority::Low,
        TaskPriority::Medium => task::TaskPriority::Medium,
        TaskPriority::High => task::TaskPriority::High,
    }
}

fn task_model_to_domain(model: task::Model) -> Task {
    Task {
        id: model.id,
        title: model.title,
        description: model.description,
        project_id: model.project_id,
        assigned_to: model.assigned_to,
        status: entity_task_status_to_domain(model.status),
        priority: entity_priority_to_domain(model.priority),
        due_date: model.due_date,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl TaskRepository for SeaOrmTaskRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Task>> {
        let model = task::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(task_model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Task>> {
        let models = task::Entity::find().all(&self.db).await.map_err(db_err)?;
        Ok(models.into_iter().map(task_model_to_domain).collect())
    }

    async fn find_by_project(&self, project_id: i64) -> DomainResult<Vec<Task>> {
        let models = task::Entity::find()
            .filter(task::Column::ProjectId.eq(project_id))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(task_model_to_domain).collect())
    }

    async fn find_by_assignee(&self, user_id: i64) -> DomainResult<Vec<Task>> {
        let models = task::Entity::find()
            .filter(task::Column::AssignedTo.eq(user_id))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(task_model_to_domain).collect())
    }

    async fn find_by_status(&self, status: TaskStatus) -> DomainResult<Vec<Task>> {
        let models = task::Entity::find()
            .filter(task::Column::Status.eq(domain_task_status_to_entity(status)))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(task_model_to_domain).collect())
    }

    async fn insert(&self, dto: NewTask) -> DomainResult<Task> {
        let now = Utc::now();
        let model = task::ActiveModel {
            title: Set(dto.title),
            description: Set(dto.description),
            project_id: Set(dto.project_id),
            assigned_to: Set(dto.assigned_to),
            status: Set(domain_task_status_to_entity(dto.status)),
            priority: Set(domain_priority_to_entity(dto.priority)),
            due_date: Set(dto.due_date),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        Ok(task_model_to_domain(model))
    }

    async fn update(&self, task: Task) -> DomainResult<Task> {
        let active = task::ActiveModel {
            id: Set(task.id),
            title: Set(task.title),
            description: Set(task.description),
            project_id: Set(task.project_id),
            assigned_to: Set(task.assigned_to),
            status: Set(domain_task_status_to_entity(task.status)),
            priority: Set(domain_priority_to_entity(task.priority)),
            due_date: Set(task.due_date),
            created_at: Set(task.created_at),
            updated_at: Set(Utc::now()),
        };

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(task_model_to_domain(updated))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = task::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Task", "id", id));
        }

        Ok(())
    }
}

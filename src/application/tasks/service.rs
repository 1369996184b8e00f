//! Task management

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::{
    DomainError, DomainResult, NewTask, RepositoryProvider, Task, TaskPriority, TaskStatus,
};

#[derive(Debug, Clone)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub project_id: Option<i64>,
    pub assigned_to: Option<i64>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<i64>,
    pub assigned_to: Option<i64>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
}

pub struct TaskService {
    repos: Arc<dyn RepositoryProvider>,
}

impl TaskService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<Task>> {
        self.repos.tasks().find_all().await
    }

    pub async fn list_by_project(&self, project_id: i64) -> DomainResult<Vec<Task>> {
        self.repos.tasks().find_by_project(project_id).await
    }

    pub async fn list_by_assignee(&self, user_id: i64) -> DomainResult<Vec<Task>> {
        self.repos.tasks().find_by_assignee(user_id).await
    }

    pub async fn get(&self, id: i64) -> DomainResult<Task> {
        self.repos
            .tasks()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Task", "id", id))
    }

    /// Create a task. Status defaults to TODO and priority to MEDIUM.
    pub async fn create(&self, req: CreateTaskRequest) -> DomainResult<Task> {
        if let Some(project_id) = req.project_id {
            self.ensure_project(project_id).await?;
        }

        let status = match req.status.as_deref() {
            None => TaskStatus::Todo,
            Some(raw) => parse_status(raw)?,
        };
        let priority = match req.priority.as_deref() {
            None => TaskPriority::Medium,
            Some(raw) => parse_priority(raw)?,
        };

        let task = self
            .repos
            .tasks()
            .insert(NewTask {
                title: req.title,
                description: req.description,
                project_id: req.project_id,
                assigned_to: req.assigned_to,
                status,
                priority,
                due_date: parse_date_opt(req.due_date.as_deref())?,
            })
            .await?;

        info!(task_id = task.id, "task created");
        Ok(task)
    }

    pub async fn update(&self, id: i64, req: UpdateTaskRequest) -> DomainResult<Task> {
        let mut task = self.get(id).await?;

        if let Some(title) = req.title {
            task.title = title;
        }
        if req.description.is_some() {
            task.description = req.description;
        }
        if let Some(project_id) = req.project_id {
            self.ensure_project(project_id).await?;
            task.project_id = Some(project_id);
        }
        if req.assigned_to.is_some() {
            task.assigned_to = req.assigned_to;
        }
        if let Some(raw) = req.status.as_deref() {
            task.status = parse_status(raw)?;
        }
        if let Some(raw) = req.priority.as_deref() {
            task.priority = parse_priority(raw)?;
        }
        if let Some(raw) = req.due_date.as_deref() {
            task.due_date = Some(
                raw.parse::<NaiveDate>()
                    .map_err(|_| DomainError::InvalidDate(raw.to_string()))?,
            );
        }

        self.repos.tasks().update(task).await
    }

    /// Move a task to a new status without touching anything else.
    pub async fn update_status(&self, id: i64, status: &str) -> DomainResult<Task> {
        let mut task = self.get(id).await?;
        task.status = parse_status(status)?;
        self.repos.tasks().update(task).await
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.repos.tasks().delete(id).await?;
        info!(task_id = id, "task deleted");
        Ok(())
    }

    async fn ensure_project(&self, project_id: i64) -> DomainResult<()> {
        if self
            .repos
            .projects()
            .find_by_id(project_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Project", "id", project_id));
        }
        Ok(())
    }
}

fn parse_status(raw: &str) -> DomainResult<TaskStatus> {
    TaskStatus::parse(raw).ok_or(DomainError::InvalidEnum {
        field: "status",
        value: raw.to_string(),
    })
}

fn parse_priority(raw: &str) -> DomainResult<TaskPriority> {
    TaskPriority::parse(raw).ok_or(DomainError::InvalidEnum {
        field: "priority",
        value: raw.to_string(),
    })
}

fn parse_date_opt(raw: Option<&str>) -> DomainResult<Option<NaiveDate>> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(|_| DomainError::InvalidDate(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositories;

    fn create_request(title: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: title.to_string(),
            description: None,
            project_id: None,
            assigned_to: None,
            status: None,
            priority: None,
            due_date: None,
        }
    }

    #[tokio::test]
    async fn create_defaults_to_todo_medium() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositories::new());
        let svc = TaskService::new(repos);

        let task = svc.create(create_request("Write report")).await.unwrap();
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, TaskPriority::Medium);
    }

    #[tokio::test]
    async fn status_transitions_validate_the_label() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositories::new());
        let svc = TaskService::new(repos);
        let task = svc.create(create_request("Write report")).await.unwrap();

        let moved = svc.update_status(task.id, "IN_PROGRESS").await.unwrap();
        assert_eq!(moved.status, TaskStatus::InProgress);

        let attempt = svc.update_status(task.id, "BLOCKED").await;
        assert!(matches!(attempt, Err(DomainError::InvalidEnum { .. })));
    }

    #[tokio::test]
    async fn create_rejects_unknown_project() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositories::new());
        let svc = TaskService::new(repos);

        let mut req = create_request("Write report");
        req.project_id = Some(404);

        let attempt = svc.create(req).await;
        assert!(matches!(attempt, Err(DomainError::NotFound { .. })));
    }
}

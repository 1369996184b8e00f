//! Task DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Task;

#[derive(Debug, Serialize, ToSchema)]
pub struct TaskDto {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub project_id: Option<i64>,
    pub assigned_to: Option<i64>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<NaiveDate>,
}

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            project_id: task.project_id,
            assigned_to: task.assigned_to,
            status: task.status.as_str().to_string(),
            priority: task.priority.as_str().to_string(),
            due_date: task.due_date,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTaskBody {
    #[validate(length(min = 1, max = 200, message = "title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub project_id: Option<i64>,
    pub assigned_to: Option<i64>,
    /// TODO | IN_PROGRESS | DONE, defaults to TODO
    pub status: Option<String>,
    /// LOW | MEDIUM | HIGH, defaults to MEDIUM
    pub priority: Option<String>,
    /// ISO date, e.g. "2025-03-01"
    pub due_date: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTaskBody {
    #[validate(length(min = 1, max = 200, message = "title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<i64>,
    pub assigned_to: Option<i64>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTaskStatusBody {
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TaskListQuery {
    pub project_id: Option<i64>,
    pub assigned_to: Option<i64>,
}

//! Project DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Project;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectDto {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub encadreur_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub progress: Option<i32>,
    pub department: Option<String>,
}

impl From<Project> for ProjectDto {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            title: project.title,
            description: project.description,
            encadreur_id: project.encadreur_id,
            start_date: project.start_date,
            end_date: project.end_date,
            status: project.status.as_str().to_string(),
            progress: project.progress,
            department: project.department,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProjectBody {
    #[validate(length(min = 1, max = 200, message = "title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub encadreur_id: Option<i64>,
    /// ISO date, e.g. "2025-03-01"
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// PLANNING | IN_PROGRESS | COMPLETED | ON_BUG
    pub status: Option<String>,
    pub progress: Option<i32>,
    pub department: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProjectBody {
    #[validate(length(min = 1, max = 200, message = "title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub encadreur_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub progress: Option<i32>,
    pub department: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignInternsBody {
    pub intern_ids: Vec<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProjectListQuery {
    pub encadreur_id: Option<i64>,
}

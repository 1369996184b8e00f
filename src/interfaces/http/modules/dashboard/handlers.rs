//! Dashboard API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{DashboardMetricsDto, DepartmentStatsDto, ProjectStatusStatsDto, TaskStatsDto};
use crate::application::dashboard::DashboardService;
use crate::interfaces::http::common::{domain_error, ApiResponse};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct DashboardHandlerState {
    pub dashboard: Arc<DashboardService>,
}

#[utoipa::path(
    get,
    path = "/api/dashboard/metrics",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Role-scoped dashboard metrics", body = ApiResponse<DashboardMetricsDto>),
        (status = 404, description = "Caller has no matching role record")
    )
)]
pub async fn get_metrics(
    State(state): State<DashboardHandlerState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<DashboardMetricsDto>>, (StatusCode, Json<ApiResponse<DashboardMetricsDto>>)>
{
    let metrics = state
        .dashboard
        .get_metrics(user.user_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(metrics.into())))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/departments",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Per-department intern and project counts", body = ApiResponse<Vec<DepartmentStatsDto>>)
    )
)]
pub async fn get_department_stats(
    State(state): State<DashboardHandlerState>,
) -> Result<
    Json<ApiResponse<Vec<DepartmentStatsDto>>>,
    (StatusCode, Json<ApiResponse<Vec<DepartmentStatsDto>>>),
> {
    let stats = state
        .dashboard
        .get_department_stats()
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        stats.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/projects/status",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Project counts by status", body = ApiResponse<ProjectStatusStatsDto>)
    )
)]
pub async fn get_project_status_stats(
    State(state): State<DashboardHandlerState>,
) -> Result<
    Json<ApiResponse<ProjectStatusStatsDto>>,
    (StatusCode, Json<ApiResponse<ProjectStatusStatsDto>>),
> {
    let stats = state
        .dashboard
        .get_project_status_stats()
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(stats.into())))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/tasks",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Task statistics", body = ApiResponse<TaskStatsDto>)
    )
)]
pub async fn get_task_stats(
    State(state): State<DashboardHandlerState>,
) -> Result<Json<ApiResponse<TaskStatsDto>>, (StatusCode, Json<ApiResponse<TaskStatsDto>>)> {
    let stats = state
        .dashboard
        .get_task_stats()
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(stats.into())))
}

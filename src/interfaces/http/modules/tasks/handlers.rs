//! Task API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateTaskBody, TaskDto, TaskListQuery, UpdateTaskBody, UpdateTaskStatusBody};
use crate::application::tasks::{CreateTaskRequest, TaskService, UpdateTaskRequest};
use crate::interfaces::http::common::{domain_error, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct TaskHandlerState {
    pub tasks: Arc<TaskService>,
}

#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    params(
        ("project_id" = Option<i64>, Query, description = "Filter by project"),
        ("assigned_to" = Option<i64>, Query, description = "Filter by assignee user id")
    ),
    responses(
        (status = 200, description = "Tasks matching the filter", body = ApiResponse<Vec<TaskDto>>)
    )
)]
pub async fn list_tasks(
    State(state): State<TaskHandlerState>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<ApiResponse<Vec<TaskDto>>>, (StatusCode, Json<ApiResponse<Vec<TaskDto>>>)> {
    let tasks = match (query.project_id, query.assigned_to) {
        (Some(project_id), _) => state.tasks.list_by_project(project_id).await,
        (None, Some(user_id)) => state.tasks.list_by_assignee(user_id).await,
        (None, None) => state.tasks.list().await,
    }
    .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        tasks.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task details", body = ApiResponse<TaskDto>),
        (status = 404, description = "Task not found")
    )
)]
pub async fn get_task(
    State(state): State<TaskHandlerState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<TaskDto>>, (StatusCode, Json<ApiResponse<TaskDto>>)> {
    let task = state.tasks.get(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(task.into())))
}

#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    request_body = CreateTaskBody,
    responses(
        (status = 201, description = "Task created", body = ApiResponse<TaskDto>),
        (status = 400, description = "Invalid status, priority, or date"),
        (status = 404, description = "Referenced project not found")
    )
)]
pub async fn create_task(
    State(state): State<TaskHandlerState>,
    ValidatedJson(body): ValidatedJson<CreateTaskBody>,
) -> Result<(StatusCode, Json<ApiResponse<TaskDto>>), (StatusCode, Json<ApiResponse<TaskDto>>)> {
    let task = state
        .tasks
        .create(CreateTaskRequest {
            title: body.title,
            description: body.description,
            project_id: body.project_id,
            assigned_to: body.assigned_to,
            status: body.status,
            priority: body.priority,
            due_date: body.due_date,
        })
        .await
        .map_err(domain_error)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(task.into()))))
}

#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Task id")),
    request_body = UpdateTaskBody,
    responses(
        (status = 200, description = "Task updated", body = ApiResponse<TaskDto>),
        (status = 404, description = "Task not found")
    )
)]
pub async fn update_task(
    State(state): State<TaskHandlerState>,
    Path(id): Path<i64>,
    ValidatedJson(body): ValidatedJson<UpdateTaskBody>,
) -> Result<Json<ApiResponse<TaskDto>>, (StatusCode, Json<ApiResponse<TaskDto>>)> {
    let task = state
        .tasks
        .update(
            id,
            UpdateTaskRequest {
                title: body.title,
                description: body.description,
                project_id: body.project_id,
                assigned_to: body.assigned_to,
                status: body.status,
                priority: body.priority,
                due_date: body.due_date,
            },
        )
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(task.into())))
}

#[utoipa::path(
    patch,
    path = "/api/tasks/{id}/status",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Task id")),
    request_body = UpdateTaskStatusBody,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<TaskDto>),
        (status = 400, description = "Unknown status label"),
        (status = 404, description = "Task not found")
    )
)]
pub async fn update_task_status(
    State(state): State<TaskHandlerState>,
    Path(id): Path<i64>,
    ValidatedJson(body): ValidatedJson<UpdateTaskStatusBody>,
) -> Result<Json<ApiResponse<TaskDto>>, (StatusCode, Json<ApiResponse<TaskDto>>)> {
    let task = state
        .tasks
        .update_status(id, &body.status)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(task.into())))
}

#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task deleted"),
        (status = 404, description = "Task not found")
    )
)]
pub async fn delete_task(
    State(state): State<TaskHandlerState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state.tasks.delete(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(())))
}

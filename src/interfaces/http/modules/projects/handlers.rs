//! Project API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    AssignInternsBody, CreateProjectBody, ProjectDto, ProjectListQuery, UpdateProjectBody,
};
use crate::application::projects::{CreateProjectRequest, ProjectService, UpdateProjectRequest};
use crate::interfaces::http::common::{domain_error, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct ProjectHandlerState {
    pub projects: Arc<ProjectService>,
}

#[utoipa::path(
    get,
    path = "/api/projets",
    tag = "Projets",
    security(("bearer_auth" = [])),
    params(("encadreur_id" = Option<i64>, Query, description = "Filter by supervising encadreur")),
    responses(
        (status = 200, description = "Projects matching the filter", body = ApiResponse<Vec<ProjectDto>>)
    )
)]
pub async fn list_projects(
    State(state): State<ProjectHandlerState>,
    Query(query): Query<ProjectListQuery>,
) -> Result<Json<ApiResponse<Vec<ProjectDto>>>, (StatusCode, Json<ApiResponse<Vec<ProjectDto>>>)> {
    let projects = match query.encadreur_id {
        Some(encadreur_id) => state.projects.list_by_encadreur(encadreur_id).await,
        None => state.projects.list().await,
    }
    .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        projects.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/projets/{id}",
    tag = "Projets",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project details", body = ApiResponse<ProjectDto>),
        (status = 404, description = "Project not found")
    )
)]
pub async fn get_project(
    State(state): State<ProjectHandlerState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ProjectDto>>, (StatusCode, Json<ApiResponse<ProjectDto>>)> {
    let project = state.projects.get(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(project.into())))
}

#[utoipa::path(
    post,
    path = "/api/projets",
    tag = "Projets",
    security(("bearer_auth" = [])),
    request_body = CreateProjectBody,
    responses(
        (status = 201, description = "Project created", body = ApiResponse<ProjectDto>),
        (status = 400, description = "Invalid status, date, or progress"),
        (status = 404, description = "Referenced encadreur not found")
    )
)]
pub async fn create_project(
    State(state): State<ProjectHandlerState>,
    ValidatedJson(body): ValidatedJson<CreateProjectBody>,
) -> Result<(StatusCode, Json<ApiResponse<ProjectDto>>), (StatusCode, Json<ApiResponse<ProjectDto>>)>
{
    let project = state
        .projects
        .create(CreateProjectRequest {
            title: body.title,
            description: body.description,
            encadreur_id: body.encadreur_id,
            start_date: body.start_date,
            end_date: body.end_date,
            status: body.status,
            progress: body.progress,
            department: body.department,
        })
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(project.into())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/projets/{id}",
    tag = "Projets",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Project id")),
    request_body = UpdateProjectBody,
    responses(
        (status = 200, description = "Project updated", body = ApiResponse<ProjectDto>),
        (status = 404, description = "Project not found")
    )
)]
pub async fn update_project(
    State(state): State<ProjectHandlerState>,
    Path(id): Path<i64>,
    ValidatedJson(body): ValidatedJson<UpdateProjectBody>,
) -> Result<Json<ApiResponse<ProjectDto>>, (StatusCode, Json<ApiResponse<ProjectDto>>)> {
    let project = state
        .projects
        .update(
            id,
            UpdateProjectRequest {
                title: body.title,
                description: body.description,
                encadreur_id: body.encadreur_id,
                start_date: body.start_date,
                end_date: body.end_date,
                status: body.status,
                progress: body.progress,
                department: body.department,
            },
        )
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(project.into())))
}

#[utoipa::path(
    delete,
    path = "/api/projets/{id}",
    tag = "Projets",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project deleted"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn delete_project(
    State(state): State<ProjectHandlerState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state.projects.delete(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(())))
}

#[utoipa::path(
    put,
    path = "/api/projets/{id}/stagiaires",
    tag = "Projets",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Project id")),
    request_body = AssignInternsBody,
    responses(
        (status = 200, description = "Assignment set replaced", body = ApiResponse<ProjectDto>),
        (status = 404, description = "Project or intern not found")
    )
)]
pub async fn assign_interns(
    State(state): State<ProjectHandlerState>,
    Path(id): Path<i64>,
    Json(body): Json<AssignInternsBody>,
) -> Result<Json<ApiResponse<ProjectDto>>, (StatusCode, Json<ApiResponse<ProjectDto>>)> {
    let project = state
        .projects
        .assign_interns(id, body.intern_ids)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(project.into())))
}

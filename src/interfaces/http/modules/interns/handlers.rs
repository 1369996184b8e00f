//! Intern API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateInternBody, InternDto, InternListQuery, UpdateInternBody};
use crate::application::interns::{CreateInternRequest, InternService, UpdateInternRequest};
use crate::interfaces::http::common::{domain_error, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct InternHandlerState {
    pub interns: Arc<InternService>,
}

#[utoipa::path(
    get,
    path = "/api/stagiaires",
    tag = "Stagiaires",
    security(("bearer_auth" = [])),
    params(
        ("encadreur_id" = Option<i64>, Query, description = "Filter by supervising encadreur"),
        ("department" = Option<String>, Query, description = "Filter by department"),
        ("status" = Option<String>, Query, description = "Filter by internship status")
    ),
    responses(
        (status = 200, description = "Interns matching the filter", body = ApiResponse<Vec<InternDto>>)
    )
)]
pub async fn list_interns(
    State(state): State<InternHandlerState>,
    Query(query): Query<InternListQuery>,
) -> Result<Json<ApiResponse<Vec<InternDto>>>, (StatusCode, Json<ApiResponse<Vec<InternDto>>>)> {
    let profiles = match (
        query.encadreur_id,
        query.department.as_deref(),
        query.status.as_deref(),
    ) {
        (Some(encadreur_id), _, _) => state.interns.list_by_encadreur(encadreur_id).await,
        (None, Some(department), _) => state.interns.list_by_department(department).await,
        (None, None, Some(status)) => state.interns.list_by_status(status).await,
        (None, None, None) => state.interns.list().await,
    }
    .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        profiles.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/stagiaires",
    tag = "Stagiaires",
    security(("bearer_auth" = [])),
    request_body = CreateInternBody,
    responses(
        (status = 200, description = "Intern created with a pending account", body = ApiResponse<InternDto>),
        (status = 404, description = "Referenced encadreur not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_intern(
    State(state): State<InternHandlerState>,
    ValidatedJson(body): ValidatedJson<CreateInternBody>,
) -> Result<Json<ApiResponse<InternDto>>, (StatusCode, Json<ApiResponse<InternDto>>)> {
    let profile = state
        .interns
        .create(CreateInternRequest {
            email: body.email,
            nom: body.nom,
            prenom: body.prenom,
            phone: body.phone,
            school: body.school,
            department: body.department,
            encadreur_id: body.encadreur_id,
            start_date: body.start_date,
            end_date: body.end_date,
        })
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(profile.into())))
}

#[utoipa::path(
    get,
    path = "/api/stagiaires/{id}",
    tag = "Stagiaires",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Intern id")),
    responses(
        (status = 200, description = "Intern details", body = ApiResponse<InternDto>),
        (status = 404, description = "Intern not found")
    )
)]
pub async fn get_intern(
    State(state): State<InternHandlerState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<InternDto>>, (StatusCode, Json<ApiResponse<InternDto>>)> {
    let profile = state.interns.get(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(profile.into())))
}

#[utoipa::path(
    put,
    path = "/api/stagiaires/{id}",
    tag = "Stagiaires",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Intern id")),
    request_body = UpdateInternBody,
    responses(
        (status = 200, description = "Intern updated", body = ApiResponse<InternDto>),
        (status = 400, description = "Invalid date or status"),
        (status = 404, description = "Intern or referenced encadreur not found")
    )
)]
pub async fn update_intern(
    State(state): State<InternHandlerState>,
    Path(id): Path<i64>,
    ValidatedJson(body): ValidatedJson<UpdateInternBody>,
) -> Result<Json<ApiResponse<InternDto>>, (StatusCode, Json<ApiResponse<InternDto>>)> {
    let profile = state
        .interns
        .update(
            id,
            UpdateInternRequest {
                nom: body.nom,
                prenom: body.prenom,
                phone: body.phone,
                school: body.school,
                department: body.department,
                encadreur_id: body.encadreur_id,
                start_date: body.start_date,
                end_date: body.end_date,
                status: body.status,
                notes: body.notes,
            },
        )
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(profile.into())))
}

#[utoipa::path(
    delete,
    path = "/api/stagiaires/{id}",
    tag = "Stagiaires",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Intern id")),
    responses(
        (status = 200, description = "Intern and backing account deleted"),
        (status = 404, description = "Intern not found")
    )
)]
pub async fn delete_intern(
    State(state): State<InternHandlerState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state.interns.delete(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(())))
}

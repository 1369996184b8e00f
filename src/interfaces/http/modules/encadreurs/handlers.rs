//! Encadreur API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{EncadreurDto, UpdateEncadreurBody};
use crate::application::encadreurs::{EncadreurService, UpdateEncadreurRequest};
use crate::interfaces::http::common::{domain_error, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct EncadreurHandlerState {
    pub encadreurs: Arc<EncadreurService>,
}

#[utoipa::path(
    get,
    path = "/api/encadreurs",
    tag = "Encadreurs",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All encadreurs", body = ApiResponse<Vec<EncadreurDto>>)
    )
)]
pub async fn list_encadreurs(
    State(state): State<EncadreurHandlerState>,
) -> Result<Json<ApiResponse<Vec<EncadreurDto>>>, (StatusCode, Json<ApiResponse<Vec<EncadreurDto>>>)>
{
    let profiles = state.encadreurs.list().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        profiles.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/encadreurs/{id}",
    tag = "Encadreurs",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Encadreur id")),
    responses(
        (status = 200, description = "Encadreur details", body = ApiResponse<EncadreurDto>),
        (status = 404, description = "Encadreur not found")
    )
)]
pub async fn get_encadreur(
    State(state): State<EncadreurHandlerState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<EncadreurDto>>, (StatusCode, Json<ApiResponse<EncadreurDto>>)> {
    let profile = state.encadreurs.get(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(profile.into())))
}

#[utoipa::path(
    put,
    path = "/api/encadreurs/{id}",
    tag = "Encadreurs",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Encadreur id")),
    request_body = UpdateEncadreurBody,
    responses(
        (status = 200, description = "Encadreur updated", body = ApiResponse<EncadreurDto>),
        (status = 404, description = "Encadreur not found")
    )
)]
pub async fn update_encadreur(
    State(state): State<EncadreurHandlerState>,
    Path(id): Path<i64>,
    ValidatedJson(body): ValidatedJson<UpdateEncadreurBody>,
) -> Result<Json<ApiResponse<EncadreurDto>>, (StatusCode, Json<ApiResponse<EncadreurDto>>)> {
    let profile = state
        .encadreurs
        .update(
            id,
            UpdateEncadreurRequest {
                nom: body.nom,
                prenom: body.prenom,
                phone: body.phone,
                department: body.department,
                specialization: body.specialization,
            },
        )
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(profile.into())))
}

#[utoipa::path(
    delete,
    path = "/api/encadreurs/{id}",
    tag = "Encadreurs",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Encadreur id")),
    responses(
        (status = 200, description = "Encadreur deleted"),
        (status = 400, description = "Interns still assigned"),
        (status = 404, description = "Encadreur not found")
    )
)]
pub async fn delete_encadreur(
    State(state): State<EncadreurHandlerState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state.encadreurs.delete(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(())))
}

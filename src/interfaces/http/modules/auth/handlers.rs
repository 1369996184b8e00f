//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{
    AuthResponse, CheckEmailRequest, CheckEmailResponse, CreatePasswordRequest, LoginRequest,
    RegisterAdminRequest, RegisterEncadreurRequest, RegisterStagiaireRequest, UserDto,
};
use crate::application::identity::{
    AuthService, CreateAdminRequest, CreateEncadreurRequest, CreateStagiaireRequest,
};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{domain_error, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub auth: Arc<AuthService>,
    pub repos: Arc<dyn RepositoryProvider>,
    pub jwt_config: JwtConfig,
}

impl AuthHandlerState {
    fn auth_response(&self, result: crate::application::identity::AuthResult) -> AuthResponse {
        AuthResponse {
            token: result.token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user: result.user.into(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/check-email",
    tag = "Authentication",
    request_body = CheckEmailRequest,
    responses(
        (status = 200, description = "Email lookup result", body = ApiResponse<CheckEmailResponse>)
    )
)]
pub async fn check_email(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<CheckEmailRequest>,
) -> Result<Json<ApiResponse<CheckEmailResponse>>, (StatusCode, Json<ApiResponse<CheckEmailResponse>>)>
{
    let check = state
        .auth
        .check_email(&request.email)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(CheckEmailResponse {
        exists: check.exists,
        has_password: check.has_password,
        message: check.message,
    })))
}

#[utoipa::path(
    post,
    path = "/api/auth/create-password",
    tag = "Authentication",
    request_body = CreatePasswordRequest,
    responses(
        (status = 200, description = "Account activated", body = ApiResponse<AuthResponse>),
        (status = 404, description = "No account for this email"),
        (status = 409, description = "Account already activated")
    )
)]
pub async fn create_password(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<CreatePasswordRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, (StatusCode, Json<ApiResponse<AuthResponse>>)> {
    let result = state
        .auth
        .create_password(&request.email, &request.password)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(state.auth_response(result))))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<AuthResponse>),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account disabled")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, (StatusCode, Json<ApiResponse<AuthResponse>>)> {
    let result = state
        .auth
        .login(&request.email, &request.password)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(state.auth_response(result))))
}

#[utoipa::path(
    post,
    path = "/api/auth/register/admin",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = RegisterAdminRequest,
    responses(
        (status = 201, description = "Admin created", body = ApiResponse<UserDto>),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register_admin(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterAdminRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), (StatusCode, Json<ApiResponse<UserDto>>)> {
    let user = state
        .auth
        .create_admin(CreateAdminRequest {
            email: request.email,
            password: request.password,
            nom: request.nom,
            prenom: request.prenom,
            phone: request.phone,
            department: request.department,
        })
        .await
        .map_err(domain_error)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(user.into()))))
}

#[utoipa::path(
    post,
    path = "/api/auth/register/encadreur",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = RegisterEncadreurRequest,
    responses(
        (status = 201, description = "Encadreur created (pending activation)", body = ApiResponse<UserDto>),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register_encadreur(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterEncadreurRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), (StatusCode, Json<ApiResponse<UserDto>>)> {
    let (user, _) = state
        .auth
        .create_encadreur(CreateEncadreurRequest {
            email: request.email,
            nom: request.nom,
            prenom: request.prenom,
            phone: request.phone,
            department: request.department,
            specialization: request.specialization,
        })
        .await
        .map_err(domain_error)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(user.into()))))
}

#[utoipa::path(
    post,
    path = "/api/auth/register/stagiaire",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = RegisterStagiaireRequest,
    responses(
        (status = 201, description = "Stagiaire created (pending activation)", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid date"),
        (status = 404, description = "Referenced encadreur not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register_stagiaire(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterStagiaireRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), (StatusCode, Json<ApiResponse<UserDto>>)> {
    let (user, _) = state
        .auth
        .create_stagiaire(CreateStagiaireRequest {
            email: request.email,
            nom: request.nom,
            prenom: request.prenom,
            phone: request.phone,
            school: request.school,
            department: request.department,
            encadreur_id: request.encadreur_id,
            start_date: request.start_date,
            end_date: request.end_date,
        })
        .await
        .map_err(domain_error)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(user.into()))))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user info", body = ApiResponse<UserDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_user(
    State(state): State<AuthHandlerState>,
    user: Option<axum::Extension<AuthenticatedUser>>,
) -> Result<Json<ApiResponse<UserDto>>, (StatusCode, Json<ApiResponse<UserDto>>)> {
    let Some(user) = user else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Not authenticated")),
        ));
    };

    let account = state
        .repos
        .users()
        .find_by_id(user.user_id)
        .await
        .map_err(domain_error)?;

    let Some(account) = account else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        ));
    };

    Ok(Json(ApiResponse::success(account.into())))
}

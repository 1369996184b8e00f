//! Authentication DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::User;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckEmailRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckEmailResponse {
    pub exists: bool,
    pub has_password: bool,
    pub message: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePasswordRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "password must be 6–128 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserDto,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterAdminRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "password must be 6–128 characters"))]
    pub password: String,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterEncadreurRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 100, message = "department is required"))]
    pub department: String,
    pub specialization: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterStagiaireRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub phone: Option<String>,
    pub school: Option<String>,
    pub department: Option<String>,
    pub encadreur_id: Option<i64>,
    /// ISO date, e.g. "2025-03-01"
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Account projection exposed by the API
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub avatar: Option<String>,
    pub role: String,
    pub account_status: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            nom: user.nom,
            prenom: user.prenom,
            phone: user.phone,
            department: user.department,
            avatar: user.avatar,
            role: user.role.as_str().to_string(),
            account_status: user.account_status.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

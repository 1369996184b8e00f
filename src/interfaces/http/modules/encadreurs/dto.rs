//! Encadreur DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::encadreurs::EncadreurProfile;

/// Flattened encadreur projection (account + supervisor record +
/// supervised-intern count)
#[derive(Debug, Serialize, ToSchema)]
pub struct EncadreurDto {
    pub id: i64,
    pub user_id: i64,
    pub email: String,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub phone: Option<String>,
    pub department: String,
    pub specialization: Option<String>,
    pub account_status: String,
    pub intern_count: u64,
}

impl From<EncadreurProfile> for EncadreurDto {
    fn from(profile: EncadreurProfile) -> Self {
        Self {
            id: profile.encadreur.id,
            user_id: profile.user.id,
            email: profile.user.email,
            nom: profile.user.nom,
            prenom: profile.user.prenom,
            phone: profile.user.phone,
            department: profile.encadreur.department,
            specialization: profile.encadreur.specialization,
            account_status: profile.user.account_status.as_str().to_string(),
            intern_count: profile.intern_count,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEncadreurBody {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 100, message = "department must not be empty"))]
    pub department: Option<String>,
    pub specialization: Option<String>,
}

//! Intern DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::interns::InternProfile;

/// Flattened intern projection (account + internship record)
#[derive(Debug, Serialize, ToSchema)]
pub struct InternDto {
    pub id: i64,
    pub user_id: i64,
    pub email: String,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub phone: Option<String>,
    pub school: Option<String>,
    pub department: Option<String>,
    pub encadreur_id: Option<i64>,
    pub project_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub notes: Option<String>,
    pub account_status: String,
}

impl From<InternProfile> for InternDto {
    fn from(profile: InternProfile) -> Self {
        Self {
            id: profile.intern.id,
            user_id: profile.user.id,
            email: profile.user.email,
            nom: profile.user.nom,
            prenom: profile.user.prenom,
            phone: profile.user.phone,
            school: profile.intern.school,
            department: profile.intern.department,
            encadreur_id: profile.intern.encadreur_id,
            project_id: profile.intern.project_id,
            start_date: profile.intern.start_date,
            end_date: profile.intern.end_date,
            status: profile.intern.status.as_str().to_string(),
            notes: profile.intern.notes,
            account_status: profile.user.account_status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInternBody {
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub phone: Option<String>,
    pub school: Option<String>,
    pub department: Option<String>,
    pub encadreur_id: Option<i64>,
    /// ISO date, e.g. "2025-03-01"
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateInternBody {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub phone: Option<String>,
    pub school: Option<String>,
    pub department: Option<String>,
    pub encadreur_id: Option<i64>,
    /// ISO date, e.g. "2025-03-01"
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// PENDING | ACTIVE | COMPLETED | CANCELLED
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct InternListQuery {
    pub encadreur_id: Option<i64>,
    pub department: Option<String>,
    pub status: Option<String>,
}

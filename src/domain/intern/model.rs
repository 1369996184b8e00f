//! Intern (stagiaire) domain entity

use chrono::{DateTime, NaiveDate, Utc};

/// Progress of an internship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternshipStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl InternshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "ACTIVE" => Some(Self::Active),
            "COMPLETED" => Some(Self::Completed),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for InternshipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intern record, one-to-one with a `User` whose role is STAGIAIRE.
/// Links to at most one supervising encadreur and at most one project.
#[derive(Debug, Clone)]
pub struct Intern {
    pub id: i64,
    pub user_id: i64,
    pub encadreur_id: Option<i64>,
    pub project_id: Option<i64>,
    pub school: Option<String>,
    pub department: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: InternshipStatus,
    pub cv: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for the intern half of a paired (user, intern) insert.
/// The owning user id is filled in by the repository.
#[derive(Debug, Clone)]
pub struct NewInternRecord {
    pub encadreur_id: Option<i64>,
    pub school: Option<String>,
    pub department: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: InternshipStatus,
}

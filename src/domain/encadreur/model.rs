//! Encadreur (supervisor) domain entity

use chrono::{DateTime, Utc};

/// Supervisor record, one-to-one with a `User` whose role is ENCADREUR.
#[derive(Debug, Clone)]
pub struct Encadreur {
    pub id: i64,
    pub user_id: i64,
    pub department: String,
    pub specialization: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for the encadreur half of a paired (user, encadreur) insert.
/// The owning user id is filled in by the repository.
#[derive(Debug, Clone)]
pub struct NewEncadreurRecord {
    pub department: String,
    pub specialization: Option<String>,
}

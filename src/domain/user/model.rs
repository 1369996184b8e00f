//! User domain entity

use chrono::{DateTime, Utc};

/// Role carried by every account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Encadreur,
    Stagiaire,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Encadreur => "ENCADREUR",
            Self::Stagiaire => "STAGIAIRE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ADMIN" => Some(Self::Admin),
            "ENCADREUR" => Some(Self::Encadreur),
            "STAGIAIRE" => Some(Self::Stagiaire),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activation state of an account.
///
/// Accounts created by an administrator start as `Pending` with no
/// password; setting the initial password moves them to `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Active,
    Pending,
    Suspended,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Pending => "PENDING",
            Self::Suspended => "SUSPENDED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(Self::Active),
            "PENDING" => Some(Self::Pending),
            "SUSPENDED" => Some(Self::Suspended),
            _ => None,
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account record. `password_hash` is `None` until the owner has
/// activated the account by choosing a password.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: Option<String>,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub avatar: Option<String>,
    pub role: Role,
    pub account_status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn has_password(&self) -> bool {
        self.password_hash.as_deref().is_some_and(|h| !h.is_empty())
    }
}

/// Fields for inserting a new user row
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: Option<String>,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub role: Role,
    pub account_status: AccountStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trip() {
        for role in [Role::Admin, Role::Encadreur, Role::Stagiaire] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("MANAGER"), None);
    }

    #[test]
    fn empty_hash_counts_as_no_password() {
        let user = User {
            id: 1,
            email: "a@b.c".into(),
            password_hash: Some(String::new()),
            nom: None,
            prenom: None,
            phone: None,
            department: None,
            avatar: None,
            role: Role::Stagiaire,
            account_status: AccountStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(!user.has_password());
    }
}

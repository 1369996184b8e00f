use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("A user with email {0} already exists")]
    DuplicateEmail(String),

    #[error("Account is already activated")]
    AlreadyActivated,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is disabled. Contact an administrator")]
    AccountDisabled,

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Role label that does not name a known role. The REST surface
    /// registers accounts through per-role routes, so this only fires
    /// for transports that carry the role as a free-form string.
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid {field}: {value}")]
    InvalidEnum {
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }
}

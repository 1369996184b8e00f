//! Password hashing
//!
//! Accounts are created without a password; activation and login both
//! funnel through these bcrypt helpers.

use bcrypt::{hash, verify, DEFAULT_COST};

/// Hash a plaintext password with bcrypt at the default cost.
pub fn hash_password(plain: &str) -> Result<String, bcrypt::BcryptError> {
    hash(plain, DEFAULT_COST)
}

/// Check a plaintext password against a stored bcrypt hash.
pub fn verify_password(plain: &str, stored: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(plain, stored)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_the_matching_password_only() {
        let stored = hash_password("S3cret!").unwrap();
        assert!(verify_password("S3cret!", &stored).unwrap());
        assert!(!verify_password("wrong", &stored).unwrap());
    }
}

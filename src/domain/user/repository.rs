//! User repository interface

use async_trait::async_trait;

use super::model::{NewUser, Role, User};
use crate::domain::encadreur::{Encadreur, NewEncadreurRecord};
use crate::domain::intern::{Intern, NewInternRecord};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn exists_by_email(&self, email: &str) -> DomainResult<bool>;
    async fn find_by_role(&self, role: Role) -> DomainResult<Vec<User>>;
    async fn find_all(&self) -> DomainResult<Vec<User>>;

    async fn insert(&self, user: NewUser) -> DomainResult<User>;

    /// Insert a user together with its encadreur record in one transaction.
    async fn insert_with_encadreur(
        &self,
        user: NewUser,
        record: NewEncadreurRecord,
    ) -> DomainResult<(User, Encadreur)>;

    /// Insert a user together with its intern record in one transaction.
    async fn insert_with_intern(
        &self,
        user: NewUser,
        record: NewInternRecord,
    ) -> DomainResult<(User, Intern)>;

    /// Persist every mutable field of an existing row.
    async fn update(&self, user: User) -> DomainResult<User>;

    /// Delete a user row. Role records (encadreur/intern) cascade with it.
    async fn delete(&self, id: i64) -> DomainResult<()>;
}

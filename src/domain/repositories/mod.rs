//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` — unified access to all per-aggregate repositories
//! - `DomainResult` — standard result type for domain operations

use super::encadreur::EncadreurRepository;
use super::intern::InternRepository;
use super::project::ProjectRepository;
use super::task::TaskRepository;
use super::user::UserRepository;

pub use crate::shared::errors::{DomainError, DomainResult};

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let user = repos.users().find_by_email("jane@acme.org").await?;
///     let interns = repos.interns().find_by_encadreur(7).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn encadreurs(&self) -> &dyn EncadreurRepository;
    fn interns(&self) -> &dyn InternRepository;
    fn projects(&self) -> &dyn ProjectRepository;
    fn tasks(&self) -> &dyn TaskRepository;
}

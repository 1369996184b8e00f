//! Project repository interface

use async_trait::async_trait;

use super::model::{NewProject, Project};
use crate::domain::DomainResult;

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Project>>;
    async fn find_all(&self) -> DomainResult<Vec<Project>>;
    async fn find_by_encadreur(&self, encadreur_id: i64) -> DomainResult<Vec<Project>>;

    /// Projects the given intern is assigned to (join through the
    /// intern's project link).
    async fn find_by_intern(&self, intern_id: i64) -> DomainResult<Vec<Project>>;

    async fn insert(&self, project: NewProject) -> DomainResult<Project>;
    async fn update(&self, project: Project) -> DomainResult<Project>;
    async fn delete(&self, id: i64) -> DomainResult<()>;
}

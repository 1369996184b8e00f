//! Intern repository interface

use async_trait::async_trait;

use super::model::{Intern, InternshipStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait InternRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Intern>>;
    async fn find_by_user_id(&self, user_id: i64) -> DomainResult<Option<Intern>>;
    async fn find_by_encadreur(&self, encadreur_id: i64) -> DomainResult<Vec<Intern>>;
    async fn find_by_department(&self, department: &str) -> DomainResult<Vec<Intern>>;
    async fn find_by_project(&self, project_id: i64) -> DomainResult<Vec<Intern>>;
    async fn find_by_status(&self, status: InternshipStatus) -> DomainResult<Vec<Intern>>;
    async fn find_all(&self) -> DomainResult<Vec<Intern>>;
    async fn count(&self) -> DomainResult<u64>;
    async fn update(&self, intern: Intern) -> DomainResult<Intern>;

    /// Move an intern onto a project (or off any project with `None`).
    async fn set_project(&self, intern_id: i64, project_id: Option<i64>) -> DomainResult<()>;
}

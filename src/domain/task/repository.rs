//! Task repository interface

use async_trait::async_trait;

use super::model::{NewTask, Task, TaskStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Task>>;
    async fn find_all(&self) -> DomainResult<Vec<Task>>;
    async fn find_by_project(&self, project_id: i64) -> DomainResult<Vec<Task>>;
    async fn find_by_assignee(&self, user_id: i64) -> DomainResult<Vec<Task>>;
    async fn find_by_status(&self, status: TaskStatus) -> DomainResult<Vec<Task>>;

    async fn insert(&self, task: NewTask) -> DomainResult<Task>;
    async fn update(&self, task: Task) -> DomainResult<Task>;
    async fn delete(&self, id: i64) -> DomainResult<()>;
}

//! Encadreur repository interface

use async_trait::async_trait;

use super::model::Encadreur;
use crate::domain::DomainResult;

#[async_trait]
pub trait EncadreurRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Encadreur>>;
    async fn find_by_user_id(&self, user_id: i64) -> DomainResult<Option<Encadreur>>;
    async fn find_all(&self) -> DomainResult<Vec<Encadreur>>;
    async fn update(&self, encadreur: Encadreur) -> DomainResult<Encadreur>;
}

//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod encadreur_repository;
pub mod intern_repository;
pub mod project_repository;
pub mod repository_provider;
pub mod task_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

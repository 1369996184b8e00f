//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::encadreur::EncadreurRepository;
use crate::domain::intern::InternRepository;
use crate::domain::project::ProjectRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::task::TaskRepository;
use crate::domain::user::UserRepository;

use super::encadreur_repository::SeaOrmEncadreurRepository;
use super::intern_repository::SeaOrmInternRepository;
use super::project_repository::SeaOrmProjectRepository;
use super::task_repository::SeaOrmTaskRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    encadreurs: SeaOrmEncadreurRepository,
    interns: SeaOrmInternRepository,
    projects: SeaOrmProjectRepository,
    tasks: SeaOrmTaskRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            encadreurs: SeaOrmEncadreurRepository::new(db.clone()),
            interns: SeaOrmInternRepository::new(db.clone()),
            projects: SeaOrmProjectRepository::new(db.clone()),
            tasks: SeaOrmTaskRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn encadreurs(&self) -> &dyn EncadreurRepository {
        &self.encadreurs
    }

    fn interns(&self) -> &dyn InternRepository {
        &self.interns
    }

    fn projects(&self) -> &dyn ProjectRepository {
        &self.projects
    }

    fn tasks(&self) -> &dyn TaskRepository {
        &self.tasks
    }
}

//! Core business entities, types and repository traits

pub mod encadreur;
pub mod intern;
pub mod project;
pub mod repositories;
pub mod task;
pub mod user;

pub use encadreur::{Encadreur, EncadreurRepository, NewEncadreurRecord};
pub use intern::{Intern, InternRepository, InternshipStatus, NewInternRecord};
pub use project::{NewProject, Project, ProjectRepository, ProjectStatus};
pub use repositories::{DomainError, DomainResult, RepositoryProvider};
pub use task::{NewTask, Task, TaskPriority, TaskRepository, TaskStatus};
pub use user::{AccountStatus, NewUser, Role, User, UserRepository};

pub mod model;
pub mod repository;

pub use model::{NewProject, Project, ProjectStatus};
pub use repository::ProjectRepository;

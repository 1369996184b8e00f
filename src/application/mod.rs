//! Application layer
//!
//! Services orchestrating domain operations over the repository
//! provider. Each module owns one bounded concern.

pub mod dashboard;
pub mod encadreurs;
pub mod identity;
pub mod interns;
pub mod projects;
pub mod tasks;

pub use dashboard::DashboardService;
pub use encadreurs::EncadreurService;
pub use identity::AuthService;
pub use interns::InternService;
pub use projects::ProjectService;
pub use tasks::TaskService;

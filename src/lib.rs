//! # Internship Management Service
//!
//! Backend for an internship program: identities (admins, encadreurs,
//! interns), projects, tasks, and a role-scoped dashboard.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and repository traits
//! - **application**: Business logic (identity lifecycle, dashboard aggregation, CRUD services)
//! - **infrastructure**: External concerns (SeaORM persistence, crypto, in-memory storage)
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Cross-cutting types (error taxonomy)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::create_api_router;

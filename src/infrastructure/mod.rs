//! Infrastructure layer
//!
//! Concrete adapters behind the domain repository traits: SeaORM persistence,
//! password hashing and JWT issuance, and an in-memory backend for tests.

pub mod crypto;
pub mod database;
pub mod storage;

pub use database::repositories::SeaOrmRepositoryProvider;
pub use database::{init_database, DatabaseConfig};
pub use storage::InMemoryRepositories;

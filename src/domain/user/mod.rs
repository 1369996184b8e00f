//! User aggregate — account identity, role and activation state

pub mod model;
pub mod repository;

pub use model::{AccountStatus, NewUser, Role, User};
pub use repository::UserRepository;

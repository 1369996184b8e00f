//! SeaORM entity definitions

pub mod encadreur;
pub mod intern;
pub mod project;
pub mod task;
pub mod user;

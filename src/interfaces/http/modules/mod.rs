//! HTTP API modules, one per resource

pub mod auth;
pub mod dashboard;
pub mod encadreurs;
pub mod health;
pub mod interns;
pub mod projects;
pub mod tasks;

//! Dashboard module — role-scoped metrics and statistics

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;

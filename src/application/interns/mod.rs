pub mod service;

pub use service::{CreateInternRequest, InternProfile, InternService, UpdateInternRequest};

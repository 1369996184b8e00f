pub mod service;

pub use service::{EncadreurProfile, EncadreurService, UpdateEncadreurRequest};

pub mod service;

pub use service::{
    AuthResult, AuthService, BootstrapAdmin, CreateAdminRequest, CreateEncadreurRequest,
    CreateStagiaireRequest, EmailCheck,
};

pub mod model;
pub mod repository;

pub use model::{Encadreur, NewEncadreurRecord};
pub use repository::EncadreurRepository;

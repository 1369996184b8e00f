pub mod model;
pub mod repository;

pub use model::{Intern, InternshipStatus, NewInternRecord};
pub use repository::InternRepository;

pub mod memory;

pub use memory::InMemoryRepositories;

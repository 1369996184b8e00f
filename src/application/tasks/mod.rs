pub mod service;

pub use service::{CreateTaskRequest, TaskService, UpdateTaskRequest};

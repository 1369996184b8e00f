pub mod model;
pub mod repository;

pub use model::{NewTask, Task, TaskPriority, TaskStatus};
pub use repository::TaskRepository;

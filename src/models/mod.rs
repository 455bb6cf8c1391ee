pub mod task;
pub mod user;

pub use task::{next_task_id, NewTask, NewTaskRequest, Task, TaskStatus, UpdateTaskRequest};
pub use user::{NewUser, User};

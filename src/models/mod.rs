pub mod task;
pub mod user;

pub use task::{ListQuery, Task, TaskPage, TaskRequest, TaskStatus, TaskView};
pub use user::User;

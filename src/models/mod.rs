pub mod task;
pub mod user;

pub use task::{CreateTaskInput, Priority, Task, UpdateTaskInput};
pub use user::{LoginInput, RegisterInput, Role, UpdateUserInput, User};

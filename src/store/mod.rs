//!
//! # Persistence Seam
//!
//! The [`Store`] trait is the single point of concurrency control in the
//! system: both implementations enforce the uniqueness constraints (user
//! email, task title) atomically, so a race between concurrent creates
//! surfaces as `AlreadyExists` from whichever insert lands second.
//!
//! [`postgres::PgStore`] backs production; [`memory::MemoryStore`] backs the
//! test suites and local development.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, User};

#[async_trait]
pub trait Store: Send + Sync {
    /// Persists a new user; fails with `AlreadyExists` if the email is taken.
    async fn insert_user(&self, user: User) -> Result<User, AppError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn list_users(&self) -> Result<Vec<User>, AppError>;
    async fn update_user(&self, user: &User) -> Result<(), AppError>;
    /// Deletes the user and every task they own as one atomic step.
    /// Returns false when no such user exists.
    async fn delete_user_cascade(&self, id: Uuid) -> Result<bool, AppError>;

    /// Persists a new task; fails with `AlreadyExists` if the title is taken.
    async fn insert_task(&self, task: Task) -> Result<Task, AppError>;
    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, AppError>;
    async fn find_task_by_title(&self, title: &str) -> Result<Option<Task>, AppError>;
    async fn list_tasks(&self) -> Result<Vec<Task>, AppError>;
    async fn list_tasks_by_owner(&self, owner: Uuid) -> Result<Vec<Task>, AppError>;
    /// Writes back an updated task; fails with `AlreadyExists` if the new
    /// title collides with another task.
    async fn update_task(&self, task: &Task) -> Result<(), AppError>;
    /// Returns false when no such task exists.
    async fn delete_task(&self, id: Uuid) -> Result<bool, AppError>;
}

pub(crate) fn email_taken(email: &str) -> AppError {
    AppError::AlreadyExists(format!("User with email '{}' already exists", email))
}

pub(crate) fn title_taken(title: &str) -> AppError {
    AppError::AlreadyExists(format!("Task with title '{}' already exists", title))
}

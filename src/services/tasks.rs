use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::ResourceLookup;
use crate::error::AppError;
use crate::models::{CreateTaskInput, Task, UpdateTaskInput};
use crate::store::{self, Store};

/// Orchestrates task operations: title uniqueness, existence checks, and
/// partial updates. Owner assignment happens at creation and is immutable.
pub struct TaskService {
    store: Arc<dyn Store>,
}

impl TaskService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Creates a task owned by `owner` (the authenticated caller).
    /// Fails with 409 when the title is already taken.
    pub async fn create_task(&self, input: CreateTaskInput, owner: Uuid) -> Result<Task, AppError> {
        if self.store.find_task_by_title(&input.title).await?.is_some() {
            return Err(store::title_taken(&input.title));
        }
        self.store.insert_task(Task::new(input, owner)).await
    }

    pub async fn find_task_by_id(&self, id: Uuid) -> Result<Task, AppError> {
        self.store
            .find_task(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task with ID '{}' not found", id)))
    }

    pub async fn find_all_tasks(&self) -> Result<Vec<Task>, AppError> {
        self.store.list_tasks().await
    }

    pub async fn find_tasks_by_owner(&self, owner: Uuid) -> Result<Vec<Task>, AppError> {
        self.store.list_tasks_by_owner(owner).await
    }

    /// Applies a partial update. Existence is re-checked before the write.
    pub async fn update_task(&self, id: Uuid, input: UpdateTaskInput) -> Result<Task, AppError> {
        let mut task = self.find_task_by_id(id).await?;

        if let Some(title) = input.title {
            task.title = title;
        }
        if let Some(description) = input.description {
            task.description = description;
        }
        if let Some(completed) = input.completed {
            task.completed = completed;
        }
        if let Some(priority) = input.priority {
            task.priority = priority;
        }
        task.updated_at = Utc::now();

        self.store.update_task(&task).await?;
        Ok(task)
    }

    /// Deletes a task; existence is re-checked first so an unknown id is 404.
    pub async fn delete_task(&self, id: Uuid) -> Result<bool, AppError> {
        self.find_task_by_id(id).await?;
        self.store.delete_task(id).await
    }
}

#[async_trait]
impl ResourceLookup for TaskService {
    type Resource = Task;

    async fn find_by_id(&self, id: Uuid) -> Result<Task, AppError> {
        self.find_task_by_id(id).await
    }

    fn owner_id(resource: &Task) -> Uuid {
        resource.owner
    }
}

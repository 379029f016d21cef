use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Represents the priority of a task.
/// Corresponds to the `task_priority` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Clone, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    /// The title of the task, unique across all tasks.
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
    /// Identifier of the user who owns the task. Set at creation from the
    /// authenticated caller and never changed afterwards.
    pub owner: Uuid,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Task` from validated input and the owner's id.
    /// `completed` defaults to false and `priority` to medium.
    pub fn new(input: CreateTaskInput, owner: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            completed: input.completed.unwrap_or(false),
            priority: input.priority.unwrap_or(Priority::Medium),
            owner,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated payload for `POST /tasks`.
#[derive(Debug, Deserialize)]
pub struct CreateTaskInput {
    pub title: String,
    pub description: String,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
}

/// Validated payload for `PATCH /tasks/{id}`. Any subset of fields.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateTaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation_defaults() {
        let owner = Uuid::new_v4();
        let input = CreateTaskInput {
            title: "Write report".to_string(),
            description: "Quarterly summary".to_string(),
            completed: None,
            priority: None,
        };

        let task = Task::new(input, owner);
        assert_eq!(task.title, "Write report");
        assert_eq!(task.owner, owner);
        assert!(!task.completed);
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn test_task_creation_with_explicit_fields() {
        let input = CreateTaskInput {
            title: "Ship release".to_string(),
            description: "Tag and publish".to_string(),
            completed: Some(true),
            priority: Some(Priority::High),
        };

        let task = Task::new(input, Uuid::new_v4());
        assert!(task.completed);
        assert_eq!(task.priority, Priority::High);
    }

    #[test]
    fn test_task_serializes_camel_case() {
        let task = Task::new(
            CreateTaskInput {
                title: "t".repeat(3),
                description: "d".repeat(3),
                completed: None,
                priority: None,
            },
            Uuid::new_v4(),
        );
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["priority"], "medium");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("owner").is_some());
    }
}

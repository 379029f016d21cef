use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{email_taken, title_taken, Store};
use crate::error::AppError;
use crate::models::{Task, User};

#[derive(Debug, Default)]
struct State {
    users: HashMap<Uuid, User>,
    tasks: HashMap<Uuid, Task>,
}

/// In-memory store backed by a single `RwLock`.
///
/// Intended for tests/dev. Uniqueness checks and the user-delete cascade run
/// under one write lock, giving the same atomicity the SQL constraints and
/// transaction provide in production.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: User) -> Result<User, AppError> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.email == user.email) {
            return Err(email_taken(&user.email));
        }
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let mut users: Vec<User> = self.state.read().await.users.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn update_user(&self, user: &User) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        match state.users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(format!(
                "User with ID '{}' not found",
                user.id
            ))),
        }
    }

    async fn delete_user_cascade(&self, id: Uuid) -> Result<bool, AppError> {
        let mut state = self.state.write().await;
        if state.users.remove(&id).is_none() {
            return Ok(false);
        }
        state.tasks.retain(|_, task| task.owner != id);
        Ok(true)
    }

    async fn insert_task(&self, task: Task) -> Result<Task, AppError> {
        let mut state = self.state.write().await;
        if state.tasks.values().any(|t| t.title == task.title) {
            return Err(title_taken(&task.title));
        }
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        Ok(self.state.read().await.tasks.get(&id).cloned())
    }

    async fn find_task_by_title(&self, title: &str) -> Result<Option<Task>, AppError> {
        let state = self.state.read().await;
        Ok(state.tasks.values().find(|t| t.title == title).cloned())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        let mut tasks: Vec<Task> = self.state.read().await.tasks.values().cloned().collect();
        tasks.sort_by_key(|t| t.created_at);
        Ok(tasks)
    }

    async fn list_tasks_by_owner(&self, owner: Uuid) -> Result<Vec<Task>, AppError> {
        let state = self.state.read().await;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|t| t.owner == owner)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.created_at);
        Ok(tasks)
    }

    async fn update_task(&self, task: &Task) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        if state
            .tasks
            .values()
            .any(|t| t.id != task.id && t.title == task.title)
        {
            return Err(title_taken(&task.title));
        }
        match state.tasks.get_mut(&task.id) {
            Some(existing) => {
                *existing = task.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(format!(
                "Task with ID '{}' not found",
                task.id
            ))),
        }
    }

    async fn delete_task(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.state.write().await.tasks.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateTaskInput, RegisterInput, Role};

    fn user(email: &str) -> User {
        User::new(
            RegisterInput {
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                email: email.to_string(),
                password: "irrelevant".to_string(),
                role: Role::User,
            },
            "digest".to_string(),
        )
    }

    fn task(title: &str, owner: Uuid) -> Task {
        Task::new(
            CreateTaskInput {
                title: title.to_string(),
                description: "a description".to_string(),
                completed: None,
                priority: None,
            },
            owner,
        )
    }

    #[actix_rt::test]
    async fn test_duplicate_email_is_rejected_and_first_record_kept() {
        let store = MemoryStore::new();
        let first = store.insert_user(user("dup@example.com")).await.unwrap();

        let err = store.insert_user(user("dup@example.com")).await.unwrap_err();
        match err {
            AppError::AlreadyExists(msg) => {
                assert_eq!(msg, "User with email 'dup@example.com' already exists")
            }
            other => panic!("expected conflict, got {:?}", other),
        }

        let kept = store.find_user(first.id).await.unwrap().unwrap();
        assert_eq!(kept.created_at, first.created_at);
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[actix_rt::test]
    async fn test_duplicate_title_is_rejected() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        store.insert_task(task("unique title", owner)).await.unwrap();

        let err = store.insert_task(task("unique title", owner)).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)));
    }

    #[actix_rt::test]
    async fn test_update_task_rejects_title_collision_with_other_task() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        store.insert_task(task("first", owner)).await.unwrap();
        let mut second = store.insert_task(task("second", owner)).await.unwrap();

        second.title = "first".to_string();
        let err = store.update_task(&second).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)));

        // Re-saving a task under its own title is not a collision.
        let mut first = store.find_task_by_title("first").await.unwrap().unwrap();
        first.completed = true;
        store.update_task(&first).await.unwrap();
    }

    #[actix_rt::test]
    async fn test_delete_user_cascades_tasks() {
        let store = MemoryStore::new();
        let owner = store.insert_user(user("owner@example.com")).await.unwrap();
        let other = store.insert_user(user("other@example.com")).await.unwrap();
        store.insert_task(task("owned one", owner.id)).await.unwrap();
        store.insert_task(task("owned two", owner.id)).await.unwrap();
        let kept = store.insert_task(task("kept", other.id)).await.unwrap();

        assert!(store.delete_user_cascade(owner.id).await.unwrap());

        assert!(store.list_tasks_by_owner(owner.id).await.unwrap().is_empty());
        let remaining = store.list_tasks().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept.id);
    }

    #[actix_rt::test]
    async fn test_listings_are_in_creation_order() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        for title in ["first", "second", "third"] {
            store.insert_task(task(title, owner)).await.unwrap();
        }

        let titles: Vec<String> = store
            .list_tasks()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[actix_rt::test]
    async fn test_delete_missing_user_returns_false() {
        let store = MemoryStore::new();
        assert!(!store.delete_user_cascade(Uuid::new_v4()).await.unwrap());
        assert!(!store.delete_task(Uuid::new_v4()).await.unwrap());
    }
}

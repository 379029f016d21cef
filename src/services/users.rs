use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::{generate_token, hash_password, verify_password, ResourceLookup, TokenResponse};
use crate::error::AppError;
use crate::models::{LoginInput, RegisterInput, UpdateUserInput, User};
use crate::store::{self, Store};

/// Orchestrates user operations: duplicate and existence checks, password
/// hashing, token issuance, and the delete-user cascade.
pub struct UserService {
    store: Arc<dyn Store>,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Creates a user from validated registration input.
    /// Fails with 409 when the email is already registered.
    pub async fn register(&self, input: RegisterInput) -> Result<User, AppError> {
        if self.store.find_user_by_email(&input.email).await?.is_some() {
            return Err(store::email_taken(&input.email));
        }

        let digest = hash_password(&input.password)?;
        self.store.insert_user(User::new(input, digest)).await
    }

    /// Verifies credentials and issues a bearer token carrying the user's
    /// id and role. An unknown email is 404; a wrong password is 401.
    pub async fn login(&self, input: LoginInput) -> Result<TokenResponse, AppError> {
        let user = self
            .store
            .find_user_by_email(&input.email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        if !verify_password(&input.password, &user.password)? {
            return Err(AppError::Unauthorized("Invalid credentials".into()));
        }

        let token = generate_token(user.id, user.role)?;
        Ok(TokenResponse { token })
    }

    pub async fn find_user_by_id(&self, id: Uuid) -> Result<User, AppError> {
        self.store
            .find_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with ID '{}' not found", id)))
    }

    pub async fn find_users(&self) -> Result<Vec<User>, AppError> {
        self.store.list_users().await
    }

    /// Applies a partial update. Existence is re-checked before the write;
    /// a password in the update is re-hashed before it is stored.
    pub async fn update_user(&self, id: Uuid, input: UpdateUserInput) -> Result<User, AppError> {
        let mut user = self.find_user_by_id(id).await?;

        if let Some(first_name) = input.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = input.last_name {
            user.last_name = last_name;
        }
        if let Some(password) = input.password {
            user.password = hash_password(&password)?;
        }
        user.updated_at = Utc::now();

        self.store.update_user(&user).await?;
        Ok(user)
    }

    /// Deletes the user and, as an explicit cascade step, every task they
    /// own. Existence is re-checked first so an unknown id is a 404.
    pub async fn delete_user(&self, id: Uuid) -> Result<bool, AppError> {
        self.find_user_by_id(id).await?;
        self.store.delete_user_cascade(id).await
    }
}

/// A user record "owns" itself: the ownership gate on `/users/{id}` routes
/// lets a user through to their own record only.
#[async_trait]
impl ResourceLookup for UserService {
    type Resource = User;

    async fn find_by_id(&self, id: Uuid) -> Result<User, AppError> {
        self.find_user_by_id(id).await
    }

    fn owner_id(resource: &User) -> Uuid {
        resource.id
    }
}

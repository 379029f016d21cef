use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Role of a user account.
/// Corresponds to the `user_role` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account; may only touch resources it owns.
    User,
    /// Administrative account; bypasses ownership checks.
    Admin,
}

/// Represents a user entity as stored in the database.
///
/// `password` holds the bcrypt digest and is never serialized: every output
/// representation of a user omits it.
#[derive(Debug, Serialize, Clone, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier for the user (UUID v4).
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Email address, unique across all users.
    pub email: String,
    /// One-way password digest. Skipped on serialization.
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
    /// Timestamp of when the user was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the user.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new `User` from validated registration input and an
    /// already-hashed password. `id` is a fresh UUID; timestamps are now.
    pub fn new(input: RegisterInput, password_digest: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password: password_digest,
            role: input.role,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated payload for `POST /users/register`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Validated payload for `POST /users/login`.
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Validated payload for `PATCH /users/{id}`. All fields optional; only the
/// ones present are applied. Email and role are not updatable.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

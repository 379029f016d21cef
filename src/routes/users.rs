use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use serde_json::Value;

use crate::{
    auth::{authorize_owner, require_role, Identity},
    error::AppError,
    models::{LoginInput, RegisterInput, Role, UpdateUserInput},
    services::AppState,
    validation,
};

/// Register a new user
///
/// Public route: creates a regular account (role is restricted to `user`)
/// and returns the created user without its password digest.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    let input: RegisterInput = validation::validate_into(&body, &validation::REGISTER)?;
    let user = state.users.register(input).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Login
///
/// Public route: verifies credentials and returns a bearer token carrying
/// the user's id and role.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    let input: LoginInput = validation::validate_into(&body, &validation::LOGIN)?;
    let response = state.users.login(input).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// List all users. Admin only.
#[get("")]
pub async fn find_users(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<impl Responder, AppError> {
    require_role(Some(&identity), &[Role::Admin])?;
    let users = state.users.find_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

/// The authenticated caller's own profile.
#[get("/profile")]
pub async fn get_profile(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<impl Responder, AppError> {
    let user = state.users.find_user_by_id(identity.id).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Tasks owned by the authenticated caller.
#[get("/profile/tasks")]
pub async fn get_profile_tasks(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<impl Responder, AppError> {
    let tasks = state.tasks.find_tasks_by_owner(identity.id).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Fetch one user by id. Ownership-gated: the user themselves or an admin.
#[get("/{id}")]
pub async fn find_user_by_id(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = validation::parse_id(&path)?;
    let user = authorize_owner(&identity, &state.users, id).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Tasks owned by an arbitrary user. Admin only.
#[get("/{id}/tasks")]
pub async fn get_user_tasks(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    require_role(Some(&identity), &[Role::Admin])?;
    let id = validation::parse_id(&path)?;
    let tasks = state.tasks.find_tasks_by_owner(id).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Partially update a user. Ownership-gated; a supplied password is
/// re-hashed before storage. Body validation runs after the gates, so a
/// non-owner sees 403 even with an invalid body.
#[patch("/{id}")]
pub async fn update_user(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    let id = validation::parse_id(&path)?;
    authorize_owner(&identity, &state.users, id).await?;
    let input: UpdateUserInput = validation::validate_into(&body, &validation::UPDATE_USER)?;
    let user = state.users.update_user(id, input).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Delete a user and cascade-delete their tasks. Ownership-gated.
#[delete("/{id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = validation::parse_id(&path)?;
    authorize_owner(&identity, &state.users, id).await?;
    let deleted = state.users.delete_user(id).await?;
    Ok(HttpResponse::Ok().json(deleted))
}

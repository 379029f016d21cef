use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use serde_json::Value;

use crate::{
    auth::{authorize_owner, require_role, Identity},
    error::AppError,
    models::{CreateTaskInput, Role, UpdateTaskInput},
    services::AppState,
    validation,
};

/// Create a task owned by the authenticated caller.
///
/// Fails with 409 when the title is already taken (titles are globally
/// unique).
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    let input: CreateTaskInput = validation::validate_into(&body, &validation::CREATE_TASK)?;
    let task = state.tasks.create_task(input, identity.id).await?;
    Ok(HttpResponse::Created().json(task))
}

/// List every task in the system. Admin only.
#[get("")]
pub async fn find_all_tasks(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<impl Responder, AppError> {
    require_role(Some(&identity), &[Role::Admin])?;
    let tasks = state.tasks.find_all_tasks().await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Fetch one task by id. Ownership-gated: the owner or an admin.
#[get("/{id}")]
pub async fn find_task_by_id(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = validation::parse_id(&path)?;
    let task = authorize_owner(&identity, &state.tasks, id).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Partially update a task. Ownership-gated; any subset of fields.
#[patch("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<impl Responder, AppError> {
    let id = validation::parse_id(&path)?;
    authorize_owner(&identity, &state.tasks, id).await?;
    let input: UpdateTaskInput = validation::validate_into(&body, &validation::UPDATE_TASK)?;
    let task = state.tasks.update_task(id, input).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Delete a task. Ownership-gated.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = validation::parse_id(&path)?;
    authorize_owner(&identity, &state.tasks, id).await?;
    let deleted = state.tasks.delete_task(id).await?;
    Ok(HttpResponse::Ok().json(deleted))
}

//! Shared setup for the integration suites: an app instance over a fresh
//! in-memory store per test, plus request helpers.

#![allow(dead_code)] // each test binary uses its own subset of helpers

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::{test, web, App, Error};
use serde_json::{json, Value};
use uuid::Uuid;

use taskvault::auth::generate_token;
use taskvault::models::{RegisterInput, Role};
use taskvault::routes;
use taskvault::services::AppState;
use taskvault::store::memory::MemoryStore;

pub const PASSWORD: &str = "Password123!";

/// Environment every suite relies on. Setting the same values repeatedly is
/// harmless, so each test calls this through [`state`].
fn init_env() {
    std::env::set_var("JWT_SECRET", "integration-test-secret");
    // Keep hashing fast in tests; production uses the slow default.
    std::env::set_var("BCRYPT_COST", "4");
}

/// Fresh application state over an empty in-memory store.
pub fn state() -> web::Data<AppState> {
    init_env();
    web::Data::new(AppState::new(Arc::new(MemoryStore::new())))
}

/// Builds the `/api/v1` app the server exposes, minus the outer
/// logging/CORS wrappers, over the given state.
pub async fn spawn_app(
    state: web::Data<AppState>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .app_data(state)
            .service(web::scope("/api/v1").configure(routes::config)),
    )
    .await
}

pub async fn read_json(resp: ServiceResponse<BoxBody>) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).unwrap_or_else(|e| {
        panic!("response body was not JSON: {} ({:?})", e, body);
    })
}

/// Registers a regular user and returns the created representation.
pub async fn register_user<S>(app: &S, first_name: &str, email: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/users/register")
        .set_json(json!({
            "firstName": first_name,
            "lastName": "Tester",
            "email": email,
            "password": PASSWORD,
            "role": "user"
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = read_json(resp).await;
    assert_eq!(status.as_u16(), 201, "registration failed: {}", body);
    body
}

/// Logs a user in and returns the bearer token.
pub async fn login_user<S>(app: &S, email: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = read_json(resp).await;
    assert_eq!(status.as_u16(), 200, "login failed: {}", body);
    body["token"].as_str().expect("token missing").to_string()
}

/// Registers a user and logs them in; returns `(id, token)`.
pub async fn register_and_login<S>(app: &S, first_name: &str, email: &str) -> (Uuid, String)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let user = register_user(app, first_name, email).await;
    let id = Uuid::parse_str(user["id"].as_str().unwrap()).unwrap();
    let token = login_user(app, email, PASSWORD).await;
    (id, token)
}

/// Seeds an admin directly through the service layer, mirroring the
/// `generate-admin` CLI (the public API cannot create admins), and returns
/// `(id, token)`.
pub async fn seed_admin(state: &web::Data<AppState>, email: &str) -> (Uuid, String) {
    let admin = state
        .users
        .register(RegisterInput {
            first_name: "Admin".to_string(),
            last_name: "Account".to_string(),
            email: email.to_string(),
            password: PASSWORD.to_string(),
            role: Role::Admin,
        })
        .await
        .expect("admin seeding failed");
    let token = generate_token(admin.id, Role::Admin).expect("token generation failed");
    (admin.id, token)
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{Error as ActixError, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::auth::token::verify_token;
use crate::error::AppError;
use crate::models::Role;

/// Message returned when no bearer token accompanies the request.
pub const MISSING_TOKEN: &str = "Unauthorized. Please provide a token";

/// The verified identity of the caller: the authentication gate.
///
/// Declaring an `Identity` parameter on a handler makes the route
/// authenticated: the extractor reads the `Authorization: Bearer <token>`
/// header and verifies the token, so the handler only ever runs with a
/// valid `{id, role}` in hand. A missing header short-circuits with 401
/// ([`MISSING_TOKEN`]); a present but invalid or expired token
/// short-circuits with 401 ([`crate::auth::token::INVALID_TOKEN`]).
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub id: Uuid,
    pub role: Role,
}

fn identity_from_request(req: &HttpRequest) -> Result<Identity, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized(MISSING_TOKEN.into()))?;

    let claims = verify_token(token)?;
    Ok(Identity {
        id: claims.sub,
        role: claims.role,
    })
}

impl FromRequest for Identity {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_request(req).map_err(Into::into))
    }
}

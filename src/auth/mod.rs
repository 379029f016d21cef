//!
//! # Authentication & Authorization
//!
//! The request-authorization pipeline, split into three composable gates
//! applied in fixed order per route:
//!
//! 1. the authentication gate, the [`Identity`] extractor in
//!    [`extractors`]: bearer token to verified `{id, role}`;
//! 2. the role gate, [`require_role`] in [`authorize`]: an allow-list of
//!    roles;
//! 3. the ownership gate, [`authorize_owner`] in [`authorize`]: generic
//!    over a [`ResourceLookup`] capability, passes for the owner or an
//!    admin.
//!
//! Each gate either returns a continuation value (the identity, the fetched
//! resource) or a terminal `AppError`; failure is terminal for the request.
//! [`password`] and [`token`] hold the credential primitives the gates and
//! the login flow rely on.

pub mod authorize;
pub mod extractors;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};

pub use authorize::{authorize_owner, require_role, ResourceLookup};
pub use extractors::Identity;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

/// Response body of a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed bearer token for subsequent requests.
    pub token: String,
}

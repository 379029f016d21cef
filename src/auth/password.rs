use crate::error::AppError;
use bcrypt::{hash, verify};

/// Default bcrypt work factor. Deliberately slow; override with the
/// `BCRYPT_COST` environment variable (tests use a low cost).
const DEFAULT_WORK_FACTOR: u32 = 10;

fn work_factor() -> u32 {
    std::env::var("BCRYPT_COST")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_WORK_FACTOR)
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, work_factor())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Checks a plaintext password against a stored digest. A mismatch returns
/// `Ok(false)`, never an error; only a malformed digest is an error.
pub fn verify_password(password: &str, digest: &str) -> Result<bool, AppError> {
    verify(password, digest)
        .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
}

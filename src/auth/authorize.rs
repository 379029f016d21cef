use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::extractors::Identity;
use crate::error::AppError;
use crate::models::Role;

/// Message returned whenever the role or ownership gate denies a request.
pub const ACCESS_DENIED: &str =
    "Access denied. You do not have permission to access this resource.";

/// Role gate: passes when the caller's role is in the allow-list.
///
/// Runs behind the authentication gate, so a missing identity is reported as
/// a denial rather than as unauthenticated; the gate never assumes upstream
/// composition actually happened.
pub fn require_role(identity: Option<&Identity>, allowed: &[Role]) -> Result<(), AppError> {
    match identity {
        Some(identity) if allowed.contains(&identity.role) => Ok(()),
        _ => Err(AppError::AccessDenied(ACCESS_DENIED.into())),
    }
}

/// The lookup capability the ownership gate is generic over: how to fetch a
/// resource by id and who owns the fetched resource.
#[async_trait]
pub trait ResourceLookup: Send + Sync {
    type Resource: Send;

    /// Fetches the resource, failing with `NotFound` if it does not exist.
    async fn find_by_id(&self, id: Uuid) -> Result<Self::Resource, AppError>;

    /// The id of the user owning `resource`.
    fn owner_id(resource: &Self::Resource) -> Uuid;
}

/// Ownership gate: fetches the target resource and passes when the caller
/// owns it or is an admin, yielding the fetched resource to the handler.
///
/// The fetch happens first, so a nonexistent resource is always a 404 and
/// never a 403.
pub async fn authorize_owner<L: ResourceLookup>(
    identity: &Identity,
    lookup: &L,
    resource_id: Uuid,
) -> Result<L::Resource, AppError> {
    let resource = lookup.find_by_id(resource_id).await?;

    if identity.id == L::owner_id(&resource) || identity.role == Role::Admin {
        Ok(resource)
    } else {
        Err(AppError::AccessDenied(ACCESS_DENIED.into()))
    }
}

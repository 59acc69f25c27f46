pub mod clients;
pub mod products;
pub mod pumps;
pub mod reports;
pub mod stations;
pub mod transactions;

use tats_auth_types::identity::IdentityHeaders;
use tats_domain::user::UserRole;

use crate::error::StationServiceError;

/// Reads are open to any authenticated user; every mutation goes through here.
pub(crate) fn require_admin(identity: &IdentityHeaders) -> Result<(), StationServiceError> {
    match UserRole::from_u8(identity.user_role) {
        Some(role) if role.is_admin() => Ok(()),
        _ => Err(StationServiceError::Forbidden),
    }
}

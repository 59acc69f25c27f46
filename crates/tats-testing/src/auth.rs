//! Mock auth helpers for integration tests.
//!
//! Services behind the gateway receive `x-tats-user-id` + `x-tats-user-role`
//! headers injected by the gateway. In tests, `MockAuth` builds those headers
//! directly so no real gateway or JWT is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub user_role: u8,
}

impl MockAuth {
    pub fn new(user_id: Uuid, user_role: u8) -> Self {
        Self { user_id, user_role }
    }

    /// A fresh admin identity.
    pub fn admin() -> Self {
        Self::new(Uuid::new_v4(), 1)
    }

    /// A fresh normal (read-only) identity.
    pub fn normal() -> Self {
        Self::new(Uuid::new_v4(), 0)
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static("x-tats-user-id"),
            HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
        );
        map.insert(
            HeaderName::from_static("x-tats-user-role"),
            HeaderValue::from_str(&self.user_role.to_string()).unwrap(),
        );
        map
    }
}

//! Mock identity helpers for integration tests.
//!
//! The service sits behind a gateway that injects `x-foodgram-user-id` and
//! `x-foodgram-user-role`. Tests attach these headers directly, so no real
//! gateway or credentials are needed.

use http::{HeaderMap, HeaderName, HeaderValue};

use foodgram_auth_types::identity::{USER_ID_HEADER, USER_ROLE_HEADER};
use foodgram_domain::user::UserRole;

/// Identity attached to test requests.
#[derive(Debug, Clone, Copy)]
pub struct MockAuth {
    pub user_id: i32,
    pub user_role: UserRole,
}

impl MockAuth {
    pub fn user(user_id: i32) -> Self {
        Self {
            user_id,
            user_role: UserRole::Normal,
        }
    }

    pub fn admin(user_id: i32) -> Self {
        Self {
            user_id,
            user_role: UserRole::Admin,
        }
    }

    /// `(name, value)` for the user-id header.
    pub fn user_id_header(&self) -> (HeaderName, HeaderValue) {
        (
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from(self.user_id),
        )
    }

    /// `(name, value)` for the role header.
    pub fn role_header(&self) -> (HeaderName, HeaderValue) {
        (
            HeaderName::from_static(USER_ROLE_HEADER),
            HeaderValue::from(u16::from(self.user_role.as_u8())),
        )
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        let (name, value) = self.user_id_header();
        map.insert(name, value);
        let (name, value) = self.role_header();
        map.insert(name, value);
        map
    }
}

//! Gateway-injected identity headers extractor.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use http::StatusCode;
use http::request::Parts;

use foodgram_domain::user::UserRole;

pub const USER_ID_HEADER: &str = "x-foodgram-user-id";
pub const USER_ROLE_HEADER: &str = "x-foodgram-user-role";

/// User identity injected by the gateway via `x-foodgram-user-id` and
/// `x-foodgram-user-role` headers.
///
/// As a plain extractor it returns 401 when the user id is absent or invalid.
/// As `Option<IdentityHeaders>` it yields `None` for anonymous requests and
/// still rejects malformed headers with 401. A missing role header means
/// [`UserRole::Normal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityHeaders {
    pub user_id: i32,
    pub user_role: UserRole,
}

impl IdentityHeaders {
    pub fn is_admin(&self) -> bool {
        self.user_role >= UserRole::Admin
    }
}

/// Parse both headers. `Ok(None)` means no identity was supplied at all.
fn parse_identity(parts: &Parts) -> Result<Option<IdentityHeaders>, StatusCode> {
    let Some(raw_id) = parts.headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };
    let user_id = raw_id
        .to_str()
        .ok()
        .and_then(|s| s.parse::<i32>().ok())
        .filter(|id| *id > 0)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let user_role = match parts.headers.get(USER_ROLE_HEADER) {
        None => UserRole::Normal,
        Some(raw_role) => raw_role
            .to_str()
            .ok()
            .and_then(|s| s.parse::<u8>().ok())
            .and_then(UserRole::from_u8)
            .ok_or(StatusCode::UNAUTHORIZED)?,
    };

    Ok(Some(IdentityHeaders { user_id, user_role }))
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Parse synchronously and return a 'static future; an `async fn` here would
    // capture the `parts` lifetime and fail to match the trait signature.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = parse_identity(parts);
        async move {
            match identity {
                Ok(Some(identity)) => Ok(identity),
                Ok(None) => {
                    tracing::debug!("request without identity headers");
                    Err(StatusCode::UNAUTHORIZED)
                }
                Err(status) => Err(status),
            }
        }
    }
}

impl<S> OptionalFromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let identity = parse_identity(parts);
        async move { identity }
    }
}

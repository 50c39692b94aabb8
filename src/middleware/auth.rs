use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::UserSnapshot;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{Store, User};

/// Authenticated caller context extracted from the access token
#[derive(Clone, Debug)]
pub struct AuthUser {
    snapshot: UserSnapshot,
}

impl AuthUser {
    pub fn new(snapshot: UserSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn user_id(&self) -> Uuid {
        self.snapshot.id
    }

    /// The identity exactly as the token recorded it at issuance.
    ///
    /// May be stale: the account could have changed or vanished since. Use
    /// [`reverified`](Self::reverified) when the handler needs the live
    /// record.
    pub fn trusted(&self) -> &UserSnapshot {
        &self.snapshot
    }

    /// Looks the account up again, returning the current record or `None`
    /// when the id no longer resolves.
    pub async fn reverified(&self, store: &dyn Store) -> Result<Option<User>, ApiError> {
        Ok(store.user_by_id(self.snapshot.id).await?)
    }
}

/// Token authentication middleware guarding every protected route.
///
/// A request without a token is turned away before any handler logic runs;
/// a request with a bad token learns only that the token failed, not why.
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token =
        bearer_token(&headers).ok_or_else(|| ApiError::unauthorized("No token provided"))?;

    let claims = state.codec.verify(token)?;

    request.extensions_mut().insert(AuthUser::new(claims.user));

    Ok(next.run(request).await)
}

/// Extract the credential from an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn extracts_token_after_bearer_scheme() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn missing_header_yields_none() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn bare_scheme_yields_none() {
        assert_eq!(bearer_token(&headers_with("Bearer ")), None);
        assert_eq!(bearer_token(&headers_with("Bearer")), None);
    }

    #[test]
    fn foreign_scheme_yields_none() {
        assert_eq!(bearer_token(&headers_with("Basic dXNlcjpwdw==")), None);
    }
}

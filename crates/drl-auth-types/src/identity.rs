//! Session cookie extractor.

use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use http::request::Parts;

use crate::cookie::DRL_SESSION;
use crate::token::validate_session_token;

/// Where unauthenticated browsers are sent.
pub const LOGIN_PATH: &str = "/login";

/// Access to the key that signs session tokens. Implemented by the service state.
pub trait SessionKey {
    fn session_secret(&self) -> &str;
}

/// Account id taken from a valid `drl_session` cookie.
///
/// Redirects to [`LOGIN_PATH`] if the cookie is absent, expired, or forged.
/// Role enforcement is done by use cases after the account is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: i32,
}

/// Rejection for [`SessionIdentity`]: a redirect to the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRejection;

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        Redirect::to(LOGIN_PATH).into_response()
    }
}

impl<S> FromRequestParts<S> for SessionIdentity
where
    S: SessionKey + Send + Sync,
{
    type Rejection = SessionRejection;

    // axum-core 0.5 defines this as `fn -> impl Future + Send`. Extract
    // synchronously and return a 'static async block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let jar = CookieJar::from_headers(&parts.headers);
        let info = jar
            .get(DRL_SESSION)
            .map(|c| validate_session_token(c.value(), state.session_secret()));

        async move {
            match info {
                Some(Ok(info)) => Ok(Self {
                    user_id: info.user_id,
                }),
                Some(Err(e)) => {
                    tracing::debug!(error = %e, "rejected session cookie");
                    Err(SessionRejection)
                }
                None => Err(SessionRejection),
            }
        }
    }
}

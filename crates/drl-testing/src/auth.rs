//! Mock session helpers for HTTP tests.
//!
//! Protected routes read the account id from the `drl_session` cookie.
//! `MockSession` signs that cookie directly so tests need no login round-trip.

use drl_auth_types::cookie::DRL_SESSION;
use drl_auth_types::token::issue_session_token;
use http::{HeaderName, HeaderValue, header};

/// Signing secret shared by test routers and `MockSession`.
pub const TEST_SESSION_SECRET: &str = "test-session-secret-for-tests-only";

/// Configurable session injected into test requests.
pub struct MockSession {
    pub user_id: i32,
    pub secret: String,
}

impl MockSession {
    pub fn new(user_id: i32) -> Self {
        Self {
            user_id,
            secret: TEST_SESSION_SECRET.to_owned(),
        }
    }

    pub fn with_secret(user_id: i32, secret: &str) -> Self {
        Self {
            user_id,
            secret: secret.to_owned(),
        }
    }

    /// `Cookie` header as a browser would send it after logging in.
    pub fn cookie_header(&self) -> (HeaderName, HeaderValue) {
        let token = issue_session_token(self.user_id, 3600, &self.secret)
            .expect("sign test session token");
        let value = HeaderValue::from_str(&format!("{DRL_SESSION}={token}"))
            .expect("session cookie is a valid header value");
        (header::COOKIE, value)
    }
}

//! Cookie builders for the session token.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the session token.
pub const DRL_SESSION: &str = "drl_session";

/// Default session lifetime in seconds (7 days).
pub const SESSION_TTL: u64 = 604800;

/// Set the session cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use drl_auth_types::cookie::{set_session_cookie, DRL_SESSION};
///
/// let jar = set_session_cookie(CookieJar::new(), "token".to_string(), 3600, true);
/// let cookie = jar.get(DRL_SESSION).unwrap();
/// assert_eq!(cookie.value(), "token");
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(3600)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(jar: CookieJar, value: String, max_age_secs: u64, secure: bool) -> CookieJar {
    let max_age = i64::try_from(max_age_secs).unwrap_or(i64::MAX);
    let cookie = Cookie::build((DRL_SESSION, value))
        .path("/")
        .max_age(Duration::seconds(max_age))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear the session cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use drl_auth_types::cookie::{clear_session_cookie, set_session_cookie, DRL_SESSION};
///
/// let jar = set_session_cookie(CookieJar::new(), "token".to_string(), 3600, false);
/// let jar = clear_session_cookie(jar, false);
/// let cookie = jar.get(DRL_SESSION).unwrap();
/// assert_eq!(cookie.value(), "");
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_session_cookie(jar: CookieJar, secure: bool) -> CookieJar {
    let cookie = Cookie::build((DRL_SESSION, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

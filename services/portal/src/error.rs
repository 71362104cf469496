use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};

use drl_auth_types::identity::LOGIN_PATH;

/// Portal domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("not signed in")]
    Unauthenticated,
    #[error("forbidden")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("activity not found")]
    ActivityNotFound,
    #[error("registration not found")]
    RegistrationNotFound,
    #[error("username already taken")]
    UsernameTaken,
    #[error("invalid role")]
    InvalidRole,
    #[error("invalid attendance level")]
    InvalidLevel,
    #[error("invalid max score")]
    InvalidMaxScore,
    #[error("missing data")]
    MissingData,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl PortalError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ActivityNotFound => "ACTIVITY_NOT_FOUND",
            Self::RegistrationNotFound => "REGISTRATION_NOT_FOUND",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::InvalidRole => "INVALID_ROLE",
            Self::InvalidLevel => "INVALID_LEVEL",
            Self::InvalidMaxScore => "INVALID_MAX_SCORE",
            Self::MissingData => "MISSING_DATA",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Unauthenticated => StatusCode::SEE_OTHER,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound | Self::ActivityNotFound | Self::RegistrationNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::UsernameTaken => StatusCode::CONFLICT,
            Self::InvalidRole | Self::InvalidLevel | Self::InvalidMaxScore | Self::MissingData => {
                StatusCode::BAD_REQUEST
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Standalone error page. It carries no navbar because the caller's account
/// is not known here.
#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPage<'a> {
    status: u16,
    kind: &'a str,
    message: String,
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        if let Self::Unauthenticated = self {
            return Redirect::to(LOGIN_PATH).into_response();
        }
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let status = self.status();
        let page = ErrorPage {
            status: status.as_u16(),
            kind: self.kind(),
            message: self.to_string(),
        };
        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "failed to render error page");
                (status, self.kind()).into_response()
            }
        }
    }
}

impl From<askama::Error> for PortalError {
    fn from(e: askama::Error) -> Self {
        Self::Internal(anyhow::Error::new(e).context("render template"))
    }
}

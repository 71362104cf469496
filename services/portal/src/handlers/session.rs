use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::Deserialize;

use drl_auth_types::identity::SessionIdentity;

use crate::domain::types::{Account, Caller};
use crate::error::PortalError;
use crate::state::AppState;
use crate::usecase::account::ResolveCallerUseCase;
use crate::view::{Flash, Nav};

/// The signed-in account, re-read from the store on every request so role
/// changes and deletions apply immediately.
///
/// Redirects to `/login` when the session cookie is missing or invalid, or
/// when the account no longer exists.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub account: Account,
}

impl CurrentUser {
    pub fn caller(&self) -> Caller {
        Caller::from(&self.account)
    }

    pub fn nav(&self) -> Nav {
        Nav::for_account(&self.account)
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = PortalError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = SessionIdentity::from_request_parts(parts, state)
            .await
            .map_err(|_| PortalError::Unauthenticated)?;
        let account = ResolveCallerUseCase {
            repo: state.account_repo(),
        }
        .execute(identity.user_id)
        .await?;
        Ok(Self { account })
    }
}

/// `?notice=` left by a POST-redirect-GET round trip.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

impl NoticeQuery {
    pub fn flash(&self) -> Option<Flash> {
        Flash::from_notice(self.notice.as_deref())
    }
}

/// Path with a `notice` query code appended.
pub(crate) fn with_notice(path: &str, notice: &str) -> String {
    format!("{path}?notice={notice}")
}

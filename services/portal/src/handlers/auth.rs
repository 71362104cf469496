use askama::Template;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use drl_auth_types::cookie::{clear_session_cookie, set_session_cookie};
use drl_auth_types::identity::LOGIN_PATH;
use drl_auth_types::token::issue_session_token;

use crate::error::PortalError;
use crate::handlers::render;
use crate::handlers::session::{CurrentUser, NoticeQuery, with_notice};
use crate::state::AppState;
use crate::usecase::account::LoginUseCase;
use crate::view::{Flash, Nav};

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub nav: Nav,
    pub flash: Option<Flash>,
    pub username: String,
}

// ── GET /login ───────────────────────────────────────────────────────────────

pub async fn login_form(Query(query): Query<NoticeQuery>) -> Result<Response, PortalError> {
    let page = LoginPage {
        nav: Nav::anonymous(),
        flash: query.flash(),
        username: String::new(),
    };
    Ok(render(&page)?.into_response())
}

// ── POST /login ──────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, PortalError> {
    let uc = LoginUseCase {
        repo: state.account_repo(),
        hasher: state.hasher(),
    };
    let account = match uc.execute(&form.username, &form.password).await {
        Ok(account) => account,
        Err(PortalError::InvalidCredentials) => {
            let page = LoginPage {
                nav: Nav::anonymous(),
                flash: Some(Flash::new(
                    "danger",
                    "Tên đăng nhập hoặc mật khẩu không đúng",
                )),
                username: form.username.trim().to_owned(),
            };
            return Ok((StatusCode::UNAUTHORIZED, render(&page)?).into_response());
        }
        Err(e) => return Err(e),
    };

    let token = issue_session_token(account.id, state.session_ttl_secs, &state.session_secret)
        .map_err(|e| anyhow::Error::new(e).context("sign session token"))?;
    let jar = set_session_cookie(jar, token, state.session_ttl_secs, state.cookie_secure);
    Ok((jar, Redirect::to(&with_notice("/", "logged_in"))).into_response())
}

// ── GET /logout ──────────────────────────────────────────────────────────────

pub async fn logout(
    _user: CurrentUser,
    State(state): State<AppState>,
    jar: CookieJar,
) -> impl IntoResponse {
    let jar = clear_session_cookie(jar, state.cookie_secure);
    (jar, Redirect::to(&with_notice(LOGIN_PATH, "logged_out")))
}

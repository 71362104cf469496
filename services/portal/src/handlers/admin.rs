use askama::Template;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use drl_domain::role::Role;

use crate::error::PortalError;
use crate::handlers::render;
use crate::handlers::session::{CurrentUser, NoticeQuery, with_notice};
use crate::state::AppState;
use crate::usecase::account::{
    AccountInput, CreateAccountUseCase, DeleteAccountUseCase, GetAccountUseCase,
    ListAccountsUseCase, UpdateAccountUseCase,
};
use crate::usecase::activity::{
    ActivityInput, AdminDashboardUseCase, CreateActivityUseCase, DeleteActivityUseCase,
    GetActivityUseCase, UpdateActivityUseCase,
};
use crate::view::{AccountRow, ActivityRow, Flash, Nav, SelectOption, role_options};

const DASHBOARD_PATH: &str = "/admin";
const USERS_PATH: &str = "/admin/users";

// ── GET /admin ───────────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "admin_dashboard.html")]
pub struct DashboardPage {
    pub nav: Nav,
    pub flash: Option<Flash>,
    pub activities: Vec<ActivityRow>,
}

pub async fn dashboard(
    user: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Response, PortalError> {
    let activities = AdminDashboardUseCase {
        repo: state.activity_repo(),
    }
    .execute(user.caller())
    .await?;
    let page = DashboardPage {
        nav: user.nav(),
        flash: query.flash(),
        activities: activities.into_iter().map(ActivityRow::from).collect(),
    };
    Ok(render(&page)?.into_response())
}

// ── Activity form ────────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "activity_form.html")]
pub struct ActivityFormPage {
    pub nav: Nav,
    pub flash: Option<Flash>,
    /// `None` when creating.
    pub activity: Option<ActivityRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ActivityForm {
    pub name: String,
    pub description: String,
    pub date: String,
    pub max_score: String,
}

impl From<ActivityForm> for ActivityInput {
    fn from(form: ActivityForm) -> Self {
        Self {
            name: form.name,
            description: form.description,
            date: form.date,
            max_score: form.max_score,
        }
    }
}

// GET /admin/activity/new
pub async fn new_activity_form(user: CurrentUser) -> Result<Response, PortalError> {
    user.caller().require(Role::Admin)?;
    let page = ActivityFormPage {
        nav: user.nav(),
        flash: None,
        activity: None,
    };
    Ok(render(&page)?.into_response())
}

// POST /admin/activity/new
pub async fn create_activity(
    user: CurrentUser,
    State(state): State<AppState>,
    Form(form): Form<ActivityForm>,
) -> Result<Redirect, PortalError> {
    CreateActivityUseCase {
        repo: state.activity_repo(),
    }
    .execute(user.caller(), form.into())
    .await?;
    Ok(Redirect::to(&with_notice(DASHBOARD_PATH, "activity_created")))
}

// GET /admin/activity/edit/{id}
pub async fn edit_activity_form(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, PortalError> {
    user.caller().require(Role::Admin)?;
    let activity = GetActivityUseCase {
        repo: state.activity_repo(),
    }
    .execute(id)
    .await?;
    let page = ActivityFormPage {
        nav: user.nav(),
        flash: None,
        activity: Some(activity.into()),
    };
    Ok(render(&page)?.into_response())
}

// POST /admin/activity/edit/{id}
pub async fn update_activity(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<ActivityForm>,
) -> Result<Redirect, PortalError> {
    UpdateActivityUseCase {
        repo: state.activity_repo(),
    }
    .execute(user.caller(), id, form.into())
    .await?;
    Ok(Redirect::to(&with_notice(DASHBOARD_PATH, "activity_updated")))
}

// POST /admin/activity/delete/{id}
pub async fn delete_activity(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, PortalError> {
    DeleteActivityUseCase {
        repo: state.activity_repo(),
    }
    .execute(user.caller(), id)
    .await?;
    Ok(Redirect::to(&with_notice(DASHBOARD_PATH, "activity_deleted")))
}

// ── Accounts ─────────────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "users_manage.html")]
pub struct UsersPage {
    pub nav: Nav,
    pub flash: Option<Flash>,
    pub users: Vec<AccountRow>,
    pub roles: Vec<SelectOption>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AccountForm {
    pub username: String,
    pub fullname: String,
    pub password: String,
    pub role: String,
    pub student_id: String,
    pub class_name: String,
}

impl From<AccountForm> for AccountInput {
    fn from(form: AccountForm) -> Self {
        Self {
            username: form.username,
            fullname: form.fullname,
            password: form.password,
            role: form.role,
            student_id: form.student_id,
            class_name: form.class_name,
        }
    }
}

async fn users_page(
    user: &CurrentUser,
    state: &AppState,
    flash: Option<Flash>,
) -> Result<UsersPage, PortalError> {
    let users = ListAccountsUseCase {
        repo: state.account_repo(),
    }
    .execute(user.caller())
    .await?;
    Ok(UsersPage {
        nav: user.nav(),
        flash,
        users: users.into_iter().map(AccountRow::from).collect(),
        roles: role_options(Some(Role::Student)),
    })
}

// GET /admin/users
pub async fn list_users(
    user: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Response, PortalError> {
    let page = users_page(&user, &state, query.flash()).await?;
    Ok(render(&page)?.into_response())
}

// POST /admin/users
pub async fn create_user(
    user: CurrentUser,
    State(state): State<AppState>,
    Form(form): Form<AccountForm>,
) -> Result<Response, PortalError> {
    let uc = CreateAccountUseCase {
        repo: state.account_repo(),
        hasher: state.hasher(),
        default_password: state.default_password.clone(),
    };
    let (status, flash) = match uc.execute(user.caller(), form.into()).await {
        Ok(created) => (
            StatusCode::OK,
            Flash::new(
                "success",
                format!(
                    "Tạo tài khoản {} thành công (pwd: {})",
                    created.account.username, created.password
                ),
            ),
        ),
        Err(PortalError::UsernameTaken) => (
            StatusCode::CONFLICT,
            Flash::new("warning", "Tên đăng nhập đã tồn tại"),
        ),
        Err(e) => return Err(e),
    };
    let page = users_page(&user, &state, Some(flash)).await?;
    Ok((status, render(&page)?).into_response())
}

#[derive(Template)]
#[template(path = "edit_user.html")]
pub struct EditUserPage {
    pub nav: Nav,
    pub flash: Option<Flash>,
    pub user: AccountRow,
    pub roles: Vec<SelectOption>,
}

// GET /admin/users/edit/{id}
pub async fn edit_user_form(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, PortalError> {
    let account = GetAccountUseCase {
        repo: state.account_repo(),
    }
    .execute(user.caller(), id)
    .await?;
    let page = EditUserPage {
        nav: user.nav(),
        flash: None,
        roles: role_options(Some(account.role)),
        user: account.into(),
    };
    Ok(render(&page)?.into_response())
}

// POST /admin/users/edit/{id}
pub async fn update_user(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<AccountForm>,
) -> Result<Redirect, PortalError> {
    UpdateAccountUseCase {
        repo: state.account_repo(),
        hasher: state.hasher(),
    }
    .execute(user.caller(), id, form.into())
    .await?;
    Ok(Redirect::to(&with_notice(USERS_PATH, "account_updated")))
}

// POST /admin/users/delete/{id}
pub async fn delete_user(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, PortalError> {
    DeleteAccountUseCase {
        repo: state.account_repo(),
    }
    .execute(user.caller(), id)
    .await?;
    Ok(Redirect::to(&with_notice(USERS_PATH, "account_deleted")))
}

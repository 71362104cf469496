use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};

use drl_domain::role::Role;

use crate::domain::types::RegisterOutcome;
use crate::error::PortalError;
use crate::handlers::render;
use crate::handlers::session::{CurrentUser, NoticeQuery, with_notice};
use crate::state::AppState;
use crate::usecase::activity::{GetActivityUseCase, ListActivitiesUseCase};
use crate::usecase::registration::{
    CancelRegistrationUseCase, FindOwnRegistrationUseCase, ListRegistrantsUseCase,
    RegisterUseCase,
};
use crate::view::{ActivityRow, Flash, Nav, RegistrantRow};

fn activity_path(id: i32) -> String {
    format!("/activity/{id}")
}

// ── GET / ────────────────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub nav: Nav,
    pub flash: Option<Flash>,
    pub activities: Vec<ActivityRow>,
}

pub async fn index(
    user: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Response, PortalError> {
    let uc = ListActivitiesUseCase {
        repo: state.activity_repo(),
    };
    let activities = uc.execute(user.caller()).await?;
    let page = IndexPage {
        nav: user.nav(),
        flash: query.flash(),
        activities: activities.into_iter().map(ActivityRow::from).collect(),
    };
    Ok(render(&page)?.into_response())
}

// ── GET /activity/{id} ───────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "activity.html")]
pub struct ActivityPage {
    pub nav: Nav,
    pub flash: Option<Flash>,
    pub activity: ActivityRow,
    pub is_student: bool,
    /// When the caller's active registration was made, if registered.
    pub registered_at: Option<String>,
    pub show_registrants: bool,
    pub registrants: Vec<RegistrantRow>,
}

pub async fn activity_detail(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<NoticeQuery>,
) -> Result<Response, PortalError> {
    let caller = user.caller();
    let activity = GetActivityUseCase {
        repo: state.activity_repo(),
    }
    .execute(id)
    .await?;

    let own = FindOwnRegistrationUseCase {
        registrations: state.registration_repo(),
    }
    .execute(caller, id)
    .await?;

    let show_registrants = matches!(caller.role, Role::Teacher | Role::Admin);
    let registrants = if show_registrants {
        ListRegistrantsUseCase {
            registrations: state.registration_repo(),
        }
        .execute(caller, id)
        .await?
    } else {
        Vec::new()
    };

    let page = ActivityPage {
        nav: user.nav(),
        flash: query.flash(),
        activity: activity.into(),
        is_student: caller.role == Role::Student,
        registered_at: own.map(|r| r.registered_at.format("%Y-%m-%d %H:%M").to_string()),
        show_registrants,
        registrants: registrants.into_iter().map(RegistrantRow::from).collect(),
    };
    Ok(render(&page)?.into_response())
}

// ── POST /activity/{id} ──────────────────────────────────────────────────────

pub async fn register(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, PortalError> {
    let uc = RegisterUseCase {
        registrations: state.registration_repo(),
        activities: state.activity_repo(),
    };
    let notice = match uc.execute(user.caller(), id).await {
        Ok(RegisterOutcome::Created | RegisterOutcome::Reactivated) => "registered",
        Ok(RegisterOutcome::AlreadyRegistered) => "already_registered",
        Err(PortalError::Forbidden) => "students_only",
        Err(e) => return Err(e),
    };
    Ok(Redirect::to(&with_notice(&activity_path(id), notice)))
}

// ── POST /activity/{id}/cancel ───────────────────────────────────────────────

pub async fn cancel(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, PortalError> {
    let uc = CancelRegistrationUseCase {
        registrations: state.registration_repo(),
    };
    let target = if uc.execute(user.caller(), id).await? {
        with_notice(&activity_path(id), "cancelled")
    } else {
        activity_path(id)
    };
    Ok(Redirect::to(&target))
}

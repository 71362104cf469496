use askama::Template;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use drl_domain::role::Role;

use crate::error::PortalError;
use crate::handlers::render;
use crate::handlers::session::{CurrentUser, NoticeQuery, with_notice};
use crate::state::AppState;
use crate::usecase::activity::{GetActivityUseCase, ListActivitiesUseCase};
use crate::usecase::evaluation::{RateInput, RateUseCase};
use crate::usecase::registration::ListRegistrantsUseCase;
use crate::view::{ActivityRow, Flash, Nav, RegistrantRow};

// ── GET /teacher ─────────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "teacher_panel.html")]
pub struct TeacherPanelPage {
    pub nav: Nav,
    pub flash: Option<Flash>,
    pub activities: Vec<ActivityRow>,
}

pub async fn panel(
    user: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Response, PortalError> {
    let caller = user.caller();
    caller.require(Role::Teacher)?;
    let activities = ListActivitiesUseCase {
        repo: state.activity_repo(),
    }
    .execute(caller)
    .await?;
    let page = TeacherPanelPage {
        nav: user.nav(),
        flash: query.flash(),
        activities: activities.into_iter().map(ActivityRow::from).collect(),
    };
    Ok(render(&page)?.into_response())
}

// ── GET /teacher/activity/{id} ───────────────────────────────────────────────

#[derive(Template)]
#[template(path = "teacher_activity.html")]
pub struct TeacherActivityPage {
    pub nav: Nav,
    pub flash: Option<Flash>,
    pub activity: ActivityRow,
    pub students: Vec<RegistrantRow>,
}

pub async fn activity_registrants(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<NoticeQuery>,
) -> Result<Response, PortalError> {
    let caller = user.caller();
    caller.require(Role::Teacher)?;
    let activity = GetActivityUseCase {
        repo: state.activity_repo(),
    }
    .execute(id)
    .await?;
    let registrants = ListRegistrantsUseCase {
        registrations: state.registration_repo(),
    }
    .execute(caller, id)
    .await?;
    let page = TeacherActivityPage {
        nav: user.nav(),
        flash: query.flash(),
        activity: activity.into(),
        students: registrants.into_iter().map(RegistrantRow::from).collect(),
    };
    Ok(render(&page)?.into_response())
}

// ── POST /teacher/rate/{id} ──────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RateForm {
    pub level: String,
    pub note: String,
}

pub async fn rate(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(registration_id): Path<i32>,
    Form(form): Form<RateForm>,
) -> Result<Redirect, PortalError> {
    let uc = RateUseCase {
        registrations: state.registration_repo(),
        evaluations: state.evaluation_repo(),
    };
    let registration = uc
        .execute(
            user.caller(),
            registration_id,
            RateInput {
                level: form.level,
                note: form.note,
            },
        )
        .await?;
    let path = format!("/teacher/activity/{}", registration.activity_id);
    Ok(Redirect::to(&with_notice(&path, "rated")))
}

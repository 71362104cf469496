use askama::Template;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::domain::types::ReportFilter;
use crate::error::PortalError;
use crate::handlers::render;
use crate::handlers::session::CurrentUser;
use crate::state::AppState;
use crate::usecase::report::{ComputeReportUseCase, ListClassesUseCase};
use crate::view::{Flash, Nav, ReportRow, SelectOption, class_options};

#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportPage {
    pub nav: Nav,
    pub flash: Option<Flash>,
    pub classes: Vec<SelectOption>,
    pub student_id: String,
    /// Whether a class or student id was given.
    pub searched: bool,
    pub students: Vec<ReportRow>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub class: Option<String>,
    pub student_id: Option<String>,
}

// GET /admin/report
pub async fn report(
    user: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, PortalError> {
    let caller = user.caller();
    let classes = ListClassesUseCase {
        repo: state.report_repo(),
    }
    .execute(caller)
    .await?;

    let filter = ReportFilter::from_params(query.class.as_deref(), query.student_id.as_deref());
    let reports = ComputeReportUseCase {
        repo: state.report_repo(),
    }
    .execute(caller, &filter)
    .await?;

    let selected_class = match &filter {
        ReportFilter::Class(class) => Some(class.as_str()),
        _ => None,
    };
    let page = ReportPage {
        nav: user.nav(),
        flash: None,
        classes: class_options(classes, selected_class),
        student_id: query.student_id.unwrap_or_default(),
        searched: filter != ReportFilter::Nobody,
        students: reports.into_iter().map(ReportRow::from).collect(),
    };
    Ok(render(&page)?.into_response())
}

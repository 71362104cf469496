pub mod activity;
pub mod admin;
pub mod auth;
pub mod health;
pub mod report;
pub mod session;
pub mod teacher;

use askama::Template;
use axum::response::Html;

use crate::error::PortalError;

/// Render a page template into an HTML body.
pub(crate) fn render<T: Template>(page: &T) -> Result<Html<String>, PortalError> {
    Ok(Html(page.render()?))
}

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use drl_core::health::healthz;
use drl_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    activity::{activity_detail, cancel, index, register},
    admin::{
        create_activity, create_user, dashboard, delete_activity, delete_user,
        edit_activity_form, edit_user_form, list_users, new_activity_form, update_activity,
        update_user,
    },
    auth::{login, login_form, logout},
    health::readyz,
    report::report,
    teacher::{activity_registrants, panel, rate},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Session
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
        // Catalog and registration
        .route("/", get(index))
        .route("/activity/{id}", get(activity_detail).post(register))
        .route("/activity/{id}/cancel", post(cancel))
        // Admin: activities
        .route("/admin", get(dashboard))
        .route(
            "/admin/activity/new",
            get(new_activity_form).post(create_activity),
        )
        .route(
            "/admin/activity/edit/{id}",
            get(edit_activity_form).post(update_activity),
        )
        .route("/admin/activity/delete/{id}", post(delete_activity))
        // Admin: accounts
        .route("/admin/users", get(list_users).post(create_user))
        .route("/admin/users/edit/{id}", get(edit_user_form).post(update_user))
        .route("/admin/users/delete/{id}", post(delete_user))
        // Admin: report
        .route("/admin/report", get(report))
        // Teacher
        .route("/teacher", get(panel))
        .route("/teacher/activity/{id}", get(activity_registrants))
        .route("/teacher/rate/{id}", post(rate))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}

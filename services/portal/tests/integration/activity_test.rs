use drl_portal::error::PortalError;
use drl_portal::usecase::activity::{
    ActivityInput, AdminDashboardUseCase, CreateActivityUseCase, DEFAULT_MAX_SCORE,
    DeleteActivityUseCase, GetActivityUseCase, ListActivitiesUseCase, UpdateActivityUseCase,
};

use crate::helpers::{MemoryStore, admin};

fn input(name: &str, date: &str, max_score: &str) -> ActivityInput {
    ActivityInput {
        name: name.to_owned(),
        description: String::new(),
        date: date.to_owned(),
        max_score: max_score.to_owned(),
    }
}

#[tokio::test]
async fn should_create_activity_with_default_max_score() {
    let store = MemoryStore::new();

    let activity = CreateActivityUseCase { repo: store.clone() }
        .execute(admin(), input("  Cleanup ", "2025-10-20", ""))
        .await
        .unwrap();

    assert_eq!(activity.name, "Cleanup");
    assert_eq!(activity.max_score, DEFAULT_MAX_SCORE);
    let stored = GetActivityUseCase { repo: store.clone() }
        .execute(activity.id)
        .await
        .unwrap();
    assert_eq!(stored, activity);
}

#[tokio::test]
async fn should_reject_activity_without_name() {
    let store = MemoryStore::new();

    let result = CreateActivityUseCase { repo: store.clone() }
        .execute(admin(), input(" ", "2025-10-20", "5"))
        .await;

    assert!(matches!(result, Err(PortalError::MissingData)));
    assert!(store.activities().is_empty());
}

#[tokio::test]
async fn should_reject_non_numeric_max_score() {
    let store = MemoryStore::new();

    let result = CreateActivityUseCase { repo: store.clone() }
        .execute(admin(), input("Cleanup", "2025-10-20", "ten"))
        .await;

    assert!(matches!(result, Err(PortalError::InvalidMaxScore)));
}

#[tokio::test]
async fn should_keep_current_values_for_blank_fields_on_edit() {
    let store = MemoryStore::new();
    let activity = store.add_activity("Cleanup", 8);

    let updated = UpdateActivityUseCase { repo: store.clone() }
        .execute(admin(), activity.id, input("", "2025-11-01", ""))
        .await
        .unwrap();

    assert_eq!(updated.name, "Cleanup");
    assert_eq!(updated.max_score, 8);
    assert_eq!(updated.date, "2025-11-01");
    assert_eq!(store.activities()[0], updated);
}

#[tokio::test]
async fn should_leave_activity_untouched_on_invalid_edit() {
    let store = MemoryStore::new();
    let activity = store.add_activity("Cleanup", 8);

    let result = UpdateActivityUseCase { repo: store.clone() }
        .execute(admin(), activity.id, input("Renamed", "", "-3"))
        .await;

    assert!(matches!(result, Err(PortalError::InvalidMaxScore)));
    assert_eq!(store.activities()[0], activity);
}

#[tokio::test]
async fn should_report_missing_activity() {
    let store = MemoryStore::new();

    let get = GetActivityUseCase { repo: store.clone() }.execute(9).await;
    let update = UpdateActivityUseCase { repo: store.clone() }
        .execute(admin(), 9, input("x", "", ""))
        .await;
    let delete = DeleteActivityUseCase { repo: store.clone() }
        .execute(admin(), 9)
        .await;

    assert!(matches!(get, Err(PortalError::ActivityNotFound)));
    assert!(matches!(update, Err(PortalError::ActivityNotFound)));
    assert!(matches!(delete, Err(PortalError::ActivityNotFound)));
}

#[tokio::test]
async fn should_cascade_activity_delete_to_registrations() {
    let store = MemoryStore::new();
    let student = store.add_student("sv01", "SV001", "CNTT1");
    let activity = store.add_activity("Cleanup", 10);
    drl_portal::usecase::registration::RegisterUseCase {
        registrations: store.clone(),
        activities: store.clone(),
    }
    .execute(student, activity.id)
    .await
    .unwrap();

    DeleteActivityUseCase { repo: store.clone() }
        .execute(admin(), activity.id)
        .await
        .unwrap();

    assert!(store.activities().is_empty());
    assert!(store.registrations().is_empty());
}

#[tokio::test]
async fn should_order_catalog_by_date_and_dashboard_by_creation() {
    let store = MemoryStore::new();
    let create = CreateActivityUseCase { repo: store.clone() };
    create
        .execute(admin(), input("Late", "2025-12-01", "5"))
        .await
        .unwrap();
    create
        .execute(admin(), input("Early", "2025-09-01", "5"))
        .await
        .unwrap();
    create
        .execute(admin(), input("Middle", "2025-10-15", "5"))
        .await
        .unwrap();

    let catalog = ListActivitiesUseCase { repo: store.clone() }
        .execute(crate::helpers::caller(50, drl_domain::role::Role::Student))
        .await
        .unwrap();
    let dashboard = AdminDashboardUseCase { repo: store.clone() }
        .execute(admin())
        .await
        .unwrap();

    let by_date: Vec<_> = catalog.iter().map(|a| a.name.as_str()).collect();
    let by_creation: Vec<_> = dashboard.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(by_date, ["Late", "Middle", "Early"]);
    assert_eq!(by_creation, ["Middle", "Early", "Late"]);
}

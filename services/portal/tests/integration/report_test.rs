use drl_domain::role::Role;
use drl_portal::domain::types::{Caller, ReportFilter};
use drl_portal::usecase::evaluation::{RateInput, RateUseCase};
use drl_portal::usecase::registration::{CancelRegistrationUseCase, RegisterUseCase};
use drl_portal::usecase::account::DeleteAccountUseCase;
use drl_portal::usecase::report::{ComputeReportUseCase, ListClassesUseCase};

use crate::helpers::{MemoryStore, admin};

async fn register(store: &MemoryStore, student: Caller, activity_id: i32) -> i32 {
    RegisterUseCase {
        registrations: store.clone(),
        activities: store.clone(),
    }
    .execute(student, activity_id)
    .await
    .unwrap();
    store
        .registrations()
        .into_iter()
        .find(|r| r.user_id == student.user_id && r.activity_id == activity_id)
        .unwrap()
        .id
}

async fn rate(store: &MemoryStore, teacher: Caller, registration_id: i32, level: &str) {
    RateUseCase {
        registrations: store.clone(),
        evaluations: store.clone(),
    }
    .execute(
        teacher,
        registration_id,
        RateInput {
            level: level.to_owned(),
            note: String::new(),
        },
    )
    .await
    .unwrap();
}

fn report_uc(store: &MemoryStore) -> ComputeReportUseCase<MemoryStore> {
    ComputeReportUseCase { repo: store.clone() }
}

#[tokio::test]
async fn should_total_points_across_activities() {
    let store = MemoryStore::new();
    let teacher = Caller::from(&store.add_account("teacher1", Role::Teacher, None, None));
    let student = store.add_student("sv01", "SV001", "CNTT1");
    let cleanup = store.add_activity("Cleanup", 10);
    let workshop = store.add_activity("Workshop", 8);
    let r1 = register(&store, student, cleanup.id).await;
    let r2 = register(&store, student, workshop.id).await;
    rate(&store, teacher, r1, "active").await;
    rate(&store, teacher, r2, "attend").await;

    let reports = report_uc(&store)
        .execute(admin(), &ReportFilter::Class("CNTT1".to_owned()))
        .await
        .unwrap();

    assert_eq!(reports.len(), 1);
    let card = &reports[0].card;
    assert_eq!(card.lines.len(), 2);
    assert!((card.total - 16.4).abs() < 1e-9, "total was {}", card.total);
    assert!((card.lines[1].point - 6.4).abs() < 1e-9);
}

#[tokio::test]
async fn should_exclude_cancelled_registrations() {
    let store = MemoryStore::new();
    let teacher = Caller::from(&store.add_account("teacher1", Role::Teacher, None, None));
    let student = store.add_student("sv01", "SV001", "CNTT1");
    let cleanup = store.add_activity("Cleanup", 10);
    let reg = register(&store, student, cleanup.id).await;
    rate(&store, teacher, reg, "active").await;
    CancelRegistrationUseCase {
        registrations: store.clone(),
    }
    .execute(student, cleanup.id)
    .await
    .unwrap();

    let reports = report_uc(&store)
        .execute(admin(), &ReportFilter::StudentId("SV001".to_owned()))
        .await
        .unwrap();

    assert_eq!(reports.len(), 1);
    assert!(reports[0].card.lines.is_empty());
    assert_eq!(reports[0].card.total, 0.0);
}

#[tokio::test]
async fn should_count_unrated_registration_as_zero() {
    let store = MemoryStore::new();
    let student = store.add_student("sv01", "SV001", "CNTT1");
    let cleanup = store.add_activity("Cleanup", 10);
    register(&store, student, cleanup.id).await;

    let reports = report_uc(&store)
        .execute(admin(), &ReportFilter::StudentId("SV001".to_owned()))
        .await
        .unwrap();

    assert_eq!(reports[0].card.lines.len(), 1);
    assert_eq!(reports[0].card.lines[0].percent, 0.0);
    assert_eq!(reports[0].card.total, 0.0);
}

#[tokio::test]
async fn should_select_students_by_class_over_student_id() {
    let store = MemoryStore::new();
    store.add_student("sv01", "SV001", "CNTT1");
    store.add_student("sv02", "SV002", "CNTT1");
    store.add_student("sv03", "SV003", "CNTT2");

    let filter = ReportFilter::from_params(Some("CNTT1"), Some("SV003"));
    let reports = report_uc(&store).execute(admin(), &filter).await.unwrap();

    let names: Vec<_> = reports.iter().map(|r| r.student.username.as_str()).collect();
    assert_eq!(names, ["sv01", "sv02"]);
}

#[tokio::test]
async fn should_return_empty_report_without_filter() {
    let store = MemoryStore::new();
    store.add_student("sv01", "SV001", "CNTT1");

    let reports = report_uc(&store)
        .execute(admin(), &ReportFilter::from_params(None, None))
        .await
        .unwrap();

    assert!(reports.is_empty());
}

#[tokio::test]
async fn should_ignore_non_student_accounts() {
    let store = MemoryStore::new();
    store.add_account("teacher1", Role::Teacher, Some("T01"), Some("CNTT1"));
    store.add_student("sv01", "SV001", "CNTT1");

    let reports = report_uc(&store)
        .execute(admin(), &ReportFilter::Class("CNTT1".to_owned()))
        .await
        .unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].student.username, "sv01");
}

#[tokio::test]
async fn should_list_distinct_student_classes() {
    let store = MemoryStore::new();
    store.add_student("sv01", "SV001", "CNTT2");
    store.add_student("sv02", "SV002", "CNTT1");
    store.add_student("sv03", "SV003", "CNTT1");
    store.add_account("teacher1", Role::Teacher, None, Some("STAFF"));

    let classes = ListClassesUseCase { repo: store.clone() }
        .execute(admin())
        .await
        .unwrap();

    assert_eq!(classes, ["CNTT1", "CNTT2"]);
}

#[tokio::test]
async fn should_keep_totals_after_rating_teacher_is_deleted() {
    let store = MemoryStore::new();
    let teacher = Caller::from(&store.add_account("teacher1", Role::Teacher, None, None));
    let student = store.add_student("sv01", "SV001", "CNTT1");
    let cleanup = store.add_activity("Cleanup", 10);
    let reg = register(&store, student, cleanup.id).await;
    rate(&store, teacher, reg, "active").await;

    DeleteAccountUseCase { repo: store.clone() }
        .execute(admin(), teacher.user_id)
        .await
        .unwrap();

    let reports = report_uc(&store)
        .execute(admin(), &ReportFilter::StudentId("SV001".to_owned()))
        .await
        .unwrap();
    assert_eq!(reports[0].card.total, 10.0);
    assert_eq!(store.evaluation_for(reg).unwrap().teacher_id, None);
}

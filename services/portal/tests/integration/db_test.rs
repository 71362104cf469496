//! Repository behavior against a real SQLite schema built by the migrator.

use drl_domain::level::AttendanceLevel;
use drl_domain::role::Role;
use drl_portal::domain::repository::{
    AccountRepository, ActivityRepository, EvaluationRepository, RegistrationRepository,
    ReportRepository,
};
use drl_portal::domain::types::{
    Account, Activity, ActivityOrder, EvaluationDraft, NewAccount, NewActivity, ReportFilter,
};
use drl_portal::error::PortalError;
use drl_portal::infra::db::{
    DbAccountRepository, DbActivityRepository, DbEvaluationRepository, DbRegistrationRepository,
    DbReportRepository,
};
use drl_portal::usecase::report::ComputeReportUseCase;
use sea_orm::DatabaseConnection;

use crate::helpers::{admin, sqlite_db, stored_evaluation};

struct Repos {
    accounts: DbAccountRepository,
    activities: DbActivityRepository,
    registrations: DbRegistrationRepository,
    evaluations: DbEvaluationRepository,
    reports: DbReportRepository,
}

fn repos(db: &DatabaseConnection) -> Repos {
    Repos {
        accounts: DbAccountRepository { db: db.clone() },
        activities: DbActivityRepository { db: db.clone() },
        registrations: DbRegistrationRepository { db: db.clone() },
        evaluations: DbEvaluationRepository { db: db.clone() },
        reports: DbReportRepository { db: db.clone() },
    }
}

fn new_account(username: &str, role: Role, student_id: Option<&str>, class: Option<&str>) -> NewAccount {
    NewAccount {
        username: username.to_owned(),
        fullname: username.to_uppercase(),
        password_hash: "x".to_owned(),
        role,
        student_id: student_id.map(str::to_owned),
        class_name: class.map(str::to_owned),
    }
}

async fn student(r: &Repos, username: &str, sid: &str, class: &str) -> Account {
    r.accounts
        .create(&new_account(username, Role::Student, Some(sid), Some(class)))
        .await
        .unwrap()
}

async fn activity(r: &Repos, name: &str, date: &str, max_score: i32) -> Activity {
    r.activities
        .create(&NewActivity {
            name: name.to_owned(),
            description: String::new(),
            date: date.to_owned(),
            max_score,
        })
        .await
        .unwrap()
}

fn draft(registration_id: i32, teacher_id: i32, level: AttendanceLevel, note: &str) -> EvaluationDraft {
    EvaluationDraft {
        registration_id,
        teacher_id,
        level,
        percent: level.percent(),
        note: note.to_owned(),
    }
}

#[tokio::test]
async fn should_insert_registration_once_per_pair() {
    let db = sqlite_db().await;
    let r = repos(&db);
    let sv = student(&r, "sv01", "SV001", "CNTT1").await;
    let act = activity(&r, "Cleanup", "2025-10-20", 10).await;

    assert!(r.registrations.insert_active(sv.id, act.id).await.unwrap());
    assert!(!r.registrations.insert_active(sv.id, act.id).await.unwrap());

    let reg = r.registrations.find(sv.id, act.id).await.unwrap().unwrap();
    assert!(!reg.cancelled);
}

#[tokio::test]
async fn should_reuse_row_when_reactivating() {
    let db = sqlite_db().await;
    let r = repos(&db);
    let sv = student(&r, "sv01", "SV001", "CNTT1").await;
    let act = activity(&r, "Cleanup", "2025-10-20", 10).await;
    r.registrations.insert_active(sv.id, act.id).await.unwrap();
    let original = r.registrations.find(sv.id, act.id).await.unwrap().unwrap();

    assert!(r.registrations.cancel_active(sv.id, act.id).await.unwrap());
    assert!(!r.registrations.cancel_active(sv.id, act.id).await.unwrap());
    assert!(r.registrations.find(sv.id, act.id).await.unwrap().unwrap().cancelled);

    assert!(r.registrations.reactivate(original.id).await.unwrap());
    assert!(!r.registrations.reactivate(original.id).await.unwrap());
    let again = r.registrations.find_by_id(original.id).await.unwrap().unwrap();
    assert_eq!(again.id, original.id);
    assert!(!again.cancelled);
}

#[tokio::test]
async fn should_list_only_active_registrants_with_ratings() {
    let db = sqlite_db().await;
    let r = repos(&db);
    let teacher = r
        .accounts
        .create(&new_account("teacher1", Role::Teacher, None, None))
        .await
        .unwrap();
    let a = student(&r, "sv01", "SV001", "CNTT1").await;
    let b = student(&r, "sv02", "SV002", "CNTT1").await;
    let act = activity(&r, "Cleanup", "2025-10-20", 10).await;
    r.registrations.insert_active(a.id, act.id).await.unwrap();
    r.registrations.insert_active(b.id, act.id).await.unwrap();
    r.registrations.cancel_active(b.id, act.id).await.unwrap();
    let reg = r.registrations.find(a.id, act.id).await.unwrap().unwrap();
    r.evaluations
        .upsert(&draft(reg.id, teacher.id, AttendanceLevel::Attend, ""))
        .await
        .unwrap();

    let registrants = r.registrations.list_active_for_activity(act.id).await.unwrap();

    assert_eq!(registrants.len(), 1);
    assert_eq!(registrants[0].student.username, "sv01");
    let evaluation = registrants[0].evaluation.as_ref().unwrap();
    assert_eq!(evaluation.level, AttendanceLevel::Attend);
}

#[tokio::test]
async fn should_keep_single_evaluation_per_registration() {
    let db = sqlite_db().await;
    let r = repos(&db);
    let t1 = r
        .accounts
        .create(&new_account("teacher1", Role::Teacher, None, None))
        .await
        .unwrap();
    let t2 = r
        .accounts
        .create(&new_account("teacher2", Role::Teacher, None, None))
        .await
        .unwrap();
    let sv = student(&r, "sv01", "SV001", "CNTT1").await;
    let act = activity(&r, "Cleanup", "2025-10-20", 10).await;
    r.registrations.insert_active(sv.id, act.id).await.unwrap();
    let reg = r.registrations.find(sv.id, act.id).await.unwrap().unwrap();

    r.evaluations
        .upsert(&draft(reg.id, t1.id, AttendanceLevel::Active, "great"))
        .await
        .unwrap();
    r.evaluations
        .upsert(&draft(reg.id, t2.id, AttendanceLevel::None, "absent"))
        .await
        .unwrap();

    let evaluation = stored_evaluation(&db, reg.id).await.unwrap();
    assert_eq!(evaluation.teacher_id, Some(t2.id));
    assert_eq!(evaluation.level, "none");
    assert_eq!(evaluation.percent, 0.0);
    assert_eq!(evaluation.note, "absent");
    let registrants = r.registrations.list_active_for_activity(act.id).await.unwrap();
    assert_eq!(registrants[0].evaluation.as_ref().map(|e| e.id), Some(evaluation.id));
}

#[tokio::test]
async fn should_map_duplicate_username_to_conflict() {
    let db = sqlite_db().await;
    let r = repos(&db);
    let first = student(&r, "sv01", "SV001", "CNTT1").await;
    let second = student(&r, "sv02", "SV002", "CNTT1").await;

    let create = r
        .accounts
        .create(&new_account("sv01", Role::Teacher, None, None))
        .await;
    let mut renamed = second.clone();
    renamed.username = first.username.clone();
    let update = r.accounts.update(&renamed).await;

    assert!(matches!(create, Err(PortalError::UsernameTaken)));
    assert!(matches!(update, Err(PortalError::UsernameTaken)));
}

#[tokio::test]
async fn should_cascade_deletes_to_registrations_and_evaluations() {
    let db = sqlite_db().await;
    let r = repos(&db);
    let teacher = r
        .accounts
        .create(&new_account("teacher1", Role::Teacher, None, None))
        .await
        .unwrap();
    let sv = student(&r, "sv01", "SV001", "CNTT1").await;
    let kept = activity(&r, "Cleanup", "2025-10-20", 10).await;
    let dropped = activity(&r, "Workshop", "2025-10-21", 8).await;
    r.registrations.insert_active(sv.id, kept.id).await.unwrap();
    r.registrations.insert_active(sv.id, dropped.id).await.unwrap();
    let dropped_reg = r.registrations.find(sv.id, dropped.id).await.unwrap().unwrap();
    r.evaluations
        .upsert(&draft(dropped_reg.id, teacher.id, AttendanceLevel::Active, ""))
        .await
        .unwrap();

    assert!(r.activities.delete(dropped.id).await.unwrap());
    assert!(r.registrations.find_by_id(dropped_reg.id).await.unwrap().is_none());
    assert!(stored_evaluation(&db, dropped_reg.id).await.is_none());
    assert!(r.registrations.find(sv.id, kept.id).await.unwrap().is_some());

    assert!(r.accounts.delete(sv.id).await.unwrap());
    assert!(r.registrations.find(sv.id, kept.id).await.unwrap().is_none());
    assert!(!r.accounts.delete(sv.id).await.unwrap());
}

#[tokio::test]
async fn should_order_activities_for_catalog_and_dashboard() {
    let db = sqlite_db().await;
    let r = repos(&db);
    activity(&r, "Late", "2025-12-01", 5).await;
    activity(&r, "Early", "2025-09-01", 5).await;

    let by_date = r.activities.list(ActivityOrder::DateDesc).await.unwrap();
    let by_creation = r.activities.list(ActivityOrder::CreatedDesc).await.unwrap();

    assert_eq!(by_date[0].name, "Late");
    assert_eq!(by_creation[0].name, "Early");
}

#[tokio::test]
async fn should_compute_report_from_stored_evaluations() {
    let db = sqlite_db().await;
    let r = repos(&db);
    let teacher = r
        .accounts
        .create(&new_account("teacher1", Role::Teacher, None, Some("CNTT1")))
        .await
        .unwrap();
    let sv = student(&r, "sv01", "SV001", "CNTT1").await;
    student(&r, "sv02", "SV002", "CNTT2").await;
    let cleanup = activity(&r, "Cleanup", "2025-10-20", 10).await;
    let workshop = activity(&r, "Workshop", "2025-10-21", 8).await;
    let extra = activity(&r, "Extra", "2025-10-22", 5).await;
    for act in [&cleanup, &workshop, &extra] {
        r.registrations.insert_active(sv.id, act.id).await.unwrap();
    }
    let reg_cleanup = r.registrations.find(sv.id, cleanup.id).await.unwrap().unwrap();
    let reg_workshop = r.registrations.find(sv.id, workshop.id).await.unwrap().unwrap();
    let reg_extra = r.registrations.find(sv.id, extra.id).await.unwrap().unwrap();
    r.evaluations
        .upsert(&draft(reg_cleanup.id, teacher.id, AttendanceLevel::Active, ""))
        .await
        .unwrap();
    r.evaluations
        .upsert(&draft(reg_workshop.id, teacher.id, AttendanceLevel::Attend, ""))
        .await
        .unwrap();
    r.evaluations
        .upsert(&draft(reg_extra.id, teacher.id, AttendanceLevel::Active, ""))
        .await
        .unwrap();
    r.registrations.cancel_active(sv.id, extra.id).await.unwrap();

    let reports = ComputeReportUseCase { repo: r.reports }
        .execute(admin(), &ReportFilter::Class("CNTT1".to_owned()))
        .await
        .unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].student.id, sv.id);
    assert_eq!(reports[0].card.lines.len(), 2);
    assert!((reports[0].card.total - 16.4).abs() < 1e-9);
}

#[tokio::test]
async fn should_list_distinct_classes_of_students() {
    let db = sqlite_db().await;
    let r = repos(&db);
    student(&r, "sv01", "SV001", "CNTT2").await;
    student(&r, "sv02", "SV002", "CNTT1").await;
    student(&r, "sv03", "SV003", "CNTT1").await;
    r.accounts
        .create(&new_account("teacher1", Role::Teacher, None, Some("STAFF")))
        .await
        .unwrap();

    let classes = r.reports.list_classes().await.unwrap();

    assert_eq!(classes, ["CNTT1", "CNTT2"]);
    let by_sid = r
        .reports
        .find_students(&ReportFilter::StudentId("SV003".to_owned()))
        .await
        .unwrap();
    assert_eq!(by_sid.len(), 1);
    assert_eq!(by_sid[0].username, "sv03");
}

#[tokio::test]
async fn should_keep_points_when_rating_teacher_is_deleted() {
    let db = sqlite_db().await;
    let r = repos(&db);
    let teacher = r
        .accounts
        .create(&new_account("teacher1", Role::Teacher, None, None))
        .await
        .unwrap();
    let sv = student(&r, "sv01", "SV001", "CNTT1").await;
    let act = activity(&r, "Cleanup", "2025-10-20", 10).await;
    r.registrations.insert_active(sv.id, act.id).await.unwrap();
    let reg = r.registrations.find(sv.id, act.id).await.unwrap().unwrap();
    r.evaluations
        .upsert(&draft(reg.id, teacher.id, AttendanceLevel::Active, "great"))
        .await
        .unwrap();
    let report = ComputeReportUseCase {
        repo: DbReportRepository { db: db.clone() },
    };
    let filter = ReportFilter::StudentId("SV001".to_owned());
    let before = report.execute(admin(), &filter).await.unwrap();

    assert!(r.accounts.delete(teacher.id).await.unwrap());

    let after = report.execute(admin(), &filter).await.unwrap();
    assert_eq!(before[0].card.total, 10.0);
    assert_eq!(after[0].card.total, before[0].card.total);
    let evaluation = stored_evaluation(&db, reg.id).await.unwrap();
    assert_eq!(evaluation.teacher_id, None);
    assert_eq!(evaluation.note, "great");
    let registrants = r.registrations.list_active_for_activity(act.id).await.unwrap();
    assert_eq!(registrants[0].evaluation.as_ref().map(|e| e.percent), Some(100.0));
}

use drl_domain::level::AttendanceLevel;
use drl_domain::role::Role;
use drl_portal::domain::types::Caller;
use drl_portal::error::PortalError;
use drl_portal::usecase::evaluation::{RateInput, RateUseCase};
use drl_portal::usecase::registration::RegisterUseCase;

use crate::helpers::MemoryStore;

struct Fixture {
    store: MemoryStore,
    teacher: Caller,
    registration_id: i32,
}

async fn registered_student() -> Fixture {
    let store = MemoryStore::new();
    let teacher = store.add_account("teacher1", Role::Teacher, None, None);
    let student = store.add_student("sv01", "SV001", "CNTT1");
    let activity = store.add_activity("Cleanup", 10);
    RegisterUseCase {
        registrations: store.clone(),
        activities: store.clone(),
    }
    .execute(student, activity.id)
    .await
    .unwrap();
    let registration_id = store.registrations()[0].id;
    Fixture {
        store,
        teacher: Caller::from(&teacher),
        registration_id,
    }
}

fn rate_uc(store: &MemoryStore) -> RateUseCase<MemoryStore, MemoryStore> {
    RateUseCase {
        registrations: store.clone(),
        evaluations: store.clone(),
    }
}

fn input(level: &str, note: &str) -> RateInput {
    RateInput {
        level: level.to_owned(),
        note: note.to_owned(),
    }
}

#[tokio::test]
async fn should_map_each_level_to_fixed_percent() {
    for (level, percent) in [("none", 0.0), ("attend", 80.0), ("active", 100.0)] {
        let f = registered_student().await;
        rate_uc(&f.store)
            .execute(f.teacher, f.registration_id, input(level, ""))
            .await
            .unwrap();
        let evaluations = f.store.evaluations();
        assert_eq!(evaluations.len(), 1);
        assert_eq!(evaluations[0].percent, percent, "level {level}");
        assert_eq!(evaluations[0].level.as_str(), level);
    }
}

#[tokio::test]
async fn should_overwrite_previous_evaluation() {
    let f = registered_student().await;
    let uc = rate_uc(&f.store);

    uc.execute(f.teacher, f.registration_id, input("attend", "late"))
        .await
        .unwrap();
    uc.execute(f.teacher, f.registration_id, input("active", "led a team"))
        .await
        .unwrap();

    let evaluations = f.store.evaluations();
    assert_eq!(evaluations.len(), 1);
    assert_eq!(evaluations[0].level, AttendanceLevel::Active);
    assert_eq!(evaluations[0].percent, 100.0);
    assert_eq!(evaluations[0].note, "led a team");
    assert_eq!(evaluations[0].teacher_id, Some(f.teacher.user_id));
}

#[tokio::test]
async fn should_record_last_teacher_on_overwrite() {
    let f = registered_student().await;
    let other = f.store.add_account("teacher2", Role::Teacher, None, None);
    let uc = rate_uc(&f.store);

    uc.execute(f.teacher, f.registration_id, input("attend", ""))
        .await
        .unwrap();
    uc.execute(Caller::from(&other), f.registration_id, input("none", ""))
        .await
        .unwrap();

    let evaluations = f.store.evaluations();
    assert_eq!(evaluations.len(), 1);
    assert_eq!(evaluations[0].teacher_id, Some(other.id));
    assert_eq!(evaluations[0].percent, 0.0);
}

#[tokio::test]
async fn should_reject_unknown_level() {
    let f = registered_student().await;

    let result = rate_uc(&f.store)
        .execute(f.teacher, f.registration_id, input("excellent", ""))
        .await;

    assert!(matches!(result, Err(PortalError::InvalidLevel)));
    assert!(f.store.evaluations().is_empty());
}

#[tokio::test]
async fn should_fail_for_unknown_registration() {
    let f = registered_student().await;

    let result = rate_uc(&f.store)
        .execute(f.teacher, 999, input("active", ""))
        .await;

    assert!(matches!(result, Err(PortalError::RegistrationNotFound)));
}

#[tokio::test]
async fn should_return_rated_registration() {
    let f = registered_student().await;

    let registration = rate_uc(&f.store)
        .execute(f.teacher, f.registration_id, input("active", ""))
        .await
        .unwrap();

    assert_eq!(registration.id, f.registration_id);
}

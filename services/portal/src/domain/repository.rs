#![allow(async_fn_in_trait)]

use drl_domain::score::ScoreEntry;

use crate::domain::types::{
    Account, Activity, ActivityOrder, EvaluationDraft, NewAccount, NewActivity,
    Registrant, Registration, ReportFilter,
};
use crate::error::PortalError;

/// Repository for login accounts.
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Account>, PortalError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, PortalError>;
    /// All accounts, newest first.
    async fn list(&self) -> Result<Vec<Account>, PortalError>;
    /// Fails with `UsernameTaken` if the username is already in use.
    async fn create(&self, account: &NewAccount) -> Result<Account, PortalError>;
    /// Overwrite every mutable column of `account`.
    async fn update(&self, account: &Account) -> Result<(), PortalError>;
    /// Delete an account and, through the store's cascades, its
    /// registrations and their evaluations. Evaluations the account wrote
    /// for other students are kept with the author cleared. Returns `true`
    /// if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, PortalError>;
}

/// Repository for the activity catalog.
pub trait ActivityRepository: Send + Sync {
    async fn list(&self, order: ActivityOrder) -> Result<Vec<Activity>, PortalError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Activity>, PortalError>;
    async fn create(&self, activity: &NewActivity) -> Result<Activity, PortalError>;
    async fn update(&self, activity: &Activity) -> Result<(), PortalError>;
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, PortalError>;
}

/// Repository for the registration ledger.
///
/// The store holds at most one row per `(user_id, activity_id)`. Writes are
/// conditional so that concurrent requests cannot create a second row.
pub trait RegistrationRepository: Send + Sync {
    async fn find(
        &self,
        user_id: i32,
        activity_id: i32,
    ) -> Result<Option<Registration>, PortalError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Registration>, PortalError>;

    /// Insert an active row unless one already exists for the pair.
    /// Returns `true` if this call inserted it.
    async fn insert_active(&self, user_id: i32, activity_id: i32) -> Result<bool, PortalError>;

    /// Clear `cancelled` and reset `registered_at` on a cancelled row.
    /// Returns `true` if the row was cancelled and is now active.
    async fn reactivate(&self, id: i32) -> Result<bool, PortalError>;

    /// Mark the pair's active row cancelled. Returns `true` if a row changed.
    async fn cancel_active(&self, user_id: i32, activity_id: i32) -> Result<bool, PortalError>;

    /// Active registrations for an activity with student and evaluation.
    async fn list_active_for_activity(
        &self,
        activity_id: i32,
    ) -> Result<Vec<Registrant>, PortalError>;
}

/// Repository for teacher evaluations.
pub trait EvaluationRepository: Send + Sync {
    /// Insert or overwrite the evaluation keyed by `draft.registration_id`.
    async fn upsert(&self, draft: &EvaluationDraft) -> Result<(), PortalError>;
}

/// Read model for participation reports.
pub trait ReportRepository: Send + Sync {
    /// Distinct non-empty class names of student accounts, sorted.
    async fn list_classes(&self) -> Result<Vec<String>, PortalError>;

    /// Student accounts selected by `filter`. `Nobody` selects none.
    async fn find_students(&self, filter: &ReportFilter) -> Result<Vec<Account>, PortalError>;

    /// Every registration of a student, cancelled ones included, with the
    /// activity's max score and the evaluation percent if rated.
    async fn score_entries(&self, user_id: i32) -> Result<Vec<ScoreEntry>, PortalError>;
}

/// Port for one-way password hashing. Implementations may be CPU-heavy and
/// must not block the async runtime.
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, PortalError>;
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PortalError>;
}

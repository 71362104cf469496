use tracing::info;

use drl_domain::role::Role;

use crate::domain::repository::{ActivityRepository, RegistrationRepository};
use crate::domain::types::{Caller, RegisterOutcome, Registrant, Registration};
use crate::error::PortalError;

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterUseCase<R: RegistrationRepository, A: ActivityRepository> {
    pub registrations: R,
    pub activities: A,
}

impl<R: RegistrationRepository, A: ActivityRepository> RegisterUseCase<R, A> {
    /// Sign the calling student up for an activity.
    ///
    /// | Existing row | Effect | Outcome |
    /// |--------------|--------|---------|
    /// | none | insert active row | `Created` |
    /// | cancelled | clear `cancelled`, reset `registered_at` | `Reactivated` |
    /// | active | nothing | `AlreadyRegistered` |
    ///
    /// A write that loses a race to a concurrent request changes nothing and
    /// reports `AlreadyRegistered`.
    pub async fn execute(
        &self,
        caller: Caller,
        activity_id: i32,
    ) -> Result<RegisterOutcome, PortalError> {
        caller.require(Role::Student)?;
        if self.activities.find_by_id(activity_id).await?.is_none() {
            return Err(PortalError::ActivityNotFound);
        }

        let outcome = match self.registrations.find(caller.user_id, activity_id).await? {
            None => {
                if self
                    .registrations
                    .insert_active(caller.user_id, activity_id)
                    .await?
                {
                    RegisterOutcome::Created
                } else {
                    RegisterOutcome::AlreadyRegistered
                }
            }
            Some(existing) if existing.cancelled => {
                if self.registrations.reactivate(existing.id).await? {
                    RegisterOutcome::Reactivated
                } else {
                    RegisterOutcome::AlreadyRegistered
                }
            }
            Some(_) => RegisterOutcome::AlreadyRegistered,
        };

        info!(
            user_id = caller.user_id,
            activity_id,
            outcome = ?outcome,
            "register"
        );
        Ok(outcome)
    }
}

// ── Cancel ───────────────────────────────────────────────────────────────────

pub struct CancelRegistrationUseCase<R: RegistrationRepository> {
    pub registrations: R,
}

impl<R: RegistrationRepository> CancelRegistrationUseCase<R> {
    /// Cancel the caller's active registration. Without one this is a no-op;
    /// returns `true` if a registration was cancelled.
    pub async fn execute(&self, caller: Caller, activity_id: i32) -> Result<bool, PortalError> {
        caller.require(Role::Student)?;
        let cancelled = self
            .registrations
            .cancel_active(caller.user_id, activity_id)
            .await?;
        if cancelled {
            info!(user_id = caller.user_id, activity_id, "registration cancelled");
        }
        Ok(cancelled)
    }
}

// ── FindOwnActive ────────────────────────────────────────────────────────────

pub struct FindOwnRegistrationUseCase<R: RegistrationRepository> {
    pub registrations: R,
}

impl<R: RegistrationRepository> FindOwnRegistrationUseCase<R> {
    /// The caller's active registration, if any. Non-students never have one.
    pub async fn execute(
        &self,
        caller: Caller,
        activity_id: i32,
    ) -> Result<Option<Registration>, PortalError> {
        if caller.role != Role::Student {
            return Ok(None);
        }
        Ok(self
            .registrations
            .find(caller.user_id, activity_id)
            .await?
            .filter(|r| !r.cancelled))
    }
}

// ── ListActiveForActivity ────────────────────────────────────────────────────

pub struct ListRegistrantsUseCase<R: RegistrationRepository> {
    pub registrations: R,
}

impl<R: RegistrationRepository> ListRegistrantsUseCase<R> {
    pub async fn execute(
        &self,
        caller: Caller,
        activity_id: i32,
    ) -> Result<Vec<Registrant>, PortalError> {
        caller.require_any(&[Role::Teacher, Role::Admin])?;
        self.registrations
            .list_active_for_activity(activity_id)
            .await
    }
}

use tracing::info;

use drl_domain::level::AttendanceLevel;
use drl_domain::role::Role;

use crate::domain::repository::{EvaluationRepository, RegistrationRepository};
use crate::domain::types::{Caller, EvaluationDraft, Registration};
use crate::error::PortalError;

/// Raw rating form.
#[derive(Debug, Clone, Default)]
pub struct RateInput {
    pub level: String,
    pub note: String,
}

pub struct RateUseCase<R: RegistrationRepository, E: EvaluationRepository> {
    pub registrations: R,
    pub evaluations: E,
}

impl<R: RegistrationRepository, E: EvaluationRepository> RateUseCase<R, E> {
    /// Record the calling teacher's rating for a registration, replacing any
    /// earlier rating. Returns the rated registration.
    pub async fn execute(
        &self,
        caller: Caller,
        registration_id: i32,
        input: RateInput,
    ) -> Result<Registration, PortalError> {
        caller.require(Role::Teacher)?;
        let level: AttendanceLevel = input
            .level
            .trim()
            .parse()
            .map_err(|_| PortalError::InvalidLevel)?;
        let registration = self
            .registrations
            .find_by_id(registration_id)
            .await?
            .ok_or(PortalError::RegistrationNotFound)?;

        self.evaluations
            .upsert(&EvaluationDraft {
                registration_id: registration.id,
                teacher_id: caller.user_id,
                level,
                percent: level.percent(),
                note: input.note,
            })
            .await?;
        info!(
            registration_id,
            teacher_id = caller.user_id,
            level = %level,
            "evaluation recorded"
        );
        Ok(registration)
    }
}

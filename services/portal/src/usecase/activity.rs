use tracing::info;

use drl_domain::role::Role;

use crate::domain::repository::ActivityRepository;
use crate::domain::types::{Activity, ActivityOrder, Caller, NewActivity};
use crate::error::PortalError;

/// Max score given to activities created without one.
pub const DEFAULT_MAX_SCORE: i32 = 10;

/// Parse the max-score form field. Blank yields `None`.
pub fn parse_max_score(raw: &str) -> Result<Option<i32>, PortalError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<i32>() {
        Ok(score) if score >= 0 => Ok(Some(score)),
        _ => Err(PortalError::InvalidMaxScore),
    }
}

/// Raw activity form.
#[derive(Debug, Clone, Default)]
pub struct ActivityInput {
    pub name: String,
    pub description: String,
    pub date: String,
    pub max_score: String,
}

// ── ListActivities ───────────────────────────────────────────────────────────

/// Catalog listing for any signed-in account, newest date first.
pub struct ListActivitiesUseCase<R: ActivityRepository> {
    pub repo: R,
}

impl<R: ActivityRepository> ListActivitiesUseCase<R> {
    pub async fn execute(&self, _caller: Caller) -> Result<Vec<Activity>, PortalError> {
        self.repo.list(ActivityOrder::DateDesc).await
    }
}

// ── AdminDashboard ───────────────────────────────────────────────────────────

pub struct AdminDashboardUseCase<R: ActivityRepository> {
    pub repo: R,
}

impl<R: ActivityRepository> AdminDashboardUseCase<R> {
    pub async fn execute(&self, caller: Caller) -> Result<Vec<Activity>, PortalError> {
        caller.require(Role::Admin)?;
        self.repo.list(ActivityOrder::CreatedDesc).await
    }
}

// ── GetActivity ──────────────────────────────────────────────────────────────

pub struct GetActivityUseCase<R: ActivityRepository> {
    pub repo: R,
}

impl<R: ActivityRepository> GetActivityUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Activity, PortalError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(PortalError::ActivityNotFound)
    }
}

// ── CreateActivity ───────────────────────────────────────────────────────────

pub struct CreateActivityUseCase<R: ActivityRepository> {
    pub repo: R,
}

impl<R: ActivityRepository> CreateActivityUseCase<R> {
    pub async fn execute(
        &self,
        caller: Caller,
        input: ActivityInput,
    ) -> Result<Activity, PortalError> {
        caller.require(Role::Admin)?;
        let name = input.name.trim();
        if name.is_empty() {
            return Err(PortalError::MissingData);
        }
        let max_score = parse_max_score(&input.max_score)?.unwrap_or(DEFAULT_MAX_SCORE);
        let activity = self
            .repo
            .create(&NewActivity {
                name: name.to_owned(),
                description: input.description,
                date: input.date.trim().to_owned(),
                max_score,
            })
            .await?;
        info!(activity_id = activity.id, by = caller.user_id, "activity created");
        Ok(activity)
    }
}

// ── UpdateActivity ───────────────────────────────────────────────────────────

pub struct UpdateActivityUseCase<R: ActivityRepository> {
    pub repo: R,
}

impl<R: ActivityRepository> UpdateActivityUseCase<R> {
    /// Blank fields keep their current value.
    pub async fn execute(
        &self,
        caller: Caller,
        id: i32,
        input: ActivityInput,
    ) -> Result<Activity, PortalError> {
        caller.require(Role::Admin)?;
        let mut activity = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(PortalError::ActivityNotFound)?;

        if let Some(max_score) = parse_max_score(&input.max_score)? {
            activity.max_score = max_score;
        }
        let name = input.name.trim();
        if !name.is_empty() {
            activity.name = name.to_owned();
        }
        let date = input.date.trim();
        if !date.is_empty() {
            activity.date = date.to_owned();
        }
        if !input.description.trim().is_empty() {
            activity.description = input.description;
        }

        self.repo.update(&activity).await?;
        info!(activity_id = activity.id, by = caller.user_id, "activity updated");
        Ok(activity)
    }
}

// ── DeleteActivity ───────────────────────────────────────────────────────────

pub struct DeleteActivityUseCase<R: ActivityRepository> {
    pub repo: R,
}

impl<R: ActivityRepository> DeleteActivityUseCase<R> {
    pub async fn execute(&self, caller: Caller, id: i32) -> Result<(), PortalError> {
        caller.require(Role::Admin)?;
        if !self.repo.delete(id).await? {
            return Err(PortalError::ActivityNotFound);
        }
        info!(activity_id = id, by = caller.user_id, "activity deleted");
        Ok(())
    }
}

use std::collections::HashMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr,
    sea_query::{Expr, OnConflict},
};

use drl_domain::level::AttendanceLevel;
use drl_domain::role::Role;
use drl_domain::score::ScoreEntry;
use drl_portal_schema::{activities, evaluations, registrations, users};

use crate::domain::repository::{
    AccountRepository, ActivityRepository, EvaluationRepository, RegistrationRepository,
    ReportRepository,
};
use crate::domain::types::{
    Account, Activity, ActivityOrder, Evaluation, EvaluationDraft, NewAccount, NewActivity,
    Registrant, Registration, ReportFilter,
};
use crate::error::PortalError;

// ── Account repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Account>, PortalError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(account_from_model).transpose()?)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, PortalError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(account_from_model).transpose()?)
    }

    async fn list(&self) -> Result<Vec<Account>, PortalError> {
        let models = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .order_by_desc(users::Column::Id)
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models
            .into_iter()
            .map(account_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn create(&self, account: &NewAccount) -> Result<Account, PortalError> {
        let model = users::ActiveModel {
            username: Set(account.username.clone()),
            fullname: Set(account.fullname.clone()),
            password_hash: Set(account.password_hash.clone()),
            role: Set(account.role.as_str().to_owned()),
            student_id: Set(account.student_id.clone()),
            class_name: Set(account.class_name.clone()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| username_conflict(e, "create user"))?;
        Ok(account_from_model(model)?)
    }

    async fn update(&self, account: &Account) -> Result<(), PortalError> {
        users::ActiveModel {
            id: Set(account.id),
            username: Set(account.username.clone()),
            fullname: Set(account.fullname.clone()),
            password_hash: Set(account.password_hash.clone()),
            role: Set(account.role.as_str().to_owned()),
            student_id: Set(account.student_id.clone()),
            class_name: Set(account.class_name.clone()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| username_conflict(e, "update user"))?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, PortalError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }
}

/// The unique index on `users.username` backs the use-case check, so a
/// concurrent create or rename surfaces as `UsernameTaken` too.
fn username_conflict(err: DbErr, context: &'static str) -> PortalError {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        PortalError::UsernameTaken
    } else {
        PortalError::Internal(anyhow::Error::new(err).context(context))
    }
}

fn account_from_model(model: users::Model) -> anyhow::Result<Account> {
    let role = model
        .role
        .parse::<Role>()
        .with_context(|| format!("stored role of user {}", model.id))?;
    Ok(Account {
        id: model.id,
        username: model.username,
        fullname: model.fullname,
        password_hash: model.password_hash,
        role,
        student_id: model.student_id,
        class_name: model.class_name,
        created_at: model.created_at,
    })
}

// ── Activity repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbActivityRepository {
    pub db: DatabaseConnection,
}

impl ActivityRepository for DbActivityRepository {
    async fn list(&self, order: ActivityOrder) -> Result<Vec<Activity>, PortalError> {
        let query = match order {
            ActivityOrder::DateDesc => {
                activities::Entity::find().order_by_desc(activities::Column::Date)
            }
            ActivityOrder::CreatedDesc => {
                activities::Entity::find().order_by_desc(activities::Column::CreatedAt)
            }
        };
        let models = query
            .order_by_desc(activities::Column::Id)
            .all(&self.db)
            .await
            .context("list activities")?;
        Ok(models.into_iter().map(activity_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Activity>, PortalError> {
        let model = activities::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find activity by id")?;
        Ok(model.map(activity_from_model))
    }

    async fn create(&self, activity: &NewActivity) -> Result<Activity, PortalError> {
        let model = activities::ActiveModel {
            name: Set(activity.name.clone()),
            description: Set(activity.description.clone()),
            date: Set(activity.date.clone()),
            max_score: Set(activity.max_score),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create activity")?;
        Ok(activity_from_model(model))
    }

    async fn update(&self, activity: &Activity) -> Result<(), PortalError> {
        activities::ActiveModel {
            id: Set(activity.id),
            name: Set(activity.name.clone()),
            description: Set(activity.description.clone()),
            date: Set(activity.date.clone()),
            max_score: Set(activity.max_score),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update activity")?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, PortalError> {
        let result = activities::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete activity")?;
        Ok(result.rows_affected > 0)
    }
}

fn activity_from_model(model: activities::Model) -> Activity {
    Activity {
        id: model.id,
        name: model.name,
        description: model.description,
        date: model.date,
        max_score: model.max_score,
        created_at: model.created_at,
    }
}

// ── Registration repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRegistrationRepository {
    pub db: DatabaseConnection,
}

impl RegistrationRepository for DbRegistrationRepository {
    async fn find(
        &self,
        user_id: i32,
        activity_id: i32,
    ) -> Result<Option<Registration>, PortalError> {
        let model = registrations::Entity::find()
            .filter(registrations::Column::UserId.eq(user_id))
            .filter(registrations::Column::ActivityId.eq(activity_id))
            .one(&self.db)
            .await
            .context("find registration")?;
        Ok(model.map(registration_from_model))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Registration>, PortalError> {
        let model = registrations::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find registration by id")?;
        Ok(model.map(registration_from_model))
    }

    async fn insert_active(&self, user_id: i32, activity_id: i32) -> Result<bool, PortalError> {
        let result = registrations::Entity::insert(registrations::ActiveModel {
            user_id: Set(user_id),
            activity_id: Set(activity_id),
            registered_at: Set(Utc::now()),
            cancelled: Set(false),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([
                registrations::Column::UserId,
                registrations::Column::ActivityId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await;
        match result {
            Ok(rows) => Ok(rows > 0),
            Err(DbErr::RecordNotInserted) => Ok(false),
            Err(e) => Err(anyhow::Error::new(e).context("insert registration").into()),
        }
    }

    async fn reactivate(&self, id: i32) -> Result<bool, PortalError> {
        let result = registrations::Entity::update_many()
            .col_expr(registrations::Column::Cancelled, Expr::value(false))
            .col_expr(registrations::Column::RegisteredAt, Expr::value(Utc::now()))
            .filter(registrations::Column::Id.eq(id))
            .filter(registrations::Column::Cancelled.eq(true))
            .exec(&self.db)
            .await
            .context("reactivate registration")?;
        Ok(result.rows_affected > 0)
    }

    async fn cancel_active(&self, user_id: i32, activity_id: i32) -> Result<bool, PortalError> {
        let result = registrations::Entity::update_many()
            .col_expr(registrations::Column::Cancelled, Expr::value(true))
            .filter(registrations::Column::UserId.eq(user_id))
            .filter(registrations::Column::ActivityId.eq(activity_id))
            .filter(registrations::Column::Cancelled.eq(false))
            .exec(&self.db)
            .await
            .context("cancel registration")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_active_for_activity(
        &self,
        activity_id: i32,
    ) -> Result<Vec<Registrant>, PortalError> {
        let rows = registrations::Entity::find()
            .filter(registrations::Column::ActivityId.eq(activity_id))
            .filter(registrations::Column::Cancelled.eq(false))
            .find_also_related(users::Entity)
            .order_by_asc(registrations::Column::RegisteredAt)
            .order_by_asc(registrations::Column::Id)
            .all(&self.db)
            .await
            .context("list active registrations")?;

        let ids: Vec<i32> = rows.iter().map(|(reg, _)| reg.id).collect();
        let mut evaluations = evaluations_by_registration(&self.db, ids).await?;

        let mut registrants = Vec::with_capacity(rows.len());
        for (reg, user) in rows {
            let Some(user) = user else { continue };
            registrants.push(Registrant {
                evaluation: evaluations.remove(&reg.id),
                registration: registration_from_model(reg),
                student: account_from_model(user)?,
            });
        }
        Ok(registrants)
    }
}

fn registration_from_model(model: registrations::Model) -> Registration {
    Registration {
        id: model.id,
        user_id: model.user_id,
        activity_id: model.activity_id,
        registered_at: model.registered_at,
        cancelled: model.cancelled,
    }
}

// ── Evaluation repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEvaluationRepository {
    pub db: DatabaseConnection,
}

impl EvaluationRepository for DbEvaluationRepository {
    async fn upsert(&self, draft: &EvaluationDraft) -> Result<(), PortalError> {
        evaluations::Entity::insert(evaluations::ActiveModel {
            registration_id: Set(draft.registration_id),
            teacher_id: Set(Some(draft.teacher_id)),
            level: Set(draft.level.as_str().to_owned()),
            percent: Set(draft.percent),
            note: Set(draft.note.clone()),
            evaluated_at: Set(Utc::now()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(evaluations::Column::RegistrationId)
                .update_columns([
                    evaluations::Column::TeacherId,
                    evaluations::Column::Level,
                    evaluations::Column::Percent,
                    evaluations::Column::Note,
                    evaluations::Column::EvaluatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("upsert evaluation")?;
        Ok(())
    }
}

async fn evaluations_by_registration(
    db: &DatabaseConnection,
    registration_ids: Vec<i32>,
) -> Result<HashMap<i32, Evaluation>, PortalError> {
    if registration_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let models = evaluations::Entity::find()
        .filter(evaluations::Column::RegistrationId.is_in(registration_ids))
        .all(db)
        .await
        .context("list evaluations by registration")?;
    let mut map = HashMap::with_capacity(models.len());
    for model in models {
        let evaluation = evaluation_from_model(model)?;
        map.insert(evaluation.registration_id, evaluation);
    }
    Ok(map)
}

fn evaluation_from_model(model: evaluations::Model) -> anyhow::Result<Evaluation> {
    let level = model
        .level
        .parse::<AttendanceLevel>()
        .with_context(|| format!("stored level of evaluation {}", model.id))?;
    Ok(Evaluation {
        id: model.id,
        registration_id: model.registration_id,
        teacher_id: model.teacher_id,
        level,
        percent: model.percent,
        note: model.note,
        evaluated_at: model.evaluated_at,
    })
}

// ── Report repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReportRepository {
    pub db: DatabaseConnection,
}

impl ReportRepository for DbReportRepository {
    async fn list_classes(&self) -> Result<Vec<String>, PortalError> {
        let classes: Vec<String> = users::Entity::find()
            .select_only()
            .column(users::Column::ClassName)
            .filter(users::Column::Role.eq(Role::Student.as_str()))
            .filter(users::Column::ClassName.is_not_null())
            .filter(users::Column::ClassName.ne(""))
            .distinct()
            .order_by_asc(users::Column::ClassName)
            .into_tuple()
            .all(&self.db)
            .await
            .context("list classes")?;
        Ok(classes)
    }

    async fn find_students(&self, filter: &ReportFilter) -> Result<Vec<Account>, PortalError> {
        let query = users::Entity::find().filter(users::Column::Role.eq(Role::Student.as_str()));
        let query = match filter {
            ReportFilter::Class(class) => query.filter(users::Column::ClassName.eq(class.as_str())),
            ReportFilter::StudentId(student_id) => {
                query.filter(users::Column::StudentId.eq(student_id.as_str()))
            }
            ReportFilter::Nobody => return Ok(Vec::new()),
        };
        let models = query
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .context("find report students")?;
        Ok(models
            .into_iter()
            .map(account_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn score_entries(&self, user_id: i32) -> Result<Vec<ScoreEntry>, PortalError> {
        let rows = registrations::Entity::find()
            .filter(registrations::Column::UserId.eq(user_id))
            .find_also_related(activities::Entity)
            .order_by_asc(registrations::Column::Id)
            .all(&self.db)
            .await
            .context("list student registrations")?;

        let ids: Vec<i32> = rows.iter().map(|(reg, _)| reg.id).collect();
        let evaluations = evaluations_by_registration(&self.db, ids).await?;

        Ok(rows
            .into_iter()
            .filter_map(|(reg, activity)| {
                let activity = activity?;
                Some(ScoreEntry {
                    activity_name: activity.name,
                    max_score: activity.max_score,
                    cancelled: reg.cancelled,
                    percent: evaluations.get(&reg.id).map(|e| e.percent),
                })
            })
            .collect())
    }
}

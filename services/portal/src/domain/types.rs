use chrono::{DateTime, Utc};

use drl_domain::level::AttendanceLevel;
use drl_domain::role::Role;
use drl_domain::score::ScoreCard;

use crate::error::PortalError;

/// The signed-in account performing an operation.
///
/// Built per request from the session cookie and the account's current row,
/// then handed to every use case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i32,
    pub role: Role,
}

impl Caller {
    pub fn new(user_id: i32, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn require(&self, role: Role) -> Result<(), PortalError> {
        self.require_any(&[role])
    }

    pub fn require_any(&self, roles: &[Role]) -> Result<(), PortalError> {
        if roles.contains(&self.role) {
            Ok(())
        } else {
            Err(PortalError::Forbidden)
        }
    }
}

impl From<&Account> for Caller {
    fn from(account: &Account) -> Self {
        Self::new(account.id, account.role)
    }
}

#[derive(Debug, Clone)]
pub struct Account {
    pub id: i32,
    pub username: String,
    pub fullname: String,
    pub password_hash: String,
    pub role: Role,
    pub student_id: Option<String>,
    pub class_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Full name, falling back to the username when none was entered.
    pub fn display_name(&self) -> &str {
        if self.fullname.is_empty() {
            &self.username
        } else {
            &self.fullname
        }
    }
}

/// Account row to insert. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub fullname: String,
    pub password_hash: String,
    pub role: Role,
    pub student_id: Option<String>,
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Free text as entered by the admin; sorts lexically.
    pub date: String,
    pub max_score: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub name: String,
    pub description: String,
    pub date: String,
    pub max_score: i32,
}

/// Catalog ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityOrder {
    /// Newest `date` first. Student and teacher listings.
    DateDesc,
    /// Most recently created first. Admin dashboard.
    CreatedDesc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub id: i32,
    pub user_id: i32,
    pub activity_id: i32,
    pub registered_at: DateTime<Utc>,
    pub cancelled: bool,
}

/// Result of a register request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Created,
    Reactivated,
    AlreadyRegistered,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub id: i32,
    pub registration_id: i32,
    /// `None` once the rating teacher's account is deleted. The rating stays.
    pub teacher_id: Option<i32>,
    pub level: AttendanceLevel,
    pub percent: f64,
    pub note: String,
    pub evaluated_at: DateTime<Utc>,
}

/// Values written by an evaluation upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationDraft {
    pub registration_id: i32,
    pub teacher_id: i32,
    pub level: AttendanceLevel,
    pub percent: f64,
    pub note: String,
}

/// An active registration joined with the student and their rating.
#[derive(Debug, Clone)]
pub struct Registrant {
    pub registration: Registration,
    pub student: Account,
    pub evaluation: Option<Evaluation>,
}

/// Which students a report covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportFilter {
    Class(String),
    StudentId(String),
    Nobody,
}

impl ReportFilter {
    /// Class wins when both are given; blank values count as absent.
    pub fn from_params(class: Option<&str>, student_id: Option<&str>) -> Self {
        let class = class.map(str::trim).filter(|c| !c.is_empty());
        let student_id = student_id.map(str::trim).filter(|s| !s.is_empty());
        match (class, student_id) {
            (Some(class), _) => Self::Class(class.to_owned()),
            (None, Some(student_id)) => Self::StudentId(student_id.to_owned()),
            (None, None) => Self::Nobody,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StudentReport {
    pub student: Account,
    pub card: ScoreCard,
}

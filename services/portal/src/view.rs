//! Presentation helpers shared by the page templates.

use chrono::{DateTime, Utc};

use drl_domain::level::AttendanceLevel;
use drl_domain::role::Role;

use crate::domain::types::{Account, Activity, Registrant, StudentReport};

/// Navigation bar state rendered by `base.html`.
#[derive(Debug, Clone, Default)]
pub struct Nav {
    pub signed_in: bool,
    pub fullname: String,
    pub role: String,
    pub is_admin: bool,
    pub is_teacher: bool,
}

impl Nav {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_account(account: &Account) -> Self {
        Self {
            signed_in: true,
            fullname: account.display_name().to_owned(),
            role: account.role.as_str().to_owned(),
            is_admin: account.role == Role::Admin,
            is_teacher: account.role == Role::Teacher,
        }
    }
}

/// One-shot message shown at the top of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub text: String,
    /// Bootstrap-style category: `success`, `info`, `warning` or `danger`.
    pub kind: &'static str,
}

impl Flash {
    pub fn new(kind: &'static str, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// Resolve the `?notice=` code left by a POST-redirect-GET round trip.
    /// Unknown codes are ignored.
    pub fn from_notice(code: Option<&str>) -> Option<Self> {
        let (kind, text) = match code? {
            "logged_in" => ("success", "Đăng nhập thành công"),
            "logged_out" => ("info", "Đã đăng xuất"),
            "registered" => ("success", "Đăng ký thành công!"),
            "already_registered" => ("info", "Bạn đã đăng ký hoạt động này."),
            "cancelled" => ("info", "Bạn đã hủy đăng ký."),
            "students_only" => ("warning", "Chỉ sinh viên mới được đăng ký."),
            "activity_created" => ("success", "Thêm hoạt động thành công"),
            "activity_updated" => ("success", "Cập nhật hoạt động"),
            "activity_deleted" => ("success", "Xóa hoạt động thành công"),
            "account_updated" => ("success", "Cập nhật tài khoản"),
            "account_deleted" => ("info", "Đã xóa tài khoản"),
            "rated" => ("success", "Đã lưu đánh giá"),
            _ => return None,
        };
        Some(Self::new(kind, text))
    }
}

/// Format a point or percent value with two decimals.
pub fn two_decimals(value: f64) -> String {
    format!("{value:.2}")
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Admin => "Quản trị",
        Role::Teacher => "Giáo viên",
        Role::Student => "Sinh viên",
    }
}

fn level_label(level: AttendanceLevel) -> &'static str {
    match level {
        AttendanceLevel::None => "Không tham gia",
        AttendanceLevel::Attend => "Có tham gia",
        AttendanceLevel::Active => "Tích cực",
    }
}

/// `<option>` entry for a select box.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

pub fn role_options(current: Option<Role>) -> Vec<SelectOption> {
    Role::ALL
        .iter()
        .map(|&role| SelectOption {
            value: role.as_str().to_owned(),
            label: role_label(role).to_owned(),
            selected: Some(role) == current,
        })
        .collect()
}

pub fn level_options(current: Option<AttendanceLevel>) -> Vec<SelectOption> {
    AttendanceLevel::ALL
        .iter()
        .map(|&level| SelectOption {
            value: level.as_str().to_owned(),
            label: format!("{} ({}%)", level_label(level), level.percent()),
            selected: Some(level) == current,
        })
        .collect()
}

pub fn class_options(classes: Vec<String>, selected: Option<&str>) -> Vec<SelectOption> {
    classes
        .into_iter()
        .map(|class| SelectOption {
            selected: Some(class.as_str()) == selected,
            label: class.clone(),
            value: class,
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ActivityRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub date: String,
    pub max_score: i32,
}

impl From<Activity> for ActivityRow {
    fn from(activity: Activity) -> Self {
        Self {
            id: activity.id,
            name: activity.name,
            description: activity.description,
            date: activity.date,
            max_score: activity.max_score,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AccountRow {
    pub id: i32,
    pub username: String,
    pub fullname: String,
    pub role: String,
    pub role_label: String,
    pub student_id: String,
    pub class_name: String,
    pub created_at: String,
}

impl From<Account> for AccountRow {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            role: account.role.as_str().to_owned(),
            role_label: role_label(account.role).to_owned(),
            username: account.username,
            fullname: account.fullname,
            student_id: account.student_id.unwrap_or_default(),
            class_name: account.class_name.unwrap_or_default(),
            created_at: timestamp(account.created_at),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegistrantRow {
    pub registration_id: i32,
    pub fullname: String,
    pub username: String,
    pub student_id: String,
    pub class_name: String,
    pub registered_at: String,
    pub rated: bool,
    pub level: String,
    pub percent: String,
    pub note: String,
    pub levels: Vec<SelectOption>,
}

impl From<Registrant> for RegistrantRow {
    fn from(registrant: Registrant) -> Self {
        let level = registrant.evaluation.as_ref().map(|e| e.level);
        let percent = registrant.evaluation.as_ref().map_or(0.0, |e| e.percent);
        Self {
            registration_id: registrant.registration.id,
            fullname: registrant.student.display_name().to_owned(),
            username: registrant.student.username,
            student_id: registrant.student.student_id.unwrap_or_default(),
            class_name: registrant.student.class_name.unwrap_or_default(),
            registered_at: timestamp(registrant.registration.registered_at),
            rated: level.is_some(),
            level: level.map(level_label).unwrap_or_default().to_owned(),
            percent: two_decimals(percent),
            note: registrant.evaluation.map(|e| e.note).unwrap_or_default(),
            levels: level_options(level),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportLineRow {
    pub activity_name: String,
    pub max_score: i32,
    pub percent: String,
    pub point: String,
}

#[derive(Debug, Clone)]
pub struct ReportRow {
    pub fullname: String,
    pub student_id: String,
    pub class_name: String,
    pub total: String,
    pub lines: Vec<ReportLineRow>,
}

impl From<StudentReport> for ReportRow {
    fn from(report: StudentReport) -> Self {
        Self {
            fullname: report.student.display_name().to_owned(),
            student_id: report.student.student_id.unwrap_or_default(),
            class_name: report.student.class_name.unwrap_or_default(),
            total: two_decimals(report.card.total),
            lines: report
                .card
                .lines
                .into_iter()
                .map(|line| ReportLineRow {
                    activity_name: line.activity_name,
                    max_score: line.max_score,
                    percent: two_decimals(line.percent),
                    point: two_decimals(line.point),
                })
                .collect(),
        }
    }
}

//! Attendance levels recorded by teachers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Attendance level for a single registration.
///
/// Each level maps to a fixed share of the activity's maximum score:
///
/// | Level    | Percent |
/// |----------|---------|
/// | `none`   | 0       |
/// | `attend` | 80      |
/// | `active` | 100     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceLevel {
    None,
    Attend,
    Active,
}

/// Returned when a level string is not one of the known levels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown attendance level: {0}")]
pub struct UnknownLevel(pub String);

impl AttendanceLevel {
    pub const ALL: [AttendanceLevel; 3] = [
        AttendanceLevel::None,
        AttendanceLevel::Attend,
        AttendanceLevel::Active,
    ];

    pub fn percent(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Attend => 80.0,
            Self::Active => 100.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Attend => "attend",
            Self::Active => "active",
        }
    }
}

impl fmt::Display for AttendanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "attend" => Ok(Self::Attend),
            "active" => Ok(Self::Active),
            other => Err(UnknownLevel(other.to_owned())),
        }
    }
}

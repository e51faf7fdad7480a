use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

use crate::engine::duration::RawDuration;

/// Attendance bucket for a day.
///
/// The UI surface has four buckets; for reconciliation only `Absent` and
/// `OnLeave` trigger a deduction, `Permission` behaves like `Present`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Permission,
    #[strum(serialize = "On Leave")]
    OnLeave,
}

impl AttendanceStatus {
    /// Boundary adapter for the loosely typed status strings the UI sends.
    /// Anything unrecognized is treated as `Present` so no leave is charged
    /// on a guess.
    pub fn from_loose(raw: &str) -> Self {
        let key: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "absent" => AttendanceStatus::Absent,
            "permission" => AttendanceStatus::Permission,
            "onleave" | "leave" => AttendanceStatus::OnLeave,
            _ => AttendanceStatus::Present,
        }
    }

    pub fn is_deductible(&self) -> bool {
        matches!(self, AttendanceStatus::Absent | AttendanceStatus::OnLeave)
    }
}

impl From<String> for AttendanceStatus {
    fn from(raw: String) -> Self {
        AttendanceStatus::from_loose(&raw)
    }
}

impl From<AttendanceStatus> for String {
    fn from(status: AttendanceStatus) -> Self {
        status.to_string()
    }
}

/// One employee-day of attendance as the API collaborator stores it.
/// `worked`/`ot` keep whatever encoding was entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub employee_id: u64,
    #[schema(example = "2026-03-02", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "Present", value_type = String)]
    pub status: AttendanceStatus,
    #[serde(default)]
    #[schema(example = "8 hrs 17 mins", value_type = Object, nullable = true)]
    pub worked: Option<RawDuration>,
    #[serde(default)]
    #[schema(example = "01:30", value_type = Object, nullable = true)]
    pub ot: Option<RawDuration>,
    #[serde(default)]
    #[schema(example = "09:05")]
    pub clock_in: Option<String>,
    #[serde(default)]
    #[schema(example = "18:20")]
    pub clock_out: Option<String>,
}

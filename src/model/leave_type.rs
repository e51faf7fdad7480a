use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Leave pools an employee can draw from.
///
/// `LOP` (loss of pay) has no balance of its own; it is what an absence
/// becomes once every other pool is exhausted.
#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum LeaveType {
    EL,
    CL,
    SL,
    LOP,
}

/// Order in which auto-deduction walks the pools. Changing it changes
/// who gets paid for what, so it is fixed.
pub const DEDUCTION_PRIORITY: [LeaveType; 3] = [LeaveType::CL, LeaveType::EL, LeaveType::SL];

impl LeaveType {
    /// True for the pools that carry an allocation.
    pub fn has_balance(&self) -> bool {
        !matches!(self, LeaveType::LOP)
    }
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema, Display, AsRefStr, EnumString,
)]
pub enum LeaveStatus {
    Draft,
    Submitted,
    #[serde(rename = "HR_Approved")]
    #[strum(serialize = "HR_Approved")]
    HrApproved,
    #[serde(rename = "HR_Rejected")]
    #[strum(serialize = "HR_Rejected")]
    HrRejected,
    Cancelled,
    AutoProcessed,
}

impl LeaveStatus {
    /// Statuses that keep a date range reserved for the employee.
    pub fn blocks_overlap(&self) -> bool {
        matches!(
            self,
            LeaveStatus::Submitted | LeaveStatus::HrApproved | LeaveStatus::AutoProcessed
        )
    }

    /// Statuses whose days have actually been charged.
    pub fn is_charged(&self) -> bool {
        matches!(self, LeaveStatus::HrApproved | LeaveStatus::AutoProcessed)
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::leave_type::{LeaveStatus, LeaveType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": 1,
    "employeeId": 1000,
    "leaveType": "CL",
    "startDate": "2026-01-05",
    "endDate": "2026-01-07",
    "totalDays": 3,
    "reason": "Family function",
    "status": "Submitted",
    "hrApproverId": null
}))]
pub struct LeaveRequest {
    /// Assigned by the persistence layer; absent on freshly built requests
    #[serde(default)]
    pub id: Option<u64>,
    pub employee_id: u64,
    pub leave_type: LeaveType,
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-07", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    /// Business days charged, fixed at submission time
    pub total_days: u32,
    #[serde(default)]
    pub reason: String,
    pub status: LeaveStatus,
    #[serde(default)]
    pub hr_approver_id: Option<u64>,
}

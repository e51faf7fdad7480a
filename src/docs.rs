use crate::api::attendance::{ClockPair, SummaryRequest};
use crate::api::balance::{ApplyPolicy, EnsureBalance};
use crate::api::duration::{DurationResponse, FormatDuration, ParseDuration};
use crate::api::leave_request::{
    AutoDeduct, BusinessDaysQuery, BusinessDaysResponse, CancelLeave, DecideLeave, OverlapQuery,
    SubmitLeave, UsageQuery,
};
use crate::engine::reconcile::{AutoDeduction, LeaveApplication};
use crate::engine::summary::{Granularity, LeaveUsage, PeriodSummary};
use crate::model::attendance::AttendanceRecord;
use crate::model::holiday::Holiday;
use crate::model::leave_balance::{LeaveBalance, LeavePolicy};
use crate::model::leave_request::LeaveRequest;
use crate::model::leave_type::{LeaveStatus, LeaveType};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Engine API",
        version = "1.0.0",
        description = r#"
## Attendance & Leave Reconciliation

Stateless rules engine behind the employee-management application. Every call
carries the snapshot it needs (balances, requests, holidays) and returns the
result; storing it is up to the caller.

### 🔹 Key Features
- **Duration normalization**
  - "8 hrs 17 mins", "08:17", "8h17m", decimal hours → minutes, and back
- **Attendance**
  - Clock-in/out worked time, monthly and yearly worked/OT rollups
- **Leave**
  - Business-day counting, overlap checks, submission validation,
    HR decisions, cancellation, auto-deduction by CL → EL → SL priority
- **Balances**
  - Ensure a yearly balance exists, apply a new allocation policy to everyone

### 📦 Response Format
- JSON in and out
- Rule violations come back as `{"message": ..., "code": ...}`

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::duration::parse_duration,
        crate::api::duration::format_duration,

        crate::api::attendance::worked,
        crate::api::attendance::attendance_summary,

        crate::api::leave_request::business_days,
        crate::api::leave_request::overlap,
        crate::api::leave_request::submit_leave,
        crate::api::leave_request::decide_leave,
        crate::api::leave_request::cancel_leave,
        crate::api::leave_request::auto_deduct,
        crate::api::leave_request::leave_usage,

        crate::api::balance::ensure_balance,
        crate::api::balance::apply_policy
    ),
    components(
        schemas(
            ParseDuration,
            FormatDuration,
            DurationResponse,
            ClockPair,
            SummaryRequest,
            Granularity,
            PeriodSummary,
            AttendanceRecord,
            BusinessDaysQuery,
            BusinessDaysResponse,
            OverlapQuery,
            SubmitLeave,
            LeaveApplication,
            DecideLeave,
            CancelLeave,
            AutoDeduct,
            AutoDeduction,
            UsageQuery,
            LeaveUsage,
            EnsureBalance,
            ApplyPolicy,
            LeaveRequest,
            LeaveBalance,
            LeavePolicy,
            LeaveType,
            LeaveStatus,
            Holiday
        )
    ),
    tags(
        (name = "Duration", description = "Duration parsing and formatting"),
        (name = "Attendance", description = "Worked time and attendance rollups"),
        (name = "Leave", description = "Leave request rules"),
        (name = "Balance", description = "Leave balance allocation"),
    )
)]
pub struct ApiDoc;

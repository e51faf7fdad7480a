use actix_web::{HttpResponse, Responder, web};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::engine::calendar::{active_holidays, business_day_count, ranges_overlap};
use crate::engine::reconcile::{self, LeaveApplication};
use crate::engine::summary;
use crate::model::attendance::AttendanceStatus;
use crate::model::holiday::Holiday;
use crate::model::leave_balance::LeaveBalance;
use crate::model::leave_request::LeaveRequest;

#[derive(Deserialize, ToSchema)]
pub struct BusinessDaysQuery {
    #[schema(example = "2026-03-02", format = "date", value_type = String)]
    pub from: NaiveDate,
    #[schema(example = "2026-03-06", format = "date", value_type = String)]
    pub to: NaiveDate,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDaysResponse {
    #[schema(example = 5)]
    pub total_days: u32,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverlapQuery {
    #[schema(format = "date", value_type = String)]
    pub a_start: NaiveDate,
    #[schema(format = "date", value_type = String)]
    pub a_end: NaiveDate,
    #[schema(format = "date", value_type = String)]
    pub b_start: NaiveDate,
    #[schema(format = "date", value_type = String)]
    pub b_end: NaiveDate,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLeave {
    pub application: LeaveApplication,
    /// The employee's other requests, as currently stored
    #[serde(default)]
    pub existing_requests: Vec<LeaveRequest>,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    pub balance: LeaveBalance,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DecideLeave {
    pub request: LeaveRequest,
    #[schema(example = true)]
    pub approve: bool,
    #[schema(example = 2)]
    pub hr_id: u64,
}

#[derive(Deserialize, ToSchema)]
pub struct CancelLeave {
    pub request: LeaveRequest,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutoDeduct {
    #[schema(example = 1000)]
    pub employee_id: u64,
    /// "Present", "Absent", "Permission" or "On Leave"; anything else counts as present
    #[schema(example = "Absent", value_type = String)]
    pub status: AttendanceStatus,
    pub balance: LeaveBalance,
    /// Defaults to today
    #[serde(default)]
    #[schema(example = "2026-03-02", format = "date", value_type = Option<String>)]
    pub date: Option<NaiveDate>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageQuery {
    #[schema(example = 1000)]
    pub employee_id: u64,
    #[schema(example = 2026)]
    pub year: i32,
    #[serde(default)]
    pub requests: Vec<LeaveRequest>,
}

/// Count business days in a range
#[utoipa::path(
    post,
    path = "/api/v1/leave/business-days",
    request_body(content = BusinessDaysQuery, content_type = "application/json"),
    responses(
        (status = 200, description = "Weekdays that are not active holidays", body = BusinessDaysResponse)
    ),
    tag = "Leave"
)]
pub async fn business_days(payload: web::Json<BusinessDaysQuery>) -> actix_web::Result<impl Responder> {
    let holidays = active_holidays(&payload.holidays);
    let total_days = business_day_count(payload.from, payload.to, &holidays);
    Ok(HttpResponse::Ok().json(BusinessDaysResponse { total_days }))
}

/// Check whether two date ranges collide
#[utoipa::path(
    post,
    path = "/api/v1/leave/overlap",
    request_body(content = OverlapQuery, content_type = "application/json"),
    responses(
        (status = 200, description = "Overlap flag", body = Object, example = json!({"overlap": true}))
    ),
    tag = "Leave"
)]
pub async fn overlap(payload: web::Json<OverlapQuery>) -> actix_web::Result<impl Responder> {
    let overlap = ranges_overlap(payload.a_start, payload.a_end, payload.b_start, payload.b_end);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "overlap": overlap })))
}

/* =========================
Submit leave request
========================= */
/// Validate and build a leave request
#[utoipa::path(
    post,
    path = "/api/v1/leave/submit",
    request_body(
        content = SubmitLeave,
        description = "Application plus the employee's current requests, holidays and balance",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Request built in Submitted state", body = LeaveRequest),
        (status = 400, description = "InvalidDateRange, NoPayableDays or BalanceMismatch", body = Object, example = json!({
            "message": "2026-03-07 to 2026-03-08 contains no business days",
            "code": "NoPayableDays"
        })),
        (status = 409, description = "OverlappingLeave"),
        (status = 422, description = "InsufficientBalance")
    ),
    tag = "Leave"
)]
pub async fn submit_leave(payload: web::Json<SubmitLeave>) -> actix_web::Result<impl Responder> {
    let holidays = active_holidays(&payload.holidays);
    let request = reconcile::submit_leave_request(
        &payload.application,
        &payload.existing_requests,
        &holidays,
        &payload.balance,
    )?;

    tracing::info!(
        employee_id = request.employee_id,
        leave_type = %request.leave_type,
        total_days = request.total_days,
        "Leave request submitted"
    );
    Ok(HttpResponse::Created().json(request))
}

/* =========================
Approve / reject (HR)
========================= */
/// HR decision on a submitted request
#[utoipa::path(
    post,
    path = "/api/v1/leave/decide",
    request_body(content = DecideLeave, content_type = "application/json"),
    responses(
        (status = 200, description = "Request moved to HR_Approved or HR_Rejected", body = LeaveRequest),
        (status = 409, description = "Request is not in Submitted state", body = Object, example = json!({
            "message": "request is already HR_Approved",
            "code": "AlreadyActioned"
        }))
    ),
    tag = "Leave"
)]
pub async fn decide_leave(payload: web::Json<DecideLeave>) -> actix_web::Result<impl Responder> {
    let decided = reconcile::decide_request(&payload.request, payload.approve, payload.hr_id)?;
    tracing::info!(
        employee_id = decided.employee_id,
        hr_id = payload.hr_id,
        status = %decided.status,
        "Leave request decided"
    );
    Ok(HttpResponse::Ok().json(decided))
}

/// Cancel a request
#[utoipa::path(
    post,
    path = "/api/v1/leave/cancel",
    request_body(content = CancelLeave, content_type = "application/json"),
    responses(
        (status = 200, description = "Request cancelled; balances are not credited back", body = LeaveRequest),
        (status = 409, description = "Already cancelled")
    ),
    tag = "Leave"
)]
pub async fn cancel_leave(payload: web::Json<CancelLeave>) -> actix_web::Result<impl Responder> {
    let cancelled = reconcile::cancel_request(&payload.request)?;
    Ok(HttpResponse::Ok().json(cancelled))
}

/// Charge one day for a non-present attendance mark
#[utoipa::path(
    post,
    path = "/api/v1/leave/auto-deduct",
    request_body(content = AutoDeduct, content_type = "application/json"),
    responses(
        (status = 200, description = "Outcome, synthesized request (if any) and updated balance", body = AutoDeduction)
    ),
    tag = "Leave"
)]
pub async fn auto_deduct(payload: web::Json<AutoDeduct>) -> actix_web::Result<impl Responder> {
    let date = payload.date.unwrap_or_else(|| Local::now().date_naive());
    let result = reconcile::auto_deduct(payload.employee_id, payload.status, &payload.balance, date);
    Ok(HttpResponse::Ok().json(result))
}

/// Charged days per leave type for a year
#[utoipa::path(
    post,
    path = "/api/v1/leave/usage",
    request_body(content = UsageQuery, content_type = "application/json"),
    responses(
        (status = 200, description = "Usage report", body = LeaveUsage)
    ),
    tag = "Leave"
)]
pub async fn leave_usage(payload: web::Json<UsageQuery>) -> actix_web::Result<impl Responder> {
    let usage = summary::leave_usage(&payload.requests, payload.employee_id, payload.year);
    Ok(HttpResponse::Ok().json(usage))
}

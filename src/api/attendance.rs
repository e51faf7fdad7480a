use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::duration::DurationResponse;
use crate::engine::duration;
use crate::engine::summary::{self, Granularity};
use crate::model::attendance::AttendanceRecord;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClockPair {
    #[schema(example = "09:05")]
    pub clock_in: String,
    #[schema(example = "6:20 PM")]
    pub clock_out: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SummaryRequest {
    pub records: Vec<AttendanceRecord>,
    #[serde(default)]
    pub granularity: Granularity,
}

/// Worked time between a clock-in and clock-out
#[utoipa::path(
    post,
    path = "/api/v1/attendance/worked",
    request_body(content = ClockPair, content_type = "application/json"),
    responses(
        (status = 200, description = "Worked duration", body = DurationResponse)
    ),
    tag = "Attendance"
)]
pub async fn worked(payload: web::Json<ClockPair>) -> actix_web::Result<impl Responder> {
    let minutes = duration::worked_between(&payload.clock_in, &payload.clock_out);
    Ok(HttpResponse::Ok().json(DurationResponse::from_minutes(minutes)))
}

/// Monthly or yearly worked/OT rollup
#[utoipa::path(
    post,
    path = "/api/v1/attendance/summary",
    request_body(content = SummaryRequest, content_type = "application/json"),
    responses(
        (status = 200, description = "One entry per period, oldest first", body = Vec<PeriodSummary>)
    ),
    tag = "Attendance"
)]
pub async fn attendance_summary(payload: web::Json<SummaryRequest>) -> actix_web::Result<impl Responder> {
    let summary = summary::summarize(&payload.records, payload.granularity);
    tracing::debug!(
        records = payload.records.len(),
        periods = summary.len(),
        "Attendance summary built"
    );
    Ok(HttpResponse::Ok().json(summary))
}

use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::engine::duration::{self, RawDuration};

#[derive(Deserialize, ToSchema)]
pub struct ParseDuration {
    /// Free text such as "8 hrs 17 mins" / "08:17", or a number
    #[serde(default)]
    #[schema(example = "8h 17m", value_type = Object, nullable = true)]
    pub raw: Option<RawDuration>,
}

#[derive(Deserialize, ToSchema)]
pub struct FormatDuration {
    #[schema(example = 497)]
    pub minutes: u64,
}

#[derive(Serialize, ToSchema)]
pub struct DurationResponse {
    #[schema(example = 497)]
    pub minutes: u64,
    #[schema(example = "8 hrs 17 mins")]
    pub formatted: String,
}

impl DurationResponse {
    pub fn from_minutes(minutes: u64) -> Self {
        Self {
            minutes,
            formatted: duration::format(minutes),
        }
    }
}

/// Normalize a duration to minutes
#[utoipa::path(
    post,
    path = "/api/v1/duration/parse",
    request_body(content = ParseDuration, content_type = "application/json"),
    responses(
        (status = 200, description = "Parsed duration; unreadable input is 0", body = DurationResponse)
    ),
    tag = "Duration"
)]
pub async fn parse_duration(payload: web::Json<ParseDuration>) -> actix_web::Result<impl Responder> {
    let minutes = duration::parse(payload.raw.as_ref());
    Ok(HttpResponse::Ok().json(DurationResponse::from_minutes(minutes)))
}

/// Render minutes as "x hrs y mins"
#[utoipa::path(
    post,
    path = "/api/v1/duration/format",
    request_body(content = FormatDuration, content_type = "application/json"),
    responses(
        (status = 200, description = "Formatted duration", body = DurationResponse)
    ),
    tag = "Duration"
)]
pub async fn format_duration(payload: web::Json<FormatDuration>) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(DurationResponse::from_minutes(payload.minutes)))
}

use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::config::Config;
use crate::engine::reconcile;
use crate::model::leave_balance::{LeaveBalance, LeavePolicy};

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnsureBalance {
    #[schema(example = 1000)]
    pub employee_id: u64,
    #[schema(example = 2026)]
    pub year: i32,
    /// Balances already stored for the employee
    #[serde(default)]
    pub existing: Vec<LeaveBalance>,
    /// Falls back to the service's configured default policy
    #[serde(default)]
    pub policy: Option<LeavePolicy>,
}

#[derive(Deserialize, ToSchema)]
pub struct ApplyPolicy {
    pub policy: LeavePolicy,
    /// Every employee's balance; the whole set is returned updated
    pub balances: Vec<LeaveBalance>,
}

/// Find or create an employee's balance for a year
#[utoipa::path(
    post,
    path = "/api/v1/balance/ensure",
    request_body(content = EnsureBalance, content_type = "application/json"),
    responses(
        (status = 200, description = "Existing or freshly allocated balance", body = LeaveBalance)
    ),
    tag = "Balance"
)]
pub async fn ensure_balance(
    config: web::Data<Config>,
    payload: web::Json<EnsureBalance>,
) -> actix_web::Result<impl Responder> {
    let policy = payload.policy.unwrap_or(config.default_policy);
    let balance =
        reconcile::ensure_balance(payload.employee_id, payload.year, &payload.existing, &policy);
    Ok(HttpResponse::Ok().json(balance))
}

/// Reallocate every balance under a new policy
#[utoipa::path(
    post,
    path = "/api/v1/balance/policy",
    request_body(content = ApplyPolicy, content_type = "application/json"),
    responses(
        (status = 200, description = "All balances with new allocations; usage is kept", body = Vec<LeaveBalance>)
    ),
    tag = "Balance"
)]
pub async fn apply_policy(payload: web::Json<ApplyPolicy>) -> actix_web::Result<impl Responder> {
    let updated = reconcile::apply_policy(&payload.policy, &payload.balances);
    Ok(HttpResponse::Ok().json(updated))
}

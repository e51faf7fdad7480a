use crate::{
    api::{attendance, balance, duration, leave_request},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{Scope, web};

/// Built once in `main`; every worker's `Governor` shares its buckets.
pub fn build_limiter(requests_per_min: u32) -> GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };
    GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .expect("per_millisecond and burst_size are non-zero")
}

pub fn configure(
    cfg: &mut web::ServiceConfig,
    config: &Config,
    limiter: &GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>,
) {
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Governor::new(limiter)) // rate limiting
            .service(v1_scope()),
    );
}

/// Engine routes, without rate limiting.
pub fn v1_scope() -> Scope {
    web::scope("/v1")
        .service(
            web::scope("/duration")
                // /duration/parse
                .service(web::resource("/parse").route(web::post().to(duration::parse_duration)))
                // /duration/format
                .service(web::resource("/format").route(web::post().to(duration::format_duration))),
        )
        .service(
            web::scope("/attendance")
                .service(web::resource("/worked").route(web::post().to(attendance::worked)))
                .service(
                    web::resource("/summary").route(web::post().to(attendance::attendance_summary)),
                ),
        )
        .service(
            web::scope("/leave")
                .service(
                    web::resource("/business-days")
                        .route(web::post().to(leave_request::business_days)),
                )
                .service(web::resource("/overlap").route(web::post().to(leave_request::overlap)))
                .service(web::resource("/submit").route(web::post().to(leave_request::submit_leave)))
                .service(web::resource("/decide").route(web::post().to(leave_request::decide_leave)))
                .service(web::resource("/cancel").route(web::post().to(leave_request::cancel_leave)))
                .service(
                    web::resource("/auto-deduct").route(web::post().to(leave_request::auto_deduct)),
                )
                .service(web::resource("/usage").route(web::post().to(leave_request::leave_usage))),
        )
        .service(
            web::scope("/balance")
                .service(web::resource("/ensure").route(web::post().to(balance::ensure_balance)))
                .service(web::resource("/policy").route(web::post().to(balance::apply_policy))),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test, web::Data};
    use serde_json::{Value, json};

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(Data::new(Config::default()))
                    .service(web::scope("/api").service(v1_scope())),
            )
            .await
        };
    }

    fn balance_json(cl: u32, el: u32, sl: u32) -> Value {
        json!({
            "employeeId": 42,
            "year": 2026,
            "EL_allocated": el, "EL_used": 0,
            "CL_allocated": cl, "CL_used": 0,
            "SL_allocated": sl, "SL_used": 0
        })
    }

    #[actix_web::test]
    async fn parse_duration_route() {
        let app = app!();
        for (raw, minutes) in [
            (json!("8 hrs 17 mins"), 497),
            (json!(2.5), 150),
            (json!(90), 90),
            (json!(null), 0),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/v1/duration/parse")
                .set_json(json!({ "raw": raw }))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["minutes"], minutes);
        }
    }

    #[actix_web::test]
    async fn format_duration_route() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/duration/format")
            .set_json(json!({ "minutes": 125 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["formatted"], "2 hrs 5 mins");
    }

    #[actix_web::test]
    async fn attendance_summary_route() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/attendance/summary")
            .set_json(json!({
                "records": [
                    {"employeeId": 1, "date": "2026-03-02", "status": "Present", "worked": "8:17", "ot": "30m"},
                    {"employeeId": 1, "date": "2026-03-03", "status": "On Leave"},
                    {"employeeId": 1, "date": "2026-04-01", "status": "Present", "clockIn": "09:00", "clockOut": "17:00"}
                ]
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body[0]["period"], "2026-03");
        assert_eq!(body[0]["workedMinutes"], 497);
        assert_eq!(body[0]["onLeave"], 1);
        assert_eq!(body[1]["worked"], "8 hrs");
    }

    #[actix_web::test]
    async fn submit_route_returns_created_request() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/leave/submit")
            .set_json(json!({
                "application": {
                    "employeeId": 42, "leaveType": "EL",
                    "from": "2026-03-02", "to": "2026-03-06", "reason": "Trip"
                },
                "holidays": [
                    {"date": "2026-03-04", "title": "Holi", "isActive": true},
                    {"date": "2026-03-05", "title": "Old", "isActive": false}
                ],
                "balance": balance_json(0, 10, 0)
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "Submitted");
        assert_eq!(body["totalDays"], 4);
    }

    #[actix_web::test]
    async fn submit_route_maps_insufficient_balance() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/leave/submit")
            .set_json(json!({
                "application": {
                    "employeeId": 42, "leaveType": "CL",
                    "from": "2026-03-02", "to": "2026-03-04"
                },
                "balance": balance_json(2, 10, 10)
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "InsufficientBalance");
    }

    #[actix_web::test]
    async fn decide_route_refuses_approved_request() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/leave/decide")
            .set_json(json!({
                "request": {
                    "id": 3, "employeeId": 42, "leaveType": "EL",
                    "startDate": "2026-03-02", "endDate": "2026-03-02",
                    "totalDays": 1, "reason": "", "status": "HR_Approved"
                },
                "approve": false,
                "hrId": 2
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "AlreadyActioned");
    }

    #[actix_web::test]
    async fn auto_deduct_route_charges_earned_leave() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/leave/auto-deduct")
            .set_json(json!({
                "employeeId": 42,
                "status": "Absent",
                "date": "2026-03-02",
                "balance": balance_json(0, 3, 5)
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["outcome"], json!({"kind": "Charged", "leaveType": "EL"}));
        assert_eq!(body["balance"]["EL_available"], 2);
        assert_eq!(body["balance"]["EL_used"], 1);
        assert_eq!(body["request"]["status"], "AutoProcessed");
        assert_eq!(body["request"]["reason"], "Auto deduction (Absent)");
    }

    #[actix_web::test]
    async fn ensure_balance_route_uses_configured_policy() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/balance/ensure")
            .set_json(json!({ "employeeId": 9, "year": 2027 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["employeeId"], 9);
        assert_eq!(body["CL_available"], 12);
    }

    #[actix_web::test]
    async fn policy_route_keeps_usage() {
        let app = app!();
        let mut b = balance_json(6, 12, 6);
        b["EL_used"] = json!(5);
        let req = test::TestRequest::post()
            .uri("/api/v1/balance/policy")
            .set_json(json!({ "policy": {"EL": 15, "CL": 6, "SL": 6}, "balances": [b] }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body[0]["EL_available"], 10);
        assert_eq!(body[0]["EL_used"], 5);
    }
}

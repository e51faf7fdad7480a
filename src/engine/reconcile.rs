//! Leave balance reconciliation.
//!
//! Pure transitions over snapshots the caller fetched: nothing here talks
//! to storage. Operations return new records and leave their inputs alone,
//! so a caller that applied a result optimistically can roll back to the
//! value it still holds if the write that follows fails.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use crate::engine::calendar::{business_day_count, ranges_overlap};
use crate::error::LeaveError;
use crate::model::attendance::AttendanceStatus;
use crate::model::leave_balance::{LeaveBalance, LeavePolicy};
use crate::model::leave_request::LeaveRequest;
use crate::model::leave_type::{DEDUCTION_PRIORITY, LeaveStatus, LeaveType};

/// What an employee asked for, before validation.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveApplication {
    #[schema(example = 1000)]
    pub employee_id: u64,
    #[schema(example = "CL")]
    pub leave_type: LeaveType,
    #[schema(example = "2026-03-02", format = "date", value_type = String)]
    pub from: NaiveDate,
    #[schema(example = "2026-03-04", format = "date", value_type = String)]
    pub to: NaiveDate,
    #[serde(default)]
    #[schema(example = "Family function")]
    pub reason: String,
}

/// Validates an application against the employee's other requests and
/// balance and builds the `Submitted` request.
///
/// Checks run in a fixed order and the first failure wins. `totalDays` on
/// the result is what gets charged; it is not recomputed if the holiday
/// calendar changes later. LOP has no pool and skips the balance check.
pub fn submit_leave_request(
    application: &LeaveApplication,
    existing: &[LeaveRequest],
    holidays: &BTreeSet<NaiveDate>,
    balance: &LeaveBalance,
) -> Result<LeaveRequest, LeaveError> {
    let LeaveApplication {
        employee_id,
        leave_type,
        from,
        to,
        ..
    } = *application;

    let result = validate(application, existing, holidays, balance);
    if let Err(e) = &result {
        debug!(employee_id, %leave_type, %from, %to, code = e.code(), "Leave application rejected");
    }
    let total_days = result?;

    Ok(LeaveRequest {
        id: None,
        employee_id,
        leave_type,
        start_date: from,
        end_date: to,
        total_days,
        reason: application.reason.clone(),
        status: LeaveStatus::Submitted,
        hr_approver_id: None,
    })
}

fn validate(
    application: &LeaveApplication,
    existing: &[LeaveRequest],
    holidays: &BTreeSet<NaiveDate>,
    balance: &LeaveBalance,
) -> Result<u32, LeaveError> {
    let (from, to) = (application.from, application.to);

    if to < from {
        return Err(LeaveError::InvalidDateRange { from, to });
    }

    let days = business_day_count(from, to, holidays);
    if days == 0 {
        return Err(LeaveError::NoPayableDays { from, to });
    }

    if let Some(clash) = existing.iter().find(|r| {
        r.employee_id == application.employee_id
            && r.status.blocks_overlap()
            && ranges_overlap(from, to, r.start_date, r.end_date)
    }) {
        return Err(LeaveError::OverlappingLeave {
            start_date: clash.start_date,
            end_date: clash.end_date,
            status: clash.status,
        });
    }

    if application.leave_type.has_balance() {
        if balance.employee_id != application.employee_id || balance.year != from.year() {
            return Err(LeaveError::BalanceMismatch {
                employee_id: balance.employee_id,
                year: balance.year,
            });
        }
        let available = balance.available(application.leave_type);
        if days > available {
            return Err(LeaveError::InsufficientBalance {
                leave_type: application.leave_type,
                requested: days,
                available,
            });
        }
    }

    Ok(days)
}

/// HR approves or rejects a `Submitted` request. Balances are not touched.
pub fn decide_request(
    request: &LeaveRequest,
    approve: bool,
    acting_hr_id: u64,
) -> Result<LeaveRequest, LeaveError> {
    if request.status != LeaveStatus::Submitted {
        return Err(LeaveError::AlreadyActioned {
            status: request.status,
        });
    }

    let mut decided = request.clone();
    decided.status = if approve {
        LeaveStatus::HrApproved
    } else {
        LeaveStatus::HrRejected
    };
    decided.hr_approver_id = Some(acting_hr_id);
    Ok(decided)
}

/// Cancels a request from any status other than `Cancelled`.
///
/// Days already charged for an approved or auto-processed request are not
/// credited back.
pub fn cancel_request(request: &LeaveRequest) -> Result<LeaveRequest, LeaveError> {
    if request.status == LeaveStatus::Cancelled {
        return Err(LeaveError::AlreadyCancelled);
    }
    let mut cancelled = request.clone();
    cancelled.status = LeaveStatus::Cancelled;
    Ok(cancelled)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "leaveType")]
pub enum DeductionOutcome {
    /// Status does not call for a deduction.
    NotRequired,
    Charged(LeaveType),
    /// Every pool was empty; the day is loss of pay.
    LossOfPay,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutoDeduction {
    #[schema(value_type = Object, example = json!({"kind": "Charged", "leaveType": "EL"}))]
    pub outcome: DeductionOutcome,
    /// Present only when a pool was charged
    pub request: Option<LeaveRequest>,
    pub balance: LeaveBalance,
}

/// Charges one day for a non-present attendance mark.
///
/// Pools are tried in [`DEDUCTION_PRIORITY`] order and the first with
/// anything left pays. When all are empty nothing is charged, no request is
/// built, and the day is logged as LOP.
pub fn auto_deduct(
    employee_id: u64,
    status: AttendanceStatus,
    balance: &LeaveBalance,
    date: NaiveDate,
) -> AutoDeduction {
    let mut balance = balance.clone();
    balance.rederive();

    if !status.is_deductible() {
        return AutoDeduction {
            outcome: DeductionOutcome::NotRequired,
            request: None,
            balance,
        };
    }

    let Some(leave_type) = DEDUCTION_PRIORITY
        .into_iter()
        .find(|t| balance.available(*t) > 0)
    else {
        warn!(employee_id, %date, %status, "No leave balance left, day recorded as LOP");
        return AutoDeduction {
            outcome: DeductionOutcome::LossOfPay,
            request: None,
            balance,
        };
    };

    balance.debit(leave_type, 1);
    info!(employee_id, %date, %status, %leave_type, "Auto deducted one day");

    let request = LeaveRequest {
        id: None,
        employee_id,
        leave_type,
        start_date: date,
        end_date: date,
        total_days: 1,
        reason: format!("Auto deduction ({})", status),
        status: LeaveStatus::AutoProcessed,
        hr_approver_id: None,
    };

    AutoDeduction {
        outcome: DeductionOutcome::Charged(leave_type),
        request: Some(request),
        balance,
    }
}

/// Moves every balance onto a new policy in one pass. Usage carries over.
///
/// The whole batch is built before anything is returned, so the caller
/// either persists all of it or none.
pub fn apply_policy(policy: &LeavePolicy, balances: &[LeaveBalance]) -> Vec<LeaveBalance> {
    let updated: Vec<LeaveBalance> = balances
        .iter()
        .map(|b| {
            let mut b = b.clone();
            b.reallocate(policy);
            b
        })
        .collect();

    info!(
        count = updated.len(),
        el = policy.el,
        cl = policy.cl,
        sl = policy.sl,
        "Leave policy applied"
    );
    updated
}

/// The employee's balance for `year`, or a fresh one from `policy`.
pub fn ensure_balance(
    employee_id: u64,
    year: i32,
    existing: &[LeaveBalance],
    policy: &LeavePolicy,
) -> LeaveBalance {
    match existing
        .iter()
        .find(|b| b.employee_id == employee_id && b.year == year)
    {
        Some(found) => {
            let mut found = found.clone();
            found.rederive();
            found
        }
        None => {
            log::info!("Creating {} leave balance for employee {}", year, employee_id);
            LeaveBalance::from_policy(employee_id, year, policy)
        }
    }
}

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::NaiveDate;
use derive_more::{Display, Error};
use serde_json::json;
use strum_macros::IntoStaticStr;

use crate::model::leave_type::{LeaveStatus, LeaveType};

/// Why the reconciliation engine refused an operation.
///
/// All of these are local and recoverable; the caller decides how to
/// present them.
#[derive(Debug, Display, Error, IntoStaticStr, Clone, PartialEq, Eq)]
pub enum LeaveError {
    #[display(fmt = "end date {} is before start date {}", to, from)]
    InvalidDateRange { from: NaiveDate, to: NaiveDate },

    #[display(fmt = "{} to {} contains no business days", from, to)]
    NoPayableDays { from: NaiveDate, to: NaiveDate },

    #[display(
        fmt = "overlaps an existing {} request from {} to {}",
        status,
        start_date,
        end_date
    )]
    OverlappingLeave {
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: LeaveStatus,
    },

    #[display(
        fmt = "{} days of {} requested but only {} available",
        requested,
        leave_type,
        available
    )]
    InsufficientBalance {
        leave_type: LeaveType,
        requested: u32,
        available: u32,
    },

    #[display(
        fmt = "balance is for employee {} in {}, which does not match the application",
        employee_id,
        year
    )]
    BalanceMismatch { employee_id: u64, year: i32 },

    #[display(fmt = "request is already {}", status)]
    AlreadyActioned { status: LeaveStatus },

    #[display(fmt = "request is already cancelled")]
    AlreadyCancelled,
}

impl LeaveError {
    pub fn code(&self) -> &'static str {
        self.into()
    }
}

impl ResponseError for LeaveError {
    fn status_code(&self) -> StatusCode {
        match self {
            LeaveError::InvalidDateRange { .. }
            | LeaveError::NoPayableDays { .. }
            | LeaveError::BalanceMismatch { .. } => StatusCode::BAD_REQUEST,
            LeaveError::OverlappingLeave { .. }
            | LeaveError::AlreadyActioned { .. }
            | LeaveError::AlreadyCancelled => StatusCode::CONFLICT,
            LeaveError::InsufficientBalance { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string(),
            "code": self.code()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_variant_name() {
        let err = LeaveError::AlreadyActioned {
            status: LeaveStatus::HrApproved,
        };
        assert_eq!(err.code(), "AlreadyActioned");
        assert_eq!(err.to_string(), "request is already HR_Approved");
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn balance_mismatch_is_bad_request() {
        let err = LeaveError::BalanceMismatch {
            employee_id: 7,
            year: 2025,
        };
        assert_eq!(err.code(), "BalanceMismatch");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn insufficient_balance_is_unprocessable() {
        let err = LeaveError::InsufficientBalance {
            leave_type: LeaveType::CL,
            requested: 3,
            available: 2,
        };
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "3 days of CL requested but only 2 available");
    }
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::leave_type::LeaveType;

/// Per-year allocation for the three pools that carry a balance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"EL": 15, "CL": 12, "SL": 10}))]
pub struct LeavePolicy {
    #[serde(rename = "EL")]
    pub el: u32,
    #[serde(rename = "CL")]
    pub cl: u32,
    #[serde(rename = "SL")]
    pub sl: u32,
}

/// Read-only view of one pool.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Pool {
    pub allocated: u32,
    pub used: u32,
    pub available: u32,
}

/// Leave balance of one employee for one year.
///
/// `available` is always `max(0, allocated - used)`; every mutation goes
/// through [`LeaveBalance::rederive`] to keep it that way. Reads go through
/// [`LeaveBalance::pool`], which derives it again, so a stale value coming
/// off the wire is never trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalance {
    pub employee_id: u64,
    pub year: i32,
    #[serde(rename = "EL_allocated")]
    pub el_allocated: u32,
    #[serde(rename = "EL_used")]
    pub el_used: u32,
    #[serde(rename = "EL_available", default)]
    pub el_available: u32,
    #[serde(rename = "CL_allocated")]
    pub cl_allocated: u32,
    #[serde(rename = "CL_used")]
    pub cl_used: u32,
    #[serde(rename = "CL_available", default)]
    pub cl_available: u32,
    #[serde(rename = "SL_allocated")]
    pub sl_allocated: u32,
    #[serde(rename = "SL_used")]
    pub sl_used: u32,
    #[serde(rename = "SL_available", default)]
    pub sl_available: u32,
}

impl LeaveBalance {
    /// Fresh balance with nothing used yet.
    pub fn from_policy(employee_id: u64, year: i32, policy: &LeavePolicy) -> Self {
        let mut balance = LeaveBalance {
            employee_id,
            year,
            el_allocated: policy.el,
            el_used: 0,
            el_available: 0,
            cl_allocated: policy.cl,
            cl_used: 0,
            cl_available: 0,
            sl_allocated: policy.sl,
            sl_used: 0,
            sl_available: 0,
        };
        balance.rederive();
        balance
    }

    pub fn pool(&self, leave_type: LeaveType) -> Option<Pool> {
        let (allocated, used) = match leave_type {
            LeaveType::EL => (self.el_allocated, self.el_used),
            LeaveType::CL => (self.cl_allocated, self.cl_used),
            LeaveType::SL => (self.sl_allocated, self.sl_used),
            LeaveType::LOP => return None,
        };
        Some(Pool {
            allocated,
            used,
            available: allocated.saturating_sub(used),
        })
    }

    /// Days left in a pool. LOP never has any.
    pub fn available(&self, leave_type: LeaveType) -> u32 {
        self.pool(leave_type).map(|p| p.available).unwrap_or(0)
    }

    /// Charges `days` against a pool. No-op for LOP.
    pub fn debit(&mut self, leave_type: LeaveType, days: u32) {
        match leave_type {
            LeaveType::EL => self.el_used += days,
            LeaveType::CL => self.cl_used += days,
            LeaveType::SL => self.sl_used += days,
            LeaveType::LOP => return,
        }
        self.rederive();
    }

    /// Replaces every allocation, keeping usage.
    pub fn reallocate(&mut self, policy: &LeavePolicy) {
        self.el_allocated = policy.el;
        self.cl_allocated = policy.cl;
        self.sl_allocated = policy.sl;
        self.rederive();
    }

    pub fn rederive(&mut self) {
        self.el_available = self.el_allocated.saturating_sub(self.el_used);
        self.cl_available = self.cl_allocated.saturating_sub(self.cl_used);
        self.sl_available = self.sl_allocated.saturating_sub(self.sl_used);
    }
}

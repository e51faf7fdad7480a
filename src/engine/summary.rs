//! Monthly and yearly rollups over attendance and leave records.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use utoipa::ToSchema;

use crate::engine::duration::{self, RawDuration};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::leave_request::LeaveRequest;
use crate::model::leave_type::LeaveType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Month,
    Year,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    /// `YYYY-MM` or `YYYY`
    #[schema(example = "2026-03")]
    pub period: String,
    pub worked_minutes: u64,
    pub ot_minutes: u64,
    #[schema(example = "164 hrs 20 mins")]
    pub worked: String,
    #[schema(example = "6 hrs")]
    pub ot: String,
    pub present: u32,
    pub absent: u32,
    pub permission: u32,
    pub on_leave: u32,
}

/// Worked minutes for one record. An empty `worked` field falls back to the
/// clock-in/out pair when both are there.
pub fn worked_minutes(record: &AttendanceRecord) -> u64 {
    let entered = match &record.worked {
        Some(RawDuration::Text(s)) if s.trim().is_empty() => None,
        other => other.as_ref(),
    };

    match (entered, &record.clock_in, &record.clock_out) {
        (Some(raw), _, _) => duration::parse(Some(raw)),
        (None, Some(clock_in), Some(clock_out)) => duration::worked_between(clock_in, clock_out),
        _ => 0,
    }
}

/// Groups records into periods, oldest first.
pub fn summarize(records: &[AttendanceRecord], granularity: Granularity) -> Vec<PeriodSummary> {
    let mut periods: BTreeMap<String, PeriodSummary> = BTreeMap::new();

    for record in records {
        let period = match granularity {
            Granularity::Month => record.date.format("%Y-%m").to_string(),
            Granularity::Year => record.date.format("%Y").to_string(),
        };
        let entry = periods.entry(period.clone()).or_insert_with(|| PeriodSummary {
            period,
            ..Default::default()
        });

        entry.worked_minutes = entry.worked_minutes.saturating_add(worked_minutes(record));
        entry.ot_minutes = entry
            .ot_minutes
            .saturating_add(duration::parse(record.ot.as_ref()));

        match record.status {
            AttendanceStatus::Present => entry.present += 1,
            AttendanceStatus::Absent => entry.absent += 1,
            AttendanceStatus::Permission => entry.permission += 1,
            AttendanceStatus::OnLeave => entry.on_leave += 1,
        }
    }

    periods
        .into_values()
        .map(|mut s| {
            s.worked = duration::format(s.worked_minutes);
            s.ot = duration::format(s.ot_minutes);
            s
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveUsage {
    pub employee_id: u64,
    pub year: i32,
    /// Charged days per leave type; every type is listed
    #[schema(value_type = Object, example = json!({"EL": 4, "CL": 2, "SL": 0, "LOP": 1}))]
    pub days: BTreeMap<LeaveType, u32>,
}

/// Days an employee has been charged per leave type in `year`, counting
/// approved and auto-processed requests by their start date.
pub fn leave_usage(requests: &[LeaveRequest], employee_id: u64, year: i32) -> LeaveUsage {
    let mut days: BTreeMap<LeaveType, u32> = LeaveType::iter().map(|t| (t, 0)).collect();

    for request in requests.iter().filter(|r| {
        r.employee_id == employee_id && r.status.is_charged() && r.start_date.year() == year
    }) {
        *days.entry(request.leave_type).or_insert(0) += request.total_days;
    }

    LeaveUsage {
        employee_id,
        year,
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::leave_type::LeaveStatus;
    use chrono::NaiveDate;

    fn record(
        date: (i32, u32, u32),
        status: AttendanceStatus,
        worked: Option<RawDuration>,
        ot: Option<RawDuration>,
    ) -> AttendanceRecord {
        AttendanceRecord {
            employee_id: 1,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            status,
            worked,
            ot,
            clock_in: None,
            clock_out: None,
        }
    }

    #[test]
    fn month_rollup_sums_mixed_encodings() {
        let records = vec![
            record((2026, 3, 2), AttendanceStatus::Present, Some("8 hrs 17 mins".into()), Some("1:30".into())),
            record((2026, 3, 3), AttendanceStatus::Present, Some("08:00".into()), Some(RawDuration::Number(0.5))),
            record((2026, 3, 4), AttendanceStatus::Present, Some(RawDuration::Number(7.5)), None),
            record((2026, 3, 5), AttendanceStatus::Absent, None, None),
            record((2026, 3, 6), AttendanceStatus::Permission, Some("bogus".into()), None),
            record((2026, 2, 27), AttendanceStatus::OnLeave, None, None),
        ];

        let summary = summarize(&records, Granularity::Month);
        assert_eq!(summary.len(), 2);

        let feb = &summary[0];
        assert_eq!(feb.period, "2026-02");
        assert_eq!(feb.on_leave, 1);
        assert_eq!(feb.worked, "0 mins");

        let mar = &summary[1];
        assert_eq!(mar.period, "2026-03");
        assert_eq!(mar.worked_minutes, 497 + 480 + 450);
        assert_eq!(mar.worked, "23 hrs 47 mins");
        assert_eq!(mar.ot_minutes, 120);
        assert_eq!(mar.ot, "2 hrs");
        assert_eq!((mar.present, mar.absent, mar.permission, mar.on_leave), (3, 1, 1, 0));
    }

    #[test]
    fn year_rollup_merges_months() {
        let records = vec![
            record((2025, 12, 31), AttendanceStatus::Present, Some("8".into()), None),
            record((2026, 1, 2), AttendanceStatus::Present, Some("8".into()), None),
            record((2026, 6, 1), AttendanceStatus::Present, Some("90".into()), None),
        ];
        let summary = summarize(&records, Granularity::Year);
        let periods: Vec<_> = summary.iter().map(|s| s.period.as_str()).collect();
        assert_eq!(periods, ["2025", "2026"]);
        // a bare integer string is hours, so "90" is 90 hours
        assert_eq!(summary[1].worked_minutes, 480 + 90 * 60);
    }

    #[test]
    fn huge_numeric_rows_do_not_stop_the_rollup() {
        let records = vec![
            record((2026, 3, 2), AttendanceStatus::Present, Some(RawDuration::Number(1e300)), None),
            record((2026, 3, 3), AttendanceStatus::Present, Some(RawDuration::Number(1e300)), None),
            record((2026, 3, 4), AttendanceStatus::Present, Some(RawDuration::Number(1.8e19)), Some(RawDuration::Number(1.8e19))),
            record((2026, 3, 5), AttendanceStatus::Present, Some(RawDuration::Number(1.8e19)), Some(RawDuration::Number(1.8e19))),
        ];
        let summary = summarize(&records, Granularity::Month);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].present, 4);
        assert_eq!(summary[0].worked_minutes, u64::MAX);
        assert_eq!(summary[0].ot_minutes, u64::MAX);
    }

    #[test]
    fn blank_worked_uses_clock_times() {
        let mut r = record((2026, 3, 2), AttendanceStatus::Present, Some("  ".into()), None);
        r.clock_in = Some("09:00".into());
        r.clock_out = Some("17:30".into());
        assert_eq!(worked_minutes(&r), 510);

        r.worked = Some("4h".into());
        assert_eq!(worked_minutes(&r), 240);

        r.worked = None;
        r.clock_out = None;
        assert_eq!(worked_minutes(&r), 0);
    }

    #[test]
    fn usage_counts_only_charged_requests_in_year() {
        let req = |leave_type, status, y, days| LeaveRequest {
            id: None,
            employee_id: 1,
            leave_type,
            start_date: NaiveDate::from_ymd_opt(y, 5, 4).unwrap(),
            end_date: NaiveDate::from_ymd_opt(y, 5, 4).unwrap(),
            total_days: days,
            reason: String::new(),
            status,
            hr_approver_id: None,
        };
        let requests = vec![
            req(LeaveType::EL, LeaveStatus::HrApproved, 2026, 3),
            req(LeaveType::EL, LeaveStatus::AutoProcessed, 2026, 1),
            req(LeaveType::CL, LeaveStatus::Submitted, 2026, 2),
            req(LeaveType::SL, LeaveStatus::Cancelled, 2026, 2),
            req(LeaveType::SL, LeaveStatus::HrApproved, 2025, 5),
        ];
        let usage = leave_usage(&requests, 1, 2026);
        assert_eq!(usage.days[&LeaveType::EL], 4);
        assert_eq!(usage.days[&LeaveType::CL], 0);
        assert_eq!(usage.days[&LeaveType::SL], 0);
        assert_eq!(usage.days[&LeaveType::LOP], 0);
    }
}

//! Attendance context for payslip calculations.
//!
//! This module contains the [`AttendanceContext`] value object that carries
//! the calendar month, year, and leave count for an attendance-prorated
//! payroll calculation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The calendar month and leave count a payslip is calculated for.
///
/// The constructor validates the month and leave count and derives the
/// number of days in the month, so a constructed context is always
/// arithmetically safe to divide by.
///
/// Months are 1-12 (chrono convention). Leave days exceeding the days in
/// the month are rejected rather than silently clamped.
///
/// # Example
///
/// ```
/// use salary_engine::models::AttendanceContext;
///
/// let attendance = AttendanceContext::new(2, 2026, 3).unwrap();
/// assert_eq!(attendance.days_in_month(), 28);
/// assert_eq!(attendance.payable_days(), 25);
///
/// // February 2026 has 28 days
/// assert!(AttendanceContext::new(2, 2026, 29).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceContext {
    month: u32,
    year: i32,
    leave_days: u32,
    days_in_month: u32,
}

impl AttendanceContext {
    /// Creates a validated attendance context.
    ///
    /// # Arguments
    ///
    /// * `month` - The calendar month, 1-12
    /// * `year` - The calendar year
    /// * `leave_days` - The number of unpaid leave days taken in the month
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if:
    /// - `month` is outside 1-12
    /// - `year` is outside chrono's representable range
    /// - `leave_days` exceeds the number of days in the month
    pub fn new(month: u32, year: i32, leave_days: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidInput {
                field: "month".to_string(),
                message: format!("must be between 1 and 12, got {}", month),
            });
        }

        let days_in_month = days_in_calendar_month(month, year)?;

        if leave_days > days_in_month {
            return Err(EngineError::InvalidInput {
                field: "leave_days".to_string(),
                message: format!(
                    "{} exceeds the {} days in month {}-{:02}",
                    leave_days, days_in_month, year, month
                ),
            });
        }

        Ok(AttendanceContext {
            month,
            year,
            leave_days,
            days_in_month,
        })
    }

    /// The calendar month, 1-12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The number of unpaid leave days taken.
    pub fn leave_days(&self) -> u32 {
        self.leave_days
    }

    /// The number of days in the month.
    pub fn days_in_month(&self) -> u32 {
        self.days_in_month
    }

    /// The number of payable days: `days_in_month - leave_days`.
    pub fn payable_days(&self) -> u32 {
        self.days_in_month - self.leave_days
    }
}

/// Returns the number of days in the given calendar month.
fn days_in_calendar_month(month: u32, year: i32) -> EngineResult<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        EngineError::InvalidInput {
            field: "year".to_string(),
            message: format!("no calendar date for {}-{:02}", year, month),
        }
    })?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| EngineError::InvalidInput {
        field: "year".to_string(),
        message: format!("no calendar date following {}-{:02}", year, month),
    })?;

    Ok(next_first.signed_duration_since(first).num_days() as u32)
}

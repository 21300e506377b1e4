//! Payroll breakdown models.
//!
//! This module contains the [`PayrollBreakdown`] produced by the
//! attendance-prorated payroll calculator, extending the compensation
//! breakdown with statutory deductions and net pay.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AttendanceContext, ComponentLine};

/// A single deduction row of a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    /// The stable deduction code (e.g. "employee_pf", "esi").
    pub code: String,
    /// The human-readable label printed in the payslip.
    pub label: String,
    /// The monthly deduction amount in rupees.
    pub monthly: Decimal,
}

/// The result of an attendance-prorated payroll calculation.
///
/// Earnings are derived from the leave-adjusted effective monthly salary;
/// the annual column of each earning line is a display-only projection
/// (`monthly * 12`). Every surfaced value is non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// The attendance context this payslip was calculated for.
    pub attendance: AttendanceContext,
    /// The per-day salary the proration was based on, in rupees.
    pub per_day_salary: Decimal,
    /// The earning component rows, in policy order.
    pub earnings: Vec<ComponentLine>,
    /// The deduction rows.
    pub deductions: Vec<DeductionLine>,
    /// The gross monthly salary (sum of earning components).
    pub gross_salary: Decimal,
    /// The total monthly deductions (sum of deduction components).
    pub total_deductions: Decimal,
    /// The net pay: `gross_salary - total_deductions`, floored at zero.
    pub net_pay: Decimal,
    /// When this calculation was performed.
    pub calculated_at: DateTime<Utc>,
}

impl PayrollBreakdown {
    /// Looks up an earning row by its component code.
    pub fn earning(&self, code: &str) -> Option<&ComponentLine> {
        self.earnings.iter().find(|c| c.code == code)
    }

    /// Looks up a deduction row by its code.
    pub fn deduction(&self, code: &str) -> Option<&DeductionLine> {
        self.deductions.iter().find(|d| d.code == code)
    }
}

//! Calculation logic for the salary engine.
//!
//! This module contains the compensation decomposer that splits an annual
//! CTC into policy-defined components, and the attendance-prorated payroll
//! calculator that re-runs the decomposition against a leave-adjusted
//! monthly salary and applies statutory deductions.

mod decompose;
mod payroll;
mod rounding;

pub use decompose::{decompose, rupees_per_lakh};
pub use payroll::calculate_payroll;

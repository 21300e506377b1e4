//! Salary decomposition engine for Indian CTC-based HR documents.
//!
//! This crate provides the calculation core behind offer letters, appointment
//! letters, payslips, and appraisal/increment letters: decomposing an annual
//! cost-to-company (CTC) figure into named components under a per-document-type
//! policy, computing attendance-prorated payroll with statutory deductions,
//! and converting amounts to and from Indian-numbering-system words.

#![warn(missing_docs)]

pub mod calculation;
pub mod error;
pub mod format;
pub mod models;
pub mod policy;

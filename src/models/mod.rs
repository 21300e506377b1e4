//! Core data models for the salary engine.
//!
//! This module contains all the domain value objects used throughout the
//! engine. Every entity here is created fresh for a single computation and
//! discarded once rendered; nothing is cached or mutated across calls.

mod attendance;
mod compensation;
mod payroll;

pub use attendance::AttendanceContext;
pub use compensation::{
    CompensationBreakdown, CompensationInput, ComponentAmount, ComponentLine, DocumentType,
};
pub use payroll::{DeductionLine, PayrollBreakdown};

//! Compensation policy configuration for the salary engine.
//!
//! A policy is a named table of component definitions: how each salary
//! component is derived from the annual CTC (fixed amount, percentage of
//! CTC, or capped percentage of basic) and which component balances the
//! table so the parts sum exactly to the whole. Policies differ per
//! document type and are kept separate on purpose; see
//! [`PolicyRegistry::builtin`] for the built-in tables.
//!
//! # Example
//!
//! ```
//! use salary_engine::models::DocumentType;
//! use salary_engine::policy::PolicyRegistry;
//!
//! let registry = PolicyRegistry::builtin();
//! let policy = registry.policy(DocumentType::Payslip).unwrap();
//! assert_eq!(policy.name, "payslip_monthly");
//! ```

mod loader;
mod registry;
mod types;

pub use loader::PolicyLoader;
pub use registry::PolicyRegistry;
pub use types::{
    BASIC_CODE, BasisRule, CapRule, CompensationPolicy, ComponentDef, StatutoryConfig, WordsBasis,
};

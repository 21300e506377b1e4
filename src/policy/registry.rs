//! The built-in policy registry.
//!
//! Five document types carry five deliberately different decomposition
//! tables. The percentages disagree (basic at 35%, 40%, or 50% of CTC),
//! the allowance sets differ, and the rounding and words conventions
//! differ. This drift is intentional and preserved; do not reconcile the
//! tables into one "true" policy.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::DocumentType;

use super::types::{
    BasisRule, CapRule, CompensationPolicy, ComponentDef, StatutoryConfig, WordsBasis,
};

/// Holds the compensation policy for each document type plus the statutory
/// deduction configuration.
///
/// # Example
///
/// ```
/// use salary_engine::models::DocumentType;
/// use salary_engine::policy::PolicyRegistry;
///
/// let registry = PolicyRegistry::builtin();
/// assert!(registry.policy(DocumentType::AppointmentLetter).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct PolicyRegistry {
    policies: HashMap<DocumentType, CompensationPolicy>,
    statutory: StatutoryConfig,
}

impl PolicyRegistry {
    /// Creates an empty registry with the given statutory configuration.
    pub fn new(statutory: StatutoryConfig) -> Self {
        PolicyRegistry {
            policies: HashMap::new(),
            statutory,
        }
    }

    /// Creates the registry of built-in policies.
    ///
    /// | Document type      | Basic      | Notable components                          |
    /// |--------------------|------------|---------------------------------------------|
    /// | Payslip            | 50% of CTC | HRA 40%, DA 10%, LTA 10% of basic           |
    /// | Offer letter       | 40% of CTC | education 2400/yr, employer PF capped 21600 |
    /// | Appointment letter | 35% of CTC | employer PF on basic capped at 15000/month  |
    /// | Appraisal letter   | 50% of CTC | verbalizes the LPA figure, not rupees       |
    /// | Increment letter   | 40% of CTC | DA 20%, HRA 30% of basic                    |
    pub fn builtin() -> Self {
        let mut policies = HashMap::new();
        for policy in [
            payslip_policy(),
            offer_letter_policy(),
            appointment_letter_policy(),
            appraisal_letter_policy(),
            increment_letter_policy(),
        ] {
            policies.insert(policy.document_type, policy);
        }
        PolicyRegistry {
            policies,
            statutory: StatutoryConfig::default(),
        }
    }

    /// Returns the policy for a document type.
    ///
    /// # Errors
    ///
    /// Returns `PolicyNotFound` if no policy is registered for the type.
    pub fn policy(&self, document_type: DocumentType) -> EngineResult<&CompensationPolicy> {
        self.policies
            .get(&document_type)
            .ok_or_else(|| EngineError::PolicyNotFound {
                document_type: document_type.as_str().to_string(),
            })
    }

    /// The statutory deduction configuration.
    pub fn statutory(&self) -> &StatutoryConfig {
        &self.statutory
    }

    /// Registers a policy, replacing any existing policy for its document
    /// type.
    ///
    /// # Errors
    ///
    /// Returns `PolicyConfiguration` if the policy fails validation.
    pub fn insert(&mut self, policy: CompensationPolicy) -> EngineResult<()> {
        policy.validate()?;
        self.policies.insert(policy.document_type, policy);
        Ok(())
    }

    /// The document types with a registered policy.
    pub fn document_types(&self) -> Vec<DocumentType> {
        self.policies.keys().copied().collect()
    }
}

fn component(code: &str, label: &str, basis: BasisRule) -> ComponentDef {
    ComponentDef {
        code: code.to_string(),
        label: label.to_string(),
        basis,
        per_day_prorated: false,
    }
}

fn per_day_component(code: &str, label: &str, basis: BasisRule) -> ComponentDef {
    ComponentDef {
        code: code.to_string(),
        label: label.to_string(),
        basis,
        per_day_prorated: true,
    }
}

fn percent(p: i64) -> BasisRule {
    BasisRule::PercentOfCtc(Decimal::new(p, 0))
}

fn percent_of_basic(p: i64) -> BasisRule {
    BasisRule::PercentOfBasic {
        percent: Decimal::new(p, 0),
        cap: None,
    }
}

fn fixed(annual: i64) -> BasisRule {
    BasisRule::Fixed(Decimal::new(annual, 0))
}

/// Payslip: basic 50% of CTC, the only variant that clamps a negative
/// balance instead of failing.
fn payslip_policy() -> CompensationPolicy {
    CompensationPolicy {
        name: "payslip_monthly".to_string(),
        document_type: DocumentType::Payslip,
        round_at_annual_level: false,
        clamp_negative_balance: true,
        words_basis: WordsBasis::AnnualRupees,
        components: vec![
            component("basic", "Basic", percent(50)),
            component("hra", "House Rent Allowance", percent_of_basic(40)),
            component("da", "Dearness Allowance", percent_of_basic(10)),
            per_day_component("conveyance", "Conveyance Allowance", fixed(19_200)),
            per_day_component("medical", "Medical Reimbursement", fixed(15_000)),
            component("lta", "Leave Travel Allowance", percent_of_basic(10)),
            component("special", "Special Allowance", BasisRule::Balance),
        ],
    }
}

/// Offer letter annexure: basic 40% of CTC, employer PF capped at
/// 21,600/yr, gratuity at 4.81% of basic.
fn offer_letter_policy() -> CompensationPolicy {
    CompensationPolicy {
        name: "offer_letter_annexure".to_string(),
        document_type: DocumentType::OfferLetter,
        round_at_annual_level: false,
        clamp_negative_balance: false,
        words_basis: WordsBasis::AnnualRupees,
        components: vec![
            component("basic", "Basic", percent(40)),
            component("hra", "House Rent Allowance", percent_of_basic(50)),
            component("education", "Education Allowance", fixed(2_400)),
            component(
                "employer_pf",
                "Employer PF Contribution",
                BasisRule::PercentOfBasic {
                    percent: Decimal::new(12, 0),
                    cap: Some(CapRule::AnnualCeiling(Decimal::new(21_600, 0))),
                },
            ),
            component(
                "gratuity",
                "Gratuity",
                BasisRule::PercentOfBasic {
                    percent: Decimal::new(481, 2),
                    cap: None,
                },
            ),
            component("special", "Special Allowance", BasisRule::Balance),
        ],
    }
}

/// Appointment letter annexure: basic 35% of CTC, employer PF computed on
/// basic capped at 15,000/month, annual values rounded to whole rupees.
fn appointment_letter_policy() -> CompensationPolicy {
    CompensationPolicy {
        name: "appointment_letter_annexure".to_string(),
        document_type: DocumentType::AppointmentLetter,
        round_at_annual_level: true,
        clamp_negative_balance: false,
        words_basis: WordsBasis::AnnualRupees,
        components: vec![
            component("basic", "Basic", percent(35)),
            component("hra", "House Rent Allowance", percent_of_basic(40)),
            per_day_component("conveyance", "Conveyance Allowance", fixed(19_200)),
            per_day_component("medical", "Medical Reimbursement", fixed(15_000)),
            component("lta", "Leave Travel Allowance", percent_of_basic(10)),
            component(
                "employer_pf",
                "Employer PF Contribution",
                BasisRule::PercentOfBasic {
                    percent: Decimal::new(12, 0),
                    cap: Some(CapRule::MonthlyBasisCeiling(Decimal::new(15_000, 0))),
                },
            ),
            component("special", "Special Allowance", BasisRule::Balance),
        ],
    }
}

/// Appraisal letter: basic 50% of CTC, verbalizes the LPA figure rather
/// than the annual rupee amount.
fn appraisal_letter_policy() -> CompensationPolicy {
    CompensationPolicy {
        name: "appraisal_letter".to_string(),
        document_type: DocumentType::AppraisalLetter,
        round_at_annual_level: false,
        clamp_negative_balance: false,
        words_basis: WordsBasis::LakhsFigure,
        components: vec![
            component("basic", "Basic", percent(50)),
            component("hra", "House Rent Allowance", percent_of_basic(40)),
            component("medical", "Medical Reimbursement", fixed(15_000)),
            component("special", "Special Allowance", BasisRule::Balance),
        ],
    }
}

/// Increment letter: basic 40% of CTC with DA at 20% and HRA at 30% of
/// basic, annual values rounded to whole rupees.
fn increment_letter_policy() -> CompensationPolicy {
    CompensationPolicy {
        name: "increment_letter".to_string(),
        document_type: DocumentType::IncrementLetter,
        round_at_annual_level: true,
        clamp_negative_balance: false,
        words_basis: WordsBasis::AnnualRupees,
        components: vec![
            component("basic", "Basic", percent(40)),
            component("da", "Dearness Allowance", percent_of_basic(20)),
            component("hra", "House Rent Allowance", percent_of_basic(30)),
            per_day_component("conveyance", "Conveyance Allowance", fixed(19_200)),
            component("special", "Special Allowance", BasisRule::Balance),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RG-001: every built-in policy passes validation
    #[test]
    fn test_all_builtin_policies_validate() {
        let registry = PolicyRegistry::builtin();
        for document_type in registry.document_types() {
            let policy = registry.policy(document_type).unwrap();
            policy
                .validate()
                .unwrap_or_else(|e| panic!("policy '{}' invalid: {}", policy.name, e));
        }
    }

    /// RG-002: all five document types are registered
    #[test]
    fn test_all_document_types_registered() {
        let registry = PolicyRegistry::builtin();
        for document_type in [
            DocumentType::Payslip,
            DocumentType::OfferLetter,
            DocumentType::AppointmentLetter,
            DocumentType::AppraisalLetter,
            DocumentType::IncrementLetter,
        ] {
            assert!(registry.policy(document_type).is_ok());
        }
    }

    /// RG-003: the basic percentages genuinely differ across variants
    #[test]
    fn test_basic_percentages_drift_across_variants() {
        let registry = PolicyRegistry::builtin();
        let basic_percent = |dt: DocumentType| -> Decimal {
            match registry
                .policy(dt)
                .unwrap()
                .basic_component()
                .unwrap()
                .basis
            {
                BasisRule::PercentOfCtc(p) => p,
                ref other => panic!("unexpected basic basis {:?}", other),
            }
        };

        assert_eq!(basic_percent(DocumentType::Payslip), Decimal::new(50, 0));
        assert_eq!(basic_percent(DocumentType::OfferLetter), Decimal::new(40, 0));
        assert_eq!(
            basic_percent(DocumentType::AppointmentLetter),
            Decimal::new(35, 0)
        );
    }

    /// RG-004: only the payslip variant clamps a negative balance
    #[test]
    fn test_only_payslip_clamps_negative_balance() {
        let registry = PolicyRegistry::builtin();
        for document_type in registry.document_types() {
            let policy = registry.policy(document_type).unwrap();
            assert_eq!(
                policy.clamp_negative_balance,
                document_type == DocumentType::Payslip,
                "policy '{}'",
                policy.name
            );
        }
    }

    /// RG-005: an empty registry reports PolicyNotFound
    #[test]
    fn test_empty_registry_reports_policy_not_found() {
        let registry = PolicyRegistry::new(StatutoryConfig::default());
        match registry.policy(DocumentType::Payslip).unwrap_err() {
            EngineError::PolicyNotFound { document_type } => {
                assert_eq!(document_type, "payslip");
            }
            other => panic!("Expected PolicyNotFound, got {:?}", other),
        }
    }

    /// RG-006: insert validates before registering
    #[test]
    fn test_insert_rejects_invalid_policy() {
        let mut registry = PolicyRegistry::new(StatutoryConfig::default());
        let invalid = CompensationPolicy {
            name: "broken".to_string(),
            document_type: DocumentType::Payslip,
            round_at_annual_level: false,
            clamp_negative_balance: false,
            words_basis: WordsBasis::AnnualRupees,
            components: vec![],
        };
        assert!(registry.insert(invalid).is_err());
        assert!(registry.policy(DocumentType::Payslip).is_err());
    }

    /// RG-007: insert replaces the existing policy for the document type
    #[test]
    fn test_insert_replaces_existing_policy() {
        let mut registry = PolicyRegistry::builtin();
        let mut replacement = payslip_policy();
        replacement.name = "payslip_override".to_string();
        registry.insert(replacement).unwrap();
        assert_eq!(
            registry.policy(DocumentType::Payslip).unwrap().name,
            "payslip_override"
        );
    }
}

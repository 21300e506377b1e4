//! Policy types for salary decomposition.
//!
//! This module contains the strongly-typed policy structures that are
//! either built in (see the registry) or deserialized from YAML
//! configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::DocumentType;

/// The component code the engine treats as the basic salary.
///
/// Percent-of-basic rules resolve against the component carrying this code.
pub const BASIC_CODE: &str = "basic";

/// A ceiling applied to a percent-of-basic component.
///
/// Both cap styles exist in the business rules: some document types cap the
/// computed contribution itself, others cap the basic the percentage is
/// applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapRule {
    /// Clamp the computed annual value to this ceiling (rupees per annum).
    AnnualCeiling(Decimal),
    /// Clamp the monthly basic to this ceiling before applying the
    /// percentage (rupees per month).
    MonthlyBasisCeiling(Decimal),
}

/// How a component's annual value is derived from the CTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasisRule {
    /// A literal annual amount in rupees (e.g. education allowance 2400/yr).
    Fixed(Decimal),
    /// A percentage of the annual CTC (0-100).
    PercentOfCtc(Decimal),
    /// A percentage of the basic component's annual value, optionally capped.
    PercentOfBasic {
        /// The percentage of basic (0-100).
        percent: Decimal,
        /// An optional ceiling; see [`CapRule`].
        #[serde(default)]
        cap: Option<CapRule>,
    },
    /// The balancing remainder: `annual CTC - sum(all other components)`.
    Balance,
}

/// Which figure `ctc_in_words` verbalizes.
///
/// The document types genuinely disagree here: annexures verbalize the
/// annual rupee amount, the appraisal letter verbalizes the raw LPA figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordsBasis {
    /// Verbalize the annual rupee amount (e.g. "Six Lakh").
    AnnualRupees,
    /// Verbalize the LPA figure itself (e.g. "Six Point Five").
    LakhsFigure,
}

/// A single component definition within a policy.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComponentDef {
    /// The stable component code (e.g. "basic", "hra", "special").
    pub code: String,
    /// The human-readable label printed in documents.
    pub label: String,
    /// How the component's annual value is derived.
    ///
    /// YAML uses the singleton-map form (`percent_of_ctc: '40'`, bare
    /// `balance` for unit rules); see the loader module docs.
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub basis: BasisRule,
    /// Whether the attendance calculator prorates this component by
    /// payable days rather than by the leave-adjusted salary ratio.
    /// Applies to per-working-day fixed allowances (conveyance, medical).
    #[serde(default)]
    pub per_day_prorated: bool,
}

/// A named, per-document-type salary decomposition policy.
///
/// # Example
///
/// ```
/// use salary_engine::policy::{BasisRule, CompensationPolicy, ComponentDef, WordsBasis};
/// use salary_engine::models::DocumentType;
/// use rust_decimal::Decimal;
///
/// let policy = CompensationPolicy {
///     name: "minimal".to_string(),
///     document_type: DocumentType::OfferLetter,
///     round_at_annual_level: false,
///     clamp_negative_balance: false,
///     words_basis: WordsBasis::AnnualRupees,
///     components: vec![
///         ComponentDef {
///             code: "basic".to_string(),
///             label: "Basic".to_string(),
///             basis: BasisRule::PercentOfCtc(Decimal::from(40)),
///             per_day_prorated: false,
///         },
///         ComponentDef {
///             code: "special".to_string(),
///             label: "Special Allowance".to_string(),
///             basis: BasisRule::Balance,
///             per_day_prorated: false,
///         },
///     ],
/// };
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompensationPolicy {
    /// The unique policy name (e.g. "offer_letter_annexure").
    pub name: String,
    /// The document type this policy applies to.
    pub document_type: DocumentType,
    /// Whether annual values are rounded to whole rupees before the
    /// balance is taken. The balance then restores the exact sum.
    #[serde(default)]
    pub round_at_annual_level: bool,
    /// Whether a negative balancing remainder is floored at zero instead
    /// of failing the calculation. Only the payslip variant does this.
    #[serde(default)]
    pub clamp_negative_balance: bool,
    /// Which figure `ctc_in_words` verbalizes.
    pub words_basis: WordsBasis,
    /// The component definitions, in document row order.
    pub components: Vec<ComponentDef>,
}

impl CompensationPolicy {
    /// Validates the internal consistency of this policy.
    ///
    /// # Errors
    ///
    /// Returns `PolicyConfiguration` if:
    /// - the policy has no components
    /// - component codes are not unique
    /// - the policy does not carry exactly one balancing component
    /// - a percent-of-basic rule exists without a non-balancing "basic"
    ///   component
    /// - any percentage, fixed amount, or cap is negative
    pub fn validate(&self) -> EngineResult<()> {
        if self.components.is_empty() {
            return self.misconfigured("policy has no components");
        }

        for (i, component) in self.components.iter().enumerate() {
            if self.components[..i].iter().any(|c| c.code == component.code) {
                return self.misconfigured(&format!(
                    "duplicate component code '{}'",
                    component.code
                ));
            }
            match component.basis {
                BasisRule::Fixed(amount) if amount.is_sign_negative() => {
                    return self.misconfigured(&format!(
                        "component '{}' has a negative fixed amount",
                        component.code
                    ));
                }
                BasisRule::PercentOfCtc(percent) if percent.is_sign_negative() => {
                    return self.misconfigured(&format!(
                        "component '{}' has a negative percentage",
                        component.code
                    ));
                }
                BasisRule::PercentOfBasic { percent, cap } => {
                    if percent.is_sign_negative() {
                        return self.misconfigured(&format!(
                            "component '{}' has a negative percentage",
                            component.code
                        ));
                    }
                    if let Some(
                        CapRule::AnnualCeiling(ceiling) | CapRule::MonthlyBasisCeiling(ceiling),
                    ) = cap
                        && ceiling.is_sign_negative()
                    {
                        return self.misconfigured(&format!(
                            "component '{}' has a negative cap",
                            component.code
                        ));
                    }
                }
                _ => {}
            }
        }

        let balance_count = self
            .components
            .iter()
            .filter(|c| matches!(c.basis, BasisRule::Balance))
            .count();
        if balance_count != 1 {
            return self.misconfigured(&format!(
                "expected exactly one balancing component, found {}",
                balance_count
            ));
        }

        let uses_basic = self
            .components
            .iter()
            .any(|c| matches!(c.basis, BasisRule::PercentOfBasic { .. }));
        if uses_basic {
            match self.basic_component() {
                None => {
                    return self
                        .misconfigured("percent-of-basic rule used without a 'basic' component");
                }
                Some(basic) if matches!(basic.basis, BasisRule::PercentOfBasic { .. }) => {
                    return self.misconfigured("'basic' component cannot be derived from itself");
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Returns the non-balancing basic component, if any.
    pub fn basic_component(&self) -> Option<&ComponentDef> {
        self.components
            .iter()
            .find(|c| c.code == BASIC_CODE && !matches!(c.basis, BasisRule::Balance))
    }

    /// Returns the balancing component, if any.
    pub fn balance_component(&self) -> Option<&ComponentDef> {
        self.components
            .iter()
            .find(|c| matches!(c.basis, BasisRule::Balance))
    }

    fn misconfigured(&self, message: &str) -> EngineResult<()> {
        Err(EngineError::PolicyConfiguration {
            policy: self.name.clone(),
            message: message.to_string(),
        })
    }
}

/// Statutory deduction rates applied by the payroll calculator.
///
/// Defaults match the payslip business rules: PF at 12% of basic capped at
/// Rs. 1,800 per month, ESI at 0.75% of gross below the Rs. 21,000
/// threshold, professional tax Rs. 200 per month.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StatutoryConfig {
    /// Provident fund rate applied to monthly basic (fraction, not percent).
    pub pf_rate: Decimal,
    /// Monthly cap on each PF contribution, in rupees.
    pub pf_monthly_cap: Decimal,
    /// Employee state insurance rate applied to monthly gross.
    pub esi_rate: Decimal,
    /// ESI applies only when monthly gross is at or below this threshold.
    pub esi_gross_threshold: Decimal,
    /// Professional tax per month, prorated by payable days.
    pub professional_tax_monthly: Decimal,
}

impl Default for StatutoryConfig {
    fn default() -> Self {
        StatutoryConfig {
            pf_rate: Decimal::new(12, 2),
            pf_monthly_cap: Decimal::new(1800, 0),
            esi_rate: Decimal::new(75, 4),
            esi_gross_threshold: Decimal::new(21_000, 0),
            professional_tax_monthly: Decimal::new(200, 0),
        }
    }
}

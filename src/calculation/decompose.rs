//! Compensation decomposition.
//!
//! Splits an annual CTC into the component table defined by a policy:
//! fixed amounts and percentages are evaluated first, then the balancing
//! component absorbs the remainder so the parts sum exactly to the whole.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::format::to_words;
use crate::models::{CompensationBreakdown, CompensationInput, ComponentAmount, ComponentLine};
use crate::policy::{BasisRule, CapRule, CompensationPolicy, WordsBasis};

use super::rounding::{round_paise, round_rupees};

/// Returns the number of rupees in one lakh (100,000).
pub fn rupees_per_lakh() -> Decimal {
    Decimal::new(100_000, 0)
}

fn months_per_year() -> Decimal {
    Decimal::new(12, 0)
}

/// Decomposes an annual CTC into the component table of a policy.
///
/// Every non-balancing component's annual value is evaluated per its basis
/// rule; the balancing component is then `annual CTC - sum(others)`.
/// Monthly values are `annual / 12` rounded to paise. When the policy sets
/// `round_at_annual_level`, annual values are rounded to whole rupees
/// before the balance is taken, and the balance restores the exact sum.
///
/// # Errors
///
/// Returns:
/// - `PolicyConfiguration` if the policy fails validation, or if the
///   balancing component would be negative and the policy does not clamp
/// - `Calculation` if the CTC is too large to verbalize
///
/// # Example
///
/// ```
/// use salary_engine::calculation::decompose;
/// use salary_engine::models::{CompensationInput, DocumentType};
/// use salary_engine::policy::PolicyRegistry;
/// use rust_decimal::Decimal;
///
/// let registry = PolicyRegistry::builtin();
/// let policy = registry.policy(DocumentType::OfferLetter).unwrap();
/// let input = CompensationInput::new(Decimal::from(6)).unwrap();
///
/// let breakdown = decompose(policy, &input).unwrap();
/// let basic = breakdown.component("basic").unwrap();
/// assert_eq!(basic.amount.annual, Decimal::from(240_000));
/// assert_eq!(basic.amount.monthly, Decimal::from(20_000));
/// ```
pub fn decompose(
    policy: &CompensationPolicy,
    input: &CompensationInput,
) -> EngineResult<CompensationBreakdown> {
    policy.validate()?;

    let annual_ctc = input.annual_ctc_lakhs() * rupees_per_lakh();
    let annual_target = if policy.round_at_annual_level {
        round_rupees(annual_ctc)
    } else {
        annual_ctc
    };

    let basic_annual = match policy.basic_component() {
        Some(basic) => annual_value(&basic.basis, annual_target, Decimal::ZERO),
        None => Decimal::ZERO,
    };

    let mut annual_values: Vec<Option<Decimal>> = Vec::with_capacity(policy.components.len());
    let mut others_sum = Decimal::ZERO;
    for component in &policy.components {
        if matches!(component.basis, BasisRule::Balance) {
            annual_values.push(None);
            continue;
        }
        let mut value = annual_value(&component.basis, annual_target, basic_annual);
        if policy.round_at_annual_level {
            value = round_rupees(value);
        }
        others_sum += value;
        annual_values.push(Some(value));
    }

    let mut balance = annual_target - others_sum;
    if balance.is_sign_negative() && !balance.is_zero() {
        if policy.clamp_negative_balance {
            let shortfall = -balance;
            debug!(
                policy = %policy.name,
                shortfall = %shortfall,
                "negative balancing component clamped to zero"
            );
            balance = Decimal::ZERO;
        } else {
            return Err(EngineError::PolicyConfiguration {
                policy: policy.name.clone(),
                message: format!(
                    "fixed and percentage components exceed the annual CTC by {}",
                    -balance
                ),
            });
        }
    }

    let components: Vec<ComponentLine> = policy
        .components
        .iter()
        .zip(annual_values)
        .map(|(component, value)| {
            let annual = value.unwrap_or(balance);
            ComponentLine {
                code: component.code.clone(),
                label: component.label.clone(),
                amount: ComponentAmount {
                    monthly: round_paise(annual / months_per_year()),
                    annual,
                },
            }
        })
        .collect();

    let total = ComponentAmount {
        monthly: components.iter().map(|c| c.amount.monthly).sum(),
        annual: components.iter().map(|c| c.amount.annual).sum(),
    };

    let ctc_in_words = match policy.words_basis {
        WordsBasis::AnnualRupees => to_words(annual_target)?,
        WordsBasis::LakhsFigure => to_words(input.annual_ctc_lakhs())?,
    };

    debug!(
        policy = %policy.name,
        annual_ctc = %annual_target,
        components = components.len(),
        "decomposed annual CTC"
    );

    Ok(CompensationBreakdown {
        calculation_id: Uuid::new_v4(),
        document_type: policy.document_type,
        components,
        total,
        ctc_in_words,
        calculated_at: Utc::now(),
    })
}

/// Evaluates a non-balancing basis rule against the annual CTC.
fn annual_value(basis: &BasisRule, annual_ctc: Decimal, basic_annual: Decimal) -> Decimal {
    match basis {
        BasisRule::Fixed(amount) => *amount,
        BasisRule::PercentOfCtc(percent) => annual_ctc * *percent / Decimal::ONE_HUNDRED,
        BasisRule::PercentOfBasic { percent, cap } => match cap {
            None => basic_annual * *percent / Decimal::ONE_HUNDRED,
            Some(CapRule::AnnualCeiling(ceiling)) => {
                (basic_annual * *percent / Decimal::ONE_HUNDRED).min(*ceiling)
            }
            Some(CapRule::MonthlyBasisCeiling(ceiling)) => {
                basic_annual.min(*ceiling * months_per_year()) * *percent / Decimal::ONE_HUNDRED
            }
        },
        BasisRule::Balance => Decimal::ZERO,
    }
}

//! Compensation input and breakdown models.
//!
//! This module contains the [`CompensationInput`] value object supplied by
//! the caller and the [`CompensationBreakdown`] produced by the decomposer,
//! along with the [`DocumentType`] key used to select a policy.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// The document types that consume a compensation breakdown.
///
/// Each document type has its own independently configured decomposition
/// policy. The percentages genuinely disagree across document types in the
/// underlying business rules; the registry keeps them separate on purpose.
///
/// # Example
///
/// ```
/// use salary_engine::models::DocumentType;
///
/// assert_eq!(DocumentType::Payslip.as_str(), "payslip");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Monthly payslip with attendance proration and statutory deductions.
    Payslip,
    /// Offer letter salary annexure.
    OfferLetter,
    /// Appointment letter salary annexure.
    AppointmentLetter,
    /// Appraisal letter with revised compensation.
    AppraisalLetter,
    /// Increment letter with revised compensation.
    IncrementLetter,
}

impl DocumentType {
    /// Returns the snake_case identifier for this document type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Payslip => "payslip",
            DocumentType::OfferLetter => "offer_letter",
            DocumentType::AppointmentLetter => "appointment_letter",
            DocumentType::AppraisalLetter => "appraisal_letter",
            DocumentType::IncrementLetter => "increment_letter",
        }
    }
}

/// The annual cost-to-company figure entered by the user, in lakhs per annum.
///
/// This is the single source of truth for a decomposition. The constructor
/// validates the figure so that invalid values are rejected at the boundary
/// instead of propagating through the arithmetic.
///
/// # Example
///
/// ```
/// use salary_engine::models::CompensationInput;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let input = CompensationInput::new(Decimal::from_str("6.5").unwrap()).unwrap();
/// assert_eq!(input.annual_ctc_lakhs(), Decimal::from_str("6.5").unwrap());
///
/// assert!(CompensationInput::new(Decimal::from_str("-1").unwrap()).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationInput {
    annual_ctc_lakhs: Decimal,
}

impl CompensationInput {
    /// Creates a validated compensation input.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `annual_ctc_lakhs` is negative.
    pub fn new(annual_ctc_lakhs: Decimal) -> EngineResult<Self> {
        if annual_ctc_lakhs.is_sign_negative() && !annual_ctc_lakhs.is_zero() {
            return Err(EngineError::InvalidInput {
                field: "annual_ctc_lakhs".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        Ok(CompensationInput { annual_ctc_lakhs })
    }

    /// The annual CTC in lakhs per annum.
    pub fn annual_ctc_lakhs(&self) -> Decimal {
        self.annual_ctc_lakhs
    }
}

/// The monthly and annual value of a single compensation component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentAmount {
    /// The monthly value in rupees.
    pub monthly: Decimal,
    /// The annual value in rupees.
    pub annual: Decimal,
}

/// A single row of a compensation breakdown, in policy-defined order.
///
/// The rendering layer prints these rows as-is into the annexure table of
/// the generated document, so the order and labels matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentLine {
    /// The stable component code (e.g. "basic", "hra", "special").
    pub code: String,
    /// The human-readable label printed in the document.
    pub label: String,
    /// The monthly and annual values for this component.
    pub amount: ComponentAmount,
}

/// The result of decomposing an annual CTC under a policy.
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
/// assert_eq!(breakdown.annual_total(), Decimal::from(600_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationBreakdown {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// The document type whose policy produced this breakdown.
    pub document_type: DocumentType,
    /// The component rows, in policy order.
    pub components: Vec<ComponentLine>,
    /// The totals row (sum of all components).
    pub total: ComponentAmount,
    /// The CTC verbalized in Indian-numbering-system words.
    pub ctc_in_words: String,
    /// When this calculation was performed.
    pub calculated_at: DateTime<Utc>,
}

impl CompensationBreakdown {
    /// Looks up a component row by its code.
    pub fn component(&self, code: &str) -> Option<&ComponentLine> {
        self.components.iter().find(|c| c.code == code)
    }

    /// The sum of all components' annual values.
    pub fn annual_total(&self) -> Decimal {
        self.components.iter().map(|c| c.amount.annual).sum()
    }
}

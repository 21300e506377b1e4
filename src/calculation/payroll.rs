//! Attendance-prorated payroll calculation.
//!
//! Re-runs a compensation policy against the leave-adjusted effective
//! monthly salary, prorates per-working-day allowances by payable days,
//! and applies statutory deductions (PF, ESI, professional tax).

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceContext, CompensationInput, ComponentAmount, ComponentLine, DeductionLine,
    PayrollBreakdown,
};
use crate::policy::{BasisRule, CapRule, CompensationPolicy, ComponentDef, StatutoryConfig};

use super::decompose::rupees_per_lakh;
use super::rounding::{round_paise, round_rupees};

fn months_per_year() -> Decimal {
    Decimal::new(12, 0)
}

/// Calculates an attendance-prorated payslip.
///
/// The per-day salary is `(annual / 12) / days_in_month`; leave days reduce
/// the monthly salary by that rate, and the component decomposition then
/// runs against the effective monthly figure rather than the nominal CTC.
/// Fixed allowances marked `per_day_prorated` scale by
/// `payable_days / days_in_month` instead. The annual column of each
/// earning is `monthly * 12`, a display-only projection.
///
/// Deductions follow the payslip statutory rules: employee PF at
/// `pf_rate` of monthly basic capped at `pf_monthly_cap`, employer PF
/// mirroring it, ESI at `esi_rate` of gross when gross is at or below the
/// threshold, and professional tax prorated by payable days and rounded to
/// whole rupees.
///
/// Every surfaced value is clamped to zero or above; net pay is
/// `gross - total deductions`, floored at zero.
///
/// # Errors
///
/// Returns `PolicyConfiguration` if the policy fails validation. Invalid
/// attendance is rejected earlier by [`AttendanceContext::new`].
///
/// # Example
///
/// ```
/// use salary_engine::calculation::calculate_payroll;
/// use salary_engine::models::{AttendanceContext, CompensationInput, DocumentType};
/// use salary_engine::policy::PolicyRegistry;
/// use rust_decimal::Decimal;
///
/// let registry = PolicyRegistry::builtin();
/// let policy = registry.policy(DocumentType::Payslip).unwrap();
/// let input = CompensationInput::new(Decimal::from(6)).unwrap();
/// let attendance = AttendanceContext::new(1, 2026, 0).unwrap();
///
/// let payslip = calculate_payroll(policy, registry.statutory(), &input, &attendance).unwrap();
/// assert_eq!(payslip.earning("basic").unwrap().amount.monthly, Decimal::from(25_000));
/// ```
pub fn calculate_payroll(
    policy: &CompensationPolicy,
    statutory: &StatutoryConfig,
    input: &CompensationInput,
    attendance: &AttendanceContext,
) -> EngineResult<PayrollBreakdown> {
    policy.validate()?;

    let days = Decimal::from(attendance.days_in_month());
    if days.is_zero() {
        // unreachable for a validated context; defend the division anyway
        return Err(EngineError::Calculation {
            message: "month has zero days".to_string(),
        });
    }

    let annual_ctc = input.annual_ctc_lakhs() * rupees_per_lakh();
    let nominal_monthly = annual_ctc / months_per_year();
    let per_day_salary = nominal_monthly / days;
    let leave_days = Decimal::from(attendance.leave_days());
    let effective_monthly =
        (nominal_monthly - per_day_salary * leave_days).max(Decimal::ZERO);
    let attendance_ratio = Decimal::from(attendance.payable_days()) / days;

    let basic_monthly = match policy.basic_component() {
        Some(basic) => monthly_value(basic, effective_monthly, Decimal::ZERO, attendance_ratio),
        None => Decimal::ZERO,
    };

    let mut monthly_values: Vec<Option<Decimal>> = Vec::with_capacity(policy.components.len());
    let mut others_sum = Decimal::ZERO;
    for component in &policy.components {
        if matches!(component.basis, BasisRule::Balance) {
            monthly_values.push(None);
            continue;
        }
        let value = monthly_value(component, effective_monthly, basic_monthly, attendance_ratio);
        others_sum += value;
        monthly_values.push(Some(value));
    }

    // the balance absorbs the remainder; a shortfall never surfaces as
    // negative pay
    let balance = (effective_monthly - others_sum).max(Decimal::ZERO);

    let earnings: Vec<ComponentLine> = policy
        .components
        .iter()
        .zip(monthly_values)
        .map(|(component, value)| {
            let monthly = round_paise(value.unwrap_or(balance));
            ComponentLine {
                code: component.code.clone(),
                label: component.label.clone(),
                amount: ComponentAmount {
                    monthly,
                    annual: monthly * months_per_year(),
                },
            }
        })
        .collect();

    let gross_salary: Decimal = earnings.iter().map(|e| e.amount.monthly).sum();

    let basic_for_pf = earnings
        .iter()
        .find(|e| e.code == crate::policy::BASIC_CODE)
        .map(|e| e.amount.monthly)
        .unwrap_or(Decimal::ZERO);
    let employee_pf = round_paise((basic_for_pf * statutory.pf_rate).min(statutory.pf_monthly_cap));
    let employer_pf = employee_pf;
    let esi = if gross_salary <= statutory.esi_gross_threshold {
        round_paise(gross_salary * statutory.esi_rate)
    } else {
        Decimal::ZERO
    };
    let professional_tax = round_rupees(statutory.professional_tax_monthly * attendance_ratio);

    let deductions = vec![
        DeductionLine {
            code: "professional_tax".to_string(),
            label: "Professional Tax".to_string(),
            monthly: professional_tax,
        },
        DeductionLine {
            code: "employee_pf".to_string(),
            label: "Employee PF Contribution".to_string(),
            monthly: employee_pf,
        },
        DeductionLine {
            code: "employer_pf".to_string(),
            label: "Employer PF Contribution".to_string(),
            monthly: employer_pf,
        },
        DeductionLine {
            code: "esi".to_string(),
            label: "Employee State Insurance".to_string(),
            monthly: esi,
        },
    ];

    let total_deductions: Decimal = deductions.iter().map(|d| d.monthly).sum();
    let net_pay = (gross_salary - total_deductions).max(Decimal::ZERO);

    debug!(
        policy = %policy.name,
        month = attendance.month(),
        year = attendance.year(),
        leave_days = attendance.leave_days(),
        gross = %gross_salary,
        net = %net_pay,
        "calculated payroll"
    );

    Ok(PayrollBreakdown {
        calculation_id: Uuid::new_v4(),
        attendance: *attendance,
        per_day_salary: round_paise(per_day_salary),
        earnings,
        deductions,
        gross_salary,
        total_deductions,
        net_pay,
        calculated_at: Utc::now(),
    })
}

/// Evaluates a non-balancing component against the effective monthly salary.
fn monthly_value(
    component: &ComponentDef,
    effective_monthly: Decimal,
    basic_monthly: Decimal,
    attendance_ratio: Decimal,
) -> Decimal {
    let value = match &component.basis {
        BasisRule::Fixed(annual) => {
            let monthly = *annual / months_per_year();
            if component.per_day_prorated {
                monthly * attendance_ratio
            } else {
                monthly
            }
        }
        BasisRule::PercentOfCtc(percent) => effective_monthly * *percent / Decimal::ONE_HUNDRED,
        BasisRule::PercentOfBasic { percent, cap } => match cap {
            None => basic_monthly * *percent / Decimal::ONE_HUNDRED,
            Some(CapRule::AnnualCeiling(ceiling)) => (basic_monthly * *percent
                / Decimal::ONE_HUNDRED)
                .min(*ceiling / months_per_year()),
            Some(CapRule::MonthlyBasisCeiling(ceiling)) => {
                basic_monthly.min(*ceiling) * *percent / Decimal::ONE_HUNDRED
            }
        },
        BasisRule::Balance => Decimal::ZERO,
    };
    value.max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentType;
    use crate::policy::PolicyRegistry;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn payslip(lakhs: &str, month: u32, year: i32, leave_days: u32) -> PayrollBreakdown {
        let registry = PolicyRegistry::builtin();
        let policy = registry.policy(DocumentType::Payslip).unwrap();
        let input = CompensationInput::new(dec(lakhs)).unwrap();
        let attendance = AttendanceContext::new(month, year, leave_days).unwrap();
        calculate_payroll(policy, registry.statutory(), &input, &attendance).unwrap()
    }

    /// PR-001: 6 LPA, January, no leave
    #[test]
    fn test_six_lpa_january_no_leave() {
        let payslip = payslip("6", 1, 2026, 0);

        assert_eq!(payslip.earning("basic").unwrap().amount.monthly, dec("25000"));
        assert_eq!(payslip.earning("hra").unwrap().amount.monthly, dec("10000"));
        assert_eq!(payslip.earning("da").unwrap().amount.monthly, dec("2500"));
        assert_eq!(
            payslip.earning("conveyance").unwrap().amount.monthly,
            dec("1600")
        );
        assert_eq!(
            payslip.earning("medical").unwrap().amount.monthly,
            dec("1250")
        );
        assert_eq!(payslip.earning("lta").unwrap().amount.monthly, dec("2500"));
        assert_eq!(
            payslip.earning("special").unwrap().amount.monthly,
            dec("7150")
        );
        assert_eq!(payslip.gross_salary, dec("50000"));

        // PF capped at 1800; gross above the ESI threshold; full PT
        assert_eq!(payslip.deduction("employee_pf").unwrap().monthly, dec("1800"));
        assert_eq!(payslip.deduction("employer_pf").unwrap().monthly, dec("1800"));
        assert_eq!(payslip.deduction("esi").unwrap().monthly, Decimal::ZERO);
        assert_eq!(
            payslip.deduction("professional_tax").unwrap().monthly,
            dec("200")
        );
        assert_eq!(payslip.total_deductions, dec("3800"));
        assert_eq!(payslip.net_pay, dec("46200"));
        assert!(payslip.net_pay < payslip.gross_salary);

        assert_eq!(payslip.per_day_salary, dec("1612.90"));
    }

    /// PR-002: leave days reduce every attendance-sensitive figure
    #[test]
    fn test_three_leave_days_in_june() {
        let payslip = payslip("6", 6, 2026, 3);

        // 50000 - 3 * (50000/30) = 45000 effective
        assert_eq!(payslip.earning("basic").unwrap().amount.monthly, dec("22500"));
        assert_eq!(payslip.earning("hra").unwrap().amount.monthly, dec("9000"));
        assert_eq!(payslip.earning("da").unwrap().amount.monthly, dec("2250"));
        // per-day allowances prorated by 27/30
        assert_eq!(
            payslip.earning("conveyance").unwrap().amount.monthly,
            dec("1440")
        );
        assert_eq!(
            payslip.earning("medical").unwrap().amount.monthly,
            dec("1125")
        );
        assert_eq!(payslip.earning("lta").unwrap().amount.monthly, dec("2250"));
        assert_eq!(
            payslip.earning("special").unwrap().amount.monthly,
            dec("6435")
        );
        assert_eq!(payslip.gross_salary, dec("45000"));

        assert_eq!(payslip.deduction("employee_pf").unwrap().monthly, dec("1800"));
        // 200 * 27/30
        assert_eq!(
            payslip.deduction("professional_tax").unwrap().monthly,
            dec("180")
        );
        assert_eq!(payslip.total_deductions, dec("3780"));
        assert_eq!(payslip.net_pay, dec("41220"));
    }

    /// PR-003: ESI applies at or below the gross threshold
    #[test]
    fn test_esi_below_threshold() {
        let payslip = payslip("2.4", 1, 2026, 0);

        assert_eq!(payslip.gross_salary, dec("20000"));
        // 0.75% of 20000
        assert_eq!(payslip.deduction("esi").unwrap().monthly, dec("150"));
        // 12% of 10000 basic, below the 1800 cap
        assert_eq!(payslip.deduction("employee_pf").unwrap().monthly, dec("1200"));
        assert_eq!(payslip.total_deductions, dec("2750"));
        assert_eq!(payslip.net_pay, dec("17250"));
    }

    /// PR-004: a full month of leave yields zero pay, not negative pay
    #[test]
    fn test_full_month_leave() {
        let payslip = payslip("6", 4, 2026, 30);

        assert_eq!(payslip.gross_salary, Decimal::ZERO);
        assert_eq!(payslip.total_deductions, Decimal::ZERO);
        assert_eq!(payslip.net_pay, Decimal::ZERO);
        for earning in &payslip.earnings {
            assert!(earning.amount.monthly >= Decimal::ZERO);
        }
    }

    /// PR-005: net pay is non-increasing as leave days grow
    #[test]
    fn test_net_pay_monotone_in_leave_days() {
        let mut previous = None;
        for leave_days in 0..=31 {
            let payslip = payslip("4", 1, 2026, leave_days);
            if let Some(last) = previous {
                assert!(
                    payslip.net_pay <= last,
                    "net pay rose from {} to {} at {} leave days",
                    last,
                    payslip.net_pay,
                    leave_days
                );
            }
            previous = Some(payslip.net_pay);
        }
    }

    /// PR-006: no payroll component is ever negative
    #[test]
    fn test_no_negative_components() {
        for lakhs in ["0", "0.01", "1.2", "6", "48"] {
            for leave_days in [0, 10, 28] {
                let payslip = payslip(lakhs, 2, 2026, leave_days);
                for earning in &payslip.earnings {
                    assert!(earning.amount.monthly >= Decimal::ZERO);
                }
                for deduction in &payslip.deductions {
                    assert!(deduction.monthly >= Decimal::ZERO);
                }
                assert!(payslip.gross_salary >= Decimal::ZERO);
                assert!(payslip.net_pay >= Decimal::ZERO);
            }
        }
    }

    /// PR-007: earning annual column is the monthly projection
    #[test]
    fn test_annual_column_is_monthly_projection() {
        let payslip = payslip("6", 6, 2026, 3);
        for earning in &payslip.earnings {
            assert_eq!(earning.amount.annual, earning.amount.monthly * dec("12"));
        }
    }

    /// PR-008: February length is respected in the per-day rate
    #[test]
    fn test_february_per_day_rate() {
        let payslip = payslip("6", 2, 2026, 0);
        // 50000 / 28
        assert_eq!(payslip.per_day_salary, dec("1785.71"));
    }

    /// PR-009: statutory overrides flow through
    #[test]
    fn test_statutory_override() {
        let registry = PolicyRegistry::builtin();
        let policy = registry.policy(DocumentType::Payslip).unwrap();
        let statutory = StatutoryConfig {
            professional_tax_monthly: dec("300"),
            ..StatutoryConfig::default()
        };
        let input = CompensationInput::new(dec("6")).unwrap();
        let attendance = AttendanceContext::new(1, 2026, 0).unwrap();

        let payslip = calculate_payroll(policy, &statutory, &input, &attendance).unwrap();
        assert_eq!(
            payslip.deduction("professional_tax").unwrap().monthly,
            dec("300")
        );
    }
}

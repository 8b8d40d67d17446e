//! Deduction and net pay derivation.
//!
//! The deduction total is a flat sum: income tax and local income tax are
//! always included, and each of the four insurance amounts is included only
//! while its applicability flag is set. There is no rounding, proration or
//! bracket logic; amounts arrive already computed.
//!
//! Parsed and deserialized amounts are bounded by
//! [`crate::models::money::MAX_AMOUNT`], so the sum is exact for them. A record
//! built directly with larger values saturates at `Decimal::MAX`/`Decimal::MIN`
//! instead of overflowing.

use rust_decimal::Decimal;

use crate::models::{
    DeductionBreakdown, DeductionComponent, DeductionLine, InsuranceCategory, PayrollDetail,
};

/// Itemises the deductions of a payroll record.
///
/// # Examples
///
/// ```
/// use site_payroll::calculation::deduction_breakdown;
/// use site_payroll::models::{DeductionComponent, PayrollDetail};
/// use rust_decimal::Decimal;
///
/// let detail = PayrollDetail {
///     total_amount: Decimal::from(1_000_000),
///     income_tax: Decimal::from(10_000),
///     national_pension_amount: Decimal::from(45_000),
///     is_national_pension_applicable: false,
///     ..Default::default()
/// };
///
/// let breakdown = deduction_breakdown(&detail);
/// assert_eq!(breakdown.total_deductions, Decimal::from(10_000));
/// assert_eq!(breakdown.net_pay, Decimal::from(990_000));
///
/// let pension = breakdown.line(DeductionComponent::NationalPension).unwrap();
/// assert_eq!(pension.amount, Decimal::from(45_000));
/// assert_eq!(pension.contribution, Decimal::ZERO);
/// ```
pub fn deduction_breakdown(detail: &PayrollDetail) -> DeductionBreakdown {
    let mut lines = Vec::with_capacity(2 + InsuranceCategory::ALL.len());

    lines.push(always_applied(DeductionComponent::IncomeTax, detail.income_tax));
    lines.push(always_applied(
        DeductionComponent::LocalIncomeTax,
        detail.local_income_tax,
    ));

    for category in InsuranceCategory::ALL {
        let amount = detail.insurance_amount(category);
        let applied = detail.is_applicable(category);
        lines.push(DeductionLine {
            component: category.into(),
            amount,
            applied,
            contribution: if applied { amount } else { Decimal::ZERO },
        });
    }

    let total_deductions = lines
        .iter()
        .fold(Decimal::ZERO, |sum, line| sum.saturating_add(line.contribution));

    DeductionBreakdown {
        lines,
        total_deductions,
        net_pay: detail.total_amount.saturating_sub(total_deductions),
    }
}

fn always_applied(component: DeductionComponent, amount: Decimal) -> DeductionLine {
    DeductionLine {
        component,
        amount,
        applied: true,
        contribution: amount,
    }
}

/// Returns a copy of `detail` with `total_deductions` and `net_pay` derived
/// from its inputs.
///
/// Net pay is not floored: it goes negative when deductions exceed gross
/// pay. Calling this on its own output returns the same record.
///
/// # Examples
///
/// ```
/// use site_payroll::calculation::recompute;
/// use site_payroll::models::PayrollDetail;
/// use rust_decimal::Decimal;
///
/// let detail = PayrollDetail {
///     total_amount: Decimal::from(3_000_000),
///     income_tax: Decimal::from(50_000),
///     local_income_tax: Decimal::from(5_000),
///     employment_insurance_amount: Decimal::from(27_000),
///     is_employment_insurance_applicable: true,
///     national_pension_amount: Decimal::from(135_000),
///     is_national_pension_applicable: false,
///     health_insurance_amount: Decimal::from(106_000),
///     is_health_insurance_applicable: true,
///     long_term_care_amount: Decimal::from(13_000),
///     is_long_term_care_applicable: true,
///     ..Default::default()
/// };
///
/// let recomputed = recompute(&detail);
/// assert_eq!(recomputed.total_deductions, Decimal::from(201_000));
/// assert_eq!(recomputed.net_pay, Decimal::from(2_799_000));
/// ```
pub fn recompute(detail: &PayrollDetail) -> PayrollDetail {
    let breakdown = deduction_breakdown(detail);
    PayrollDetail {
        total_deductions: breakdown.total_deductions,
        net_pay: breakdown.net_pay,
        ..detail.clone()
    }
}

/// Returns true if the derived fields of `detail` already match its inputs.
pub fn is_consistent(detail: &PayrollDetail) -> bool {
    let breakdown = deduction_breakdown(detail);
    detail.total_deductions == breakdown.total_deductions && detail.net_pay == breakdown.net_pay
}

#[cfg(test)]
mod tests {
    use super::*;

    fn won(amount: i64) -> Decimal {
        Decimal::from(amount)
    }

    fn sample_detail() -> PayrollDetail {
        PayrollDetail {
            total_amount: won(3_000_000),
            income_tax: won(50_000),
            local_income_tax: won(5_000),
            employment_insurance_amount: won(27_000),
            is_employment_insurance_applicable: true,
            national_pension_amount: won(135_000),
            is_national_pension_applicable: false,
            health_insurance_amount: won(106_000),
            is_health_insurance_applicable: true,
            long_term_care_amount: won(13_000),
            is_long_term_care_applicable: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_payslip_totals() {
        let result = recompute(&sample_detail());
        assert_eq!(result.total_deductions, won(201_000));
        assert_eq!(result.net_pay, won(2_799_000));
    }

    #[test]
    fn test_enabling_national_pension_adds_its_amount() {
        let mut detail = sample_detail();
        detail.is_national_pension_applicable = true;

        let result = recompute(&detail);
        assert_eq!(result.total_deductions, won(336_000));
        assert_eq!(result.net_pay, won(2_664_000));
    }

    #[test]
    fn test_stale_derived_fields_are_overwritten() {
        let mut detail = sample_detail();
        detail.total_deductions = won(1);
        detail.net_pay = won(-1);

        let result = recompute(&detail);
        assert_eq!(result.total_deductions, won(201_000));
        assert_eq!(result.net_pay, won(2_799_000));
    }

    #[test]
    fn test_recompute_leaves_inputs_untouched() {
        let detail = sample_detail();
        let result = recompute(&detail);
        assert_eq!(
            PayrollDetail {
                total_deductions: Decimal::ZERO,
                net_pay: Decimal::ZERO,
                ..result
            },
            detail
        );
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let once = recompute(&sample_detail());
        let twice = recompute(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_net_pay_can_go_negative() {
        let detail = PayrollDetail {
            total_amount: won(100_000),
            income_tax: won(80_000),
            health_insurance_amount: won(50_000),
            is_health_insurance_applicable: true,
            ..Default::default()
        };
        let result = recompute(&detail);
        assert_eq!(result.total_deductions, won(130_000));
        assert_eq!(result.net_pay, won(-30_000));
    }

    #[test]
    fn test_informational_fields_do_not_affect_deductions() {
        let mut detail = sample_detail();
        detail.meal_allowance = won(200_000);
        detail.monthly_salary_for_insurance = won(9_999_999);
        detail.is_retirement_deduction_applicable = true;
        detail.retirement_deduction_days = Some(30);

        assert_eq!(recompute(&detail).total_deductions, won(201_000));
    }

    #[test]
    fn test_breakdown_lists_taxes_then_insurance() {
        let breakdown = deduction_breakdown(&sample_detail());
        let components: Vec<_> = breakdown.lines.iter().map(|l| l.component).collect();
        assert_eq!(
            components,
            vec![
                DeductionComponent::IncomeTax,
                DeductionComponent::LocalIncomeTax,
                DeductionComponent::EmploymentInsurance,
                DeductionComponent::NationalPension,
                DeductionComponent::HealthInsurance,
                DeductionComponent::LongTermCare,
            ]
        );
    }

    #[test]
    fn test_breakdown_reports_excluded_lines() {
        let breakdown = deduction_breakdown(&sample_detail());
        let excluded: Vec<_> = breakdown.excluded().map(|l| l.component).collect();
        assert_eq!(excluded, vec![DeductionComponent::NationalPension]);
    }

    #[test]
    fn test_all_zero_record_has_zero_totals() {
        let result = recompute(&PayrollDetail::default());
        assert_eq!(result.total_deductions, Decimal::ZERO);
        assert_eq!(result.net_pay, Decimal::ZERO);
    }

    #[test]
    fn test_extreme_deductions_saturate() {
        let detail = PayrollDetail {
            total_amount: won(1_000),
            income_tax: Decimal::MAX,
            local_income_tax: Decimal::MAX,
            health_insurance_amount: Decimal::MAX,
            is_health_insurance_applicable: true,
            ..Default::default()
        };

        let result = recompute(&detail);
        assert_eq!(result.total_deductions, Decimal::MAX);
        assert_eq!(result.net_pay, won(1_000) - Decimal::MAX);
        assert!(is_consistent(&result));
    }

    #[test]
    fn test_extreme_net_pay_saturates() {
        let detail = PayrollDetail {
            total_amount: Decimal::MIN,
            income_tax: won(1),
            ..Default::default()
        };

        let result = recompute(&detail);
        assert_eq!(result.total_deductions, won(1));
        assert_eq!(result.net_pay, Decimal::MIN);
    }

    #[test]
    fn test_opposite_extremes_cancel() {
        let detail = PayrollDetail {
            income_tax: Decimal::MAX,
            local_income_tax: Decimal::MIN,
            ..Default::default()
        };
        assert_eq!(recompute(&detail).total_deductions, Decimal::ZERO);
    }

    #[test]
    fn test_is_consistent_tracks_derived_fields() {
        let detail = sample_detail();
        assert!(!is_consistent(&detail));
        assert!(is_consistent(&recompute(&detail)));
    }
}

//! Field edits and applicability toggles.
//!
//! Both operations return a new record with the derived fields recomputed,
//! so the deduction and net pay invariants hold after every change.

use tracing::debug;

use crate::error::EngineResult;
use crate::models::{InsuranceCategory, PayrollDetail, PayrollField};

use super::deductions::recompute;
use super::input::{NumericInputPolicy, amount_with_policy, days_with_policy};

/// Sets one editable field from raw user input and recomputes.
///
/// Monetary fields are parsed with [`super::parse_amount`]; invalid input is
/// handled according to `policy`. `retirementDeductionDays` is cleared by
/// empty input, and `reasonForLeaving` is cleared by blank input.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidInput`] or
/// [`crate::error::EngineError::AmountOutOfRange`] only under
/// [`NumericInputPolicy::Reject`]. The input record is never modified.
///
/// # Examples
///
/// ```
/// use site_payroll::calculation::{NumericInputPolicy, set_field};
/// use site_payroll::models::{PayrollDetail, PayrollField};
/// use rust_decimal::Decimal;
///
/// let detail = PayrollDetail {
///     total_amount: Decimal::from(2_000_000),
///     ..Default::default()
/// };
///
/// let edited = set_field(
///     &detail,
///     PayrollField::IncomeTax,
///     "30,000",
///     NumericInputPolicy::DefaultToZero,
/// )
/// .unwrap();
/// assert_eq!(edited.income_tax, Decimal::from(30_000));
/// assert_eq!(edited.net_pay, Decimal::from(1_970_000));
/// ```
pub fn set_field(
    detail: &PayrollDetail,
    field: PayrollField,
    value: &str,
    policy: NumericInputPolicy,
) -> EngineResult<PayrollDetail> {
    let name = field.wire_name();
    let mut edited = detail.clone();

    match field {
        PayrollField::TotalAmount => edited.total_amount = amount_with_policy(name, value, policy)?,
        PayrollField::MealAllowance => {
            edited.meal_allowance = amount_with_policy(name, value, policy)?
        }
        PayrollField::MonthlySalaryForInsurance => {
            edited.monthly_salary_for_insurance = amount_with_policy(name, value, policy)?
        }
        PayrollField::IncomeTax => edited.income_tax = amount_with_policy(name, value, policy)?,
        PayrollField::LocalIncomeTax => {
            edited.local_income_tax = amount_with_policy(name, value, policy)?
        }
        PayrollField::InsuranceAmount(category) => {
            *edited.insurance_amount_mut(category) = amount_with_policy(name, value, policy)?
        }
        PayrollField::RetirementDeductionDays => {
            edited.retirement_deduction_days = days_with_policy(name, value, policy)?
        }
        PayrollField::ReasonForLeaving => {
            let reason = value.trim();
            edited.reason_for_leaving = (!reason.is_empty()).then(|| reason.to_string());
        }
    }

    let edited = recompute(&edited);
    debug!(
        field = name,
        total_deductions = %edited.total_deductions,
        net_pay = %edited.net_pay,
        "Payroll field updated"
    );
    Ok(edited)
}

/// Flips whether an insurance category is deducted and recomputes.
///
/// The category's amount is left as stored, so toggling twice restores the
/// original totals without re-entering anything.
///
/// # Examples
///
/// ```
/// use site_payroll::calculation::toggle_applicability;
/// use site_payroll::models::{InsuranceCategory, PayrollDetail};
/// use rust_decimal::Decimal;
///
/// let detail = PayrollDetail {
///     total_amount: Decimal::from(1_000_000),
///     health_insurance_amount: Decimal::from(35_000),
///     is_health_insurance_applicable: true,
///     ..Default::default()
/// };
///
/// let off = toggle_applicability(&detail, InsuranceCategory::HealthInsurance);
/// assert_eq!(off.total_deductions, Decimal::ZERO);
/// assert_eq!(off.health_insurance_amount, Decimal::from(35_000));
///
/// let on = toggle_applicability(&off, InsuranceCategory::HealthInsurance);
/// assert_eq!(on.total_deductions, Decimal::from(35_000));
/// ```
pub fn toggle_applicability(detail: &PayrollDetail, category: InsuranceCategory) -> PayrollDetail {
    let mut edited = detail.clone();
    let flag = edited.applicable_mut(category);
    *flag = !*flag;

    let edited = recompute(&edited);
    debug!(
        category = %category,
        applicable = edited.is_applicable(category),
        total_deductions = %edited.total_deductions,
        net_pay = %edited.net_pay,
        "Insurance applicability toggled"
    );
    edited
}

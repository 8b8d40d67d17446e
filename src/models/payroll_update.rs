//! Save body for a payroll record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PayrollDetail, money};

/// The editable inputs of a [`PayrollDetail`], as sent to
/// `PATCH /admin/sites/{siteId}/payrolls/{payrollId}`.
///
/// Derived fields are not representable here, so they can never be sent:
/// the server recomputes them and returns the canonical record.
///
/// # Example
///
/// ```
/// use site_payroll::models::{PayrollDetail, PayrollUpdate};
/// use rust_decimal::Decimal;
///
/// let detail = PayrollDetail {
///     income_tax: Decimal::from(50_000),
///     net_pay: Decimal::from(1_000),
///     ..Default::default()
/// };
/// let body = serde_json::to_value(PayrollUpdate::from(&detail)).unwrap();
/// assert_eq!(body["incomeTax"], 50000);
/// assert!(body.get("netPay").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollUpdate {
    /// Meal allowance.
    #[serde(with = "money")]
    pub meal_allowance: Decimal,
    /// Income tax.
    #[serde(with = "money")]
    pub income_tax: Decimal,
    /// Local income tax.
    #[serde(with = "money")]
    pub local_income_tax: Decimal,
    /// Employment insurance flag.
    pub is_employment_insurance_applicable: bool,
    /// Employment insurance amount.
    #[serde(with = "money")]
    pub employment_insurance_amount: Decimal,
    /// National pension flag.
    pub is_national_pension_applicable: bool,
    /// National pension amount.
    #[serde(with = "money")]
    pub national_pension_amount: Decimal,
    /// Health insurance flag.
    pub is_health_insurance_applicable: bool,
    /// Health insurance amount.
    #[serde(with = "money")]
    pub health_insurance_amount: Decimal,
    /// Long-term care flag.
    pub is_long_term_care_applicable: bool,
    /// Long-term care amount.
    #[serde(with = "money")]
    pub long_term_care_amount: Decimal,
    /// Retirement deduction flag.
    pub is_retirement_deduction_applicable: bool,
    /// Reason for leaving, `null` clears it.
    pub reason_for_leaving: Option<String>,
}

impl From<&PayrollDetail> for PayrollUpdate {
    fn from(detail: &PayrollDetail) -> Self {
        Self {
            meal_allowance: detail.meal_allowance,
            income_tax: detail.income_tax,
            local_income_tax: detail.local_income_tax,
            is_employment_insurance_applicable: detail.is_employment_insurance_applicable,
            employment_insurance_amount: detail.employment_insurance_amount,
            is_national_pension_applicable: detail.is_national_pension_applicable,
            national_pension_amount: detail.national_pension_amount,
            is_health_insurance_applicable: detail.is_health_insurance_applicable,
            health_insurance_amount: detail.health_insurance_amount,
            is_long_term_care_applicable: detail.is_long_term_care_applicable,
            long_term_care_amount: detail.long_term_care_amount,
            is_retirement_deduction_applicable: detail.is_retirement_deduction_applicable,
            reason_for_leaving: detail.reason_for_leaving.clone(),
        }
    }
}

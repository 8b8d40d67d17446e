//! Payroll detail model.
//!
//! This module contains the [`PayrollDetail`] record exchanged with the site
//! administration API, the [`InsuranceCategory`] enum naming its four
//! toggleable social-insurance deductions, and the [`PayrollKey`] used to
//! address a record remotely.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

use super::money;

/// One of the four statutory insurance deductions whose applicability can be
/// toggled per payroll record.
///
/// # Example
///
/// ```
/// use site_payroll::models::InsuranceCategory;
///
/// let category: InsuranceCategory = "isNationalPensionApplicable".parse().unwrap();
/// assert_eq!(category, InsuranceCategory::NationalPension);
/// assert_eq!(category.amount_field(), "nationalPensionAmount");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsuranceCategory {
    /// Employment insurance (고용보험).
    EmploymentInsurance,
    /// National pension (국민연금).
    NationalPension,
    /// Health insurance (건강보험).
    HealthInsurance,
    /// Long-term care insurance (장기요양보험).
    LongTermCare,
}

impl InsuranceCategory {
    /// All categories in the order they appear on a payslip.
    pub const ALL: [InsuranceCategory; 4] = [
        InsuranceCategory::EmploymentInsurance,
        InsuranceCategory::NationalPension,
        InsuranceCategory::HealthInsurance,
        InsuranceCategory::LongTermCare,
    ];

    /// The camelCase name of the category itself.
    pub fn as_str(&self) -> &'static str {
        match self {
            InsuranceCategory::EmploymentInsurance => "employmentInsurance",
            InsuranceCategory::NationalPension => "nationalPension",
            InsuranceCategory::HealthInsurance => "healthInsurance",
            InsuranceCategory::LongTermCare => "longTermCare",
        }
    }

    /// The wire name of the amount field for this category.
    pub fn amount_field(&self) -> &'static str {
        match self {
            InsuranceCategory::EmploymentInsurance => "employmentInsuranceAmount",
            InsuranceCategory::NationalPension => "nationalPensionAmount",
            InsuranceCategory::HealthInsurance => "healthInsuranceAmount",
            InsuranceCategory::LongTermCare => "longTermCareAmount",
        }
    }

    /// The wire name of the applicability flag for this category.
    pub fn flag_field(&self) -> &'static str {
        match self {
            InsuranceCategory::EmploymentInsurance => "isEmploymentInsuranceApplicable",
            InsuranceCategory::NationalPension => "isNationalPensionApplicable",
            InsuranceCategory::HealthInsurance => "isHealthInsuranceApplicable",
            InsuranceCategory::LongTermCare => "isLongTermCareApplicable",
        }
    }
}

impl fmt::Display for InsuranceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsuranceCategory {
    type Err = EngineError;

    /// Accepts the category name or its flag field name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        InsuranceCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == name || category.flag_field() == name)
            .ok_or_else(|| EngineError::UnknownCategory {
                name: name.to_string(),
            })
    }
}

/// A single worker's payroll for one period, as returned by the site
/// administration API.
///
/// `total_deductions` and `net_pay` are derived fields. They are kept
/// consistent by [`crate::calculation::recompute`] and are never sent back
/// to the server.
///
/// # Example
///
/// ```
/// use site_payroll::models::PayrollDetail;
/// use rust_decimal::Decimal;
///
/// let detail: PayrollDetail = serde_json::from_str(
///     r#"{"totalAmount": 3000000, "incomeTax": 50000, "isHealthInsuranceApplicable": true}"#,
/// )
/// .unwrap();
/// assert_eq!(detail.total_amount, Decimal::from(3_000_000));
/// assert!(detail.is_health_insurance_applicable);
/// assert!(!detail.is_national_pension_applicable);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayrollDetail {
    /// Gross pay for the period.
    #[serde(with = "money")]
    pub total_amount: Decimal,
    /// Meal allowance (informational).
    #[serde(with = "money")]
    pub meal_allowance: Decimal,
    /// Monthly salary used as the insurance base (informational).
    #[serde(with = "money")]
    pub monthly_salary_for_insurance: Decimal,
    /// Income tax, always deducted.
    #[serde(with = "money")]
    pub income_tax: Decimal,
    /// Local income tax, always deducted.
    #[serde(with = "money")]
    pub local_income_tax: Decimal,

    /// Employment insurance amount.
    #[serde(with = "money")]
    pub employment_insurance_amount: Decimal,
    /// Whether employment insurance is deducted.
    pub is_employment_insurance_applicable: bool,
    /// National pension amount.
    #[serde(with = "money")]
    pub national_pension_amount: Decimal,
    /// Whether national pension is deducted.
    pub is_national_pension_applicable: bool,
    /// Health insurance amount.
    #[serde(with = "money")]
    pub health_insurance_amount: Decimal,
    /// Whether health insurance is deducted.
    pub is_health_insurance_applicable: bool,
    /// Long-term care insurance amount.
    #[serde(with = "money")]
    pub long_term_care_amount: Decimal,
    /// Whether long-term care insurance is deducted.
    pub is_long_term_care_applicable: bool,

    /// Whether the retirement (severance) deduction applies (informational).
    pub is_retirement_deduction_applicable: bool,
    /// Days counted towards the retirement deduction (informational).
    pub retirement_deduction_days: Option<u32>,
    /// Free-text reason for leaving the site (informational).
    pub reason_for_leaving: Option<String>,

    /// Derived: sum of all applied deductions.
    #[serde(with = "money")]
    pub total_deductions: Decimal,
    /// Derived: gross pay minus total deductions. May be negative.
    #[serde(with = "money")]
    pub net_pay: Decimal,
}

impl PayrollDetail {
    /// Returns the stored amount for an insurance category, applied or not.
    pub fn insurance_amount(&self, category: InsuranceCategory) -> Decimal {
        match category {
            InsuranceCategory::EmploymentInsurance => self.employment_insurance_amount,
            InsuranceCategory::NationalPension => self.national_pension_amount,
            InsuranceCategory::HealthInsurance => self.health_insurance_amount,
            InsuranceCategory::LongTermCare => self.long_term_care_amount,
        }
    }

    /// Returns whether an insurance category is currently deducted.
    pub fn is_applicable(&self, category: InsuranceCategory) -> bool {
        match category {
            InsuranceCategory::EmploymentInsurance => self.is_employment_insurance_applicable,
            InsuranceCategory::NationalPension => self.is_national_pension_applicable,
            InsuranceCategory::HealthInsurance => self.is_health_insurance_applicable,
            InsuranceCategory::LongTermCare => self.is_long_term_care_applicable,
        }
    }

    pub(crate) fn insurance_amount_mut(&mut self, category: InsuranceCategory) -> &mut Decimal {
        match category {
            InsuranceCategory::EmploymentInsurance => &mut self.employment_insurance_amount,
            InsuranceCategory::NationalPension => &mut self.national_pension_amount,
            InsuranceCategory::HealthInsurance => &mut self.health_insurance_amount,
            InsuranceCategory::LongTermCare => &mut self.long_term_care_amount,
        }
    }

    pub(crate) fn applicable_mut(&mut self, category: InsuranceCategory) -> &mut bool {
        match category {
            InsuranceCategory::EmploymentInsurance => &mut self.is_employment_insurance_applicable,
            InsuranceCategory::NationalPension => &mut self.is_national_pension_applicable,
            InsuranceCategory::HealthInsurance => &mut self.is_health_insurance_applicable,
            InsuranceCategory::LongTermCare => &mut self.is_long_term_care_applicable,
        }
    }
}

/// Identifies a payroll record on the remote API.
///
/// The worker id only appears in the fetch path; saves address the payroll
/// directly under its site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayrollKey {
    /// The construction site the payroll belongs to.
    pub site_id: u64,
    /// The worker the payroll was computed for.
    pub worker_id: u64,
    /// The payroll record itself.
    pub payroll_id: u64,
}

impl PayrollKey {
    /// Creates a key from its three ids.
    pub fn new(site_id: u64, worker_id: u64, payroll_id: u64) -> Self {
        Self {
            site_id,
            worker_id,
            payroll_id,
        }
    }
}

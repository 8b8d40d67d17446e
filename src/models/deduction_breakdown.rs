//! Itemised deduction breakdown.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{InsuranceCategory, money};

/// A component of the deduction sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionComponent {
    /// Income tax (소득세).
    IncomeTax,
    /// Local income tax (지방소득세).
    LocalIncomeTax,
    /// Employment insurance.
    EmploymentInsurance,
    /// National pension.
    NationalPension,
    /// Health insurance.
    HealthInsurance,
    /// Long-term care insurance.
    LongTermCare,
}

impl From<InsuranceCategory> for DeductionComponent {
    fn from(category: InsuranceCategory) -> Self {
        match category {
            InsuranceCategory::EmploymentInsurance => DeductionComponent::EmploymentInsurance,
            InsuranceCategory::NationalPension => DeductionComponent::NationalPension,
            InsuranceCategory::HealthInsurance => DeductionComponent::HealthInsurance,
            InsuranceCategory::LongTermCare => DeductionComponent::LongTermCare,
        }
    }
}

/// One line of a [`DeductionBreakdown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    /// Which deduction this line describes.
    pub component: DeductionComponent,
    /// The stored amount, whether or not it is applied.
    #[serde(with = "money")]
    pub amount: Decimal,
    /// Whether the amount counts towards the total.
    pub applied: bool,
    /// What this line adds to the total: `amount` if applied, else zero.
    #[serde(with = "money")]
    pub contribution: Decimal,
}

/// The itemised result of summing a payroll's deductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    /// Taxes first, then the four insurance categories.
    pub lines: Vec<DeductionLine>,
    /// Sum of all contributions.
    #[serde(with = "money")]
    pub total_deductions: Decimal,
    /// Gross pay minus `total_deductions`.
    #[serde(with = "money")]
    pub net_pay: Decimal,
}

impl DeductionBreakdown {
    /// Returns the line for a component, if present.
    pub fn line(&self, component: DeductionComponent) -> Option<&DeductionLine> {
        self.lines.iter().find(|line| line.component == component)
    }

    /// Returns the lines that were excluded from the total.
    pub fn excluded(&self) -> impl Iterator<Item = &DeductionLine> {
        self.lines.iter().filter(|line| !line.applied)
    }
}

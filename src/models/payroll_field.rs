//! Editable payroll fields.

use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

use super::InsuranceCategory;

/// An input field of a [`super::PayrollDetail`] that a user may edit.
///
/// Derived fields (`totalDeductions`, `netPay`) and the applicability flags
/// are deliberately absent: the former are recomputed, the latter are
/// toggled rather than set.
///
/// # Example
///
/// ```
/// use site_payroll::models::{InsuranceCategory, PayrollField};
///
/// let field: PayrollField = "healthInsuranceAmount".parse().unwrap();
/// assert_eq!(field, PayrollField::InsuranceAmount(InsuranceCategory::HealthInsurance));
/// assert!(field.is_monetary());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayrollField {
    /// `totalAmount`
    TotalAmount,
    /// `mealAllowance`
    MealAllowance,
    /// `monthlySalaryForInsurance`
    MonthlySalaryForInsurance,
    /// `incomeTax`
    IncomeTax,
    /// `localIncomeTax`
    LocalIncomeTax,
    /// `{category}Amount`
    InsuranceAmount(InsuranceCategory),
    /// `retirementDeductionDays`
    RetirementDeductionDays,
    /// `reasonForLeaving`
    ReasonForLeaving,
}

impl PayrollField {
    /// Every editable field.
    pub const ALL: [PayrollField; 11] = [
        PayrollField::TotalAmount,
        PayrollField::MealAllowance,
        PayrollField::MonthlySalaryForInsurance,
        PayrollField::IncomeTax,
        PayrollField::LocalIncomeTax,
        PayrollField::InsuranceAmount(InsuranceCategory::EmploymentInsurance),
        PayrollField::InsuranceAmount(InsuranceCategory::NationalPension),
        PayrollField::InsuranceAmount(InsuranceCategory::HealthInsurance),
        PayrollField::InsuranceAmount(InsuranceCategory::LongTermCare),
        PayrollField::RetirementDeductionDays,
        PayrollField::ReasonForLeaving,
    ];

    /// The camelCase name used on the wire.
    pub fn wire_name(&self) -> &'static str {
        match self {
            PayrollField::TotalAmount => "totalAmount",
            PayrollField::MealAllowance => "mealAllowance",
            PayrollField::MonthlySalaryForInsurance => "monthlySalaryForInsurance",
            PayrollField::IncomeTax => "incomeTax",
            PayrollField::LocalIncomeTax => "localIncomeTax",
            PayrollField::InsuranceAmount(category) => category.amount_field(),
            PayrollField::RetirementDeductionDays => "retirementDeductionDays",
            PayrollField::ReasonForLeaving => "reasonForLeaving",
        }
    }

    /// Returns true for fields holding a monetary amount.
    pub fn is_monetary(&self) -> bool {
        !matches!(
            self,
            PayrollField::RetirementDeductionDays | PayrollField::ReasonForLeaving
        )
    }
}

impl fmt::Display for PayrollField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for PayrollField {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        PayrollField::ALL
            .into_iter()
            .find(|field| field.wire_name() == name)
            .ok_or_else(|| EngineError::UnknownField {
                field: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_parses_from_its_wire_name() {
        for field in PayrollField::ALL {
            assert_eq!(field.wire_name().parse::<PayrollField>().unwrap(), field);
        }
    }

    #[test]
    fn test_derived_fields_are_not_editable() {
        for name in ["totalDeductions", "netPay", "isNationalPensionApplicable"] {
            let err = name.parse::<PayrollField>().unwrap_err();
            assert!(matches!(err, EngineError::UnknownField { .. }), "{name}");
        }
    }

    #[test]
    fn test_only_days_and_reason_are_non_monetary() {
        let non_monetary: Vec<_> = PayrollField::ALL
            .into_iter()
            .filter(|f| !f.is_monetary())
            .collect();
        assert_eq!(
            non_monetary,
            vec![
                PayrollField::RetirementDeductionDays,
                PayrollField::ReasonForLeaving
            ]
        );
    }
}

//! Core data models for payroll records.
//!
//! This module contains the payroll record exchanged with the site
//! administration API along with the types used to edit and itemise it.

pub mod money;

mod deduction_breakdown;
mod payroll_detail;
mod payroll_field;
mod payroll_update;

pub use deduction_breakdown::{DeductionBreakdown, DeductionComponent, DeductionLine};
pub use payroll_detail::{InsuranceCategory, PayrollDetail, PayrollKey};
pub use payroll_field::PayrollField;
pub use payroll_update::PayrollUpdate;

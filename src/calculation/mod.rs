//! Calculation logic for payroll deductions.
//!
//! This module derives total deductions and net pay from a payroll record,
//! applies single-field edits and insurance applicability toggles, and
//! parses raw user input under a configurable [`NumericInputPolicy`].

mod deductions;
mod field_edit;
mod input;

pub use deductions::{deduction_breakdown, is_consistent, recompute};
pub use field_edit::{set_field, toggle_applicability};
pub use input::{
    NumericInputPolicy, amount_with_policy, days_with_policy, parse_amount, parse_days,
};

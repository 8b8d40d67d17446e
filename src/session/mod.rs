//! Edit workflow for payroll records.
//!
//! A [`PayrollEditSession`] moves between viewing and editing. Entering
//! edit mode snapshots the record; cancelling restores it; saving sends the
//! editable inputs to a [`PayrollStore`] and, on success, shows the store's
//! canonical record.

mod editor;
mod store;

pub use editor::{EditState, PayrollEditSession};
pub use store::PayrollStore;

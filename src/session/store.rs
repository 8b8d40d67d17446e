//! Persistence boundary for payroll records.

use std::future::Future;

use crate::client::{AuthContext, ClientError};
use crate::models::{PayrollDetail, PayrollKey, PayrollUpdate};

/// The remote authority for payroll records.
///
/// [`crate::client::SitePayrollClient`] is the production implementation.
/// Both calls return the canonical record with derived fields consistent.
pub trait PayrollStore {
    /// Loads the record identified by `key`.
    fn fetch(
        &self,
        auth: &AuthContext,
        key: &PayrollKey,
    ) -> impl Future<Output = Result<PayrollDetail, ClientError>> + Send;

    /// Persists the editable inputs and returns the canonical record.
    fn save(
        &self,
        auth: &AuthContext,
        key: &PayrollKey,
        update: &PayrollUpdate,
    ) -> impl Future<Output = Result<PayrollDetail, ClientError>> + Send;
}

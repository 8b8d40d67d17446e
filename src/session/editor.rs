//! The viewing/editing workflow around a single payroll record.

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::calculation::{NumericInputPolicy, recompute, set_field, toggle_applicability};
use crate::client::AuthContext;
use crate::error::{EngineError, EngineResult};
use crate::models::{InsuranceCategory, PayrollDetail, PayrollField, PayrollKey, PayrollUpdate};

use super::PayrollStore;

/// Which state an edit session is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditState {
    /// Read-only; the record reflects the last fetched or saved values.
    Viewing,
    /// Mutable; every change recomputes the derived fields.
    Editing,
}

impl EditState {
    fn as_str(&self) -> &'static str {
        match self {
            EditState::Viewing => "viewing",
            EditState::Editing => "editing",
        }
    }
}

impl fmt::Display for EditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
enum Mode {
    Viewing,
    Editing { snapshot: PayrollDetail },
}

/// One user's edit session over one payroll record.
///
/// # Example
///
/// ```
/// use site_payroll::calculation::NumericInputPolicy;
/// use site_payroll::models::{InsuranceCategory, PayrollDetail, PayrollKey};
/// use site_payroll::session::{EditState, PayrollEditSession};
/// use rust_decimal::Decimal;
///
/// let record = PayrollDetail {
///     total_amount: Decimal::from(2_000_000),
///     national_pension_amount: Decimal::from(90_000),
///     ..Default::default()
/// };
/// let mut session = PayrollEditSession::from_record(
///     PayrollKey::new(1, 2, 3),
///     record,
///     NumericInputPolicy::DefaultToZero,
/// );
///
/// session.begin_edit().unwrap();
/// session.toggle_applicability(InsuranceCategory::NationalPension).unwrap();
/// assert_eq!(session.record().net_pay, Decimal::from(1_910_000));
///
/// session.cancel().unwrap();
/// assert_eq!(session.state(), EditState::Viewing);
/// assert_eq!(session.record().net_pay, Decimal::from(2_000_000));
/// ```
#[derive(Debug, Clone)]
pub struct PayrollEditSession {
    key: PayrollKey,
    record: PayrollDetail,
    mode: Mode,
    policy: NumericInputPolicy,
}

impl PayrollEditSession {
    /// Fetches the record and opens a session in [`EditState::Viewing`].
    ///
    /// # Errors
    ///
    /// A failed fetch returns [`EngineError::Store`] and no session: there
    /// is nothing to edit without a base record.
    pub async fn open<S: PayrollStore>(
        store: &S,
        auth: &AuthContext,
        key: PayrollKey,
        policy: NumericInputPolicy,
    ) -> EngineResult<Self> {
        let record = store.fetch(auth, &key).await.inspect_err(|err| {
            warn!(payroll_id = key.payroll_id, error = %err, "Payroll fetch failed");
        })?;
        Ok(Self::from_record(key, record, policy))
    }

    /// Opens a session over a record that is already in hand.
    pub fn from_record(key: PayrollKey, record: PayrollDetail, policy: NumericInputPolicy) -> Self {
        Self {
            key,
            record: recompute(&record),
            mode: Mode::Viewing,
            policy,
        }
    }

    /// The record as currently displayed.
    pub fn record(&self) -> &PayrollDetail {
        &self.record
    }

    /// The record's remote key.
    pub fn key(&self) -> &PayrollKey {
        &self.key
    }

    /// The numeric input policy applied to field edits.
    pub fn policy(&self) -> NumericInputPolicy {
        self.policy
    }

    /// The current state.
    pub fn state(&self) -> EditState {
        match self.mode {
            Mode::Viewing => EditState::Viewing,
            Mode::Editing { .. } => EditState::Editing,
        }
    }

    /// Returns true while editing with changes not yet saved.
    pub fn is_dirty(&self) -> bool {
        match &self.mode {
            Mode::Viewing => false,
            Mode::Editing { snapshot } => *snapshot != self.record,
        }
    }

    fn require(&self, expected: EditState, operation: &'static str) -> EngineResult<()> {
        let state = self.state();
        if state == expected {
            Ok(())
        } else {
            Err(EngineError::InvalidTransition {
                operation,
                state: state.as_str(),
            })
        }
    }

    /// `Viewing -> Editing`, remembering the current record as rollback point.
    pub fn begin_edit(&mut self) -> EngineResult<()> {
        self.require(EditState::Viewing, "begin editing")?;
        self.mode = Mode::Editing {
            snapshot: self.record.clone(),
        };
        Ok(())
    }

    /// Sets one field from raw input. Only allowed while editing.
    ///
    /// A rejected input (under [`NumericInputPolicy::Reject`]) leaves the
    /// record unchanged and the session still editing.
    pub fn set_field(&mut self, field: PayrollField, value: &str) -> EngineResult<&PayrollDetail> {
        self.require(EditState::Editing, "edit a field")?;
        self.record = set_field(&self.record, field, value, self.policy)?;
        Ok(&self.record)
    }

    /// Like [`Self::set_field`], with the field given by its wire name.
    pub fn set_field_named(&mut self, field: &str, value: &str) -> EngineResult<&PayrollDetail> {
        let field: PayrollField = field.parse()?;
        self.set_field(field, value)
    }

    /// Flips an insurance category on or off. Only allowed while editing.
    pub fn toggle_applicability(
        &mut self,
        category: InsuranceCategory,
    ) -> EngineResult<&PayrollDetail> {
        self.require(EditState::Editing, "toggle a deduction")?;
        self.record = toggle_applicability(&self.record, category);
        Ok(&self.record)
    }

    /// `Editing -> Viewing`, discarding every change since [`Self::begin_edit`].
    pub fn cancel(&mut self) -> EngineResult<()> {
        match std::mem::replace(&mut self.mode, Mode::Viewing) {
            Mode::Editing { snapshot } => {
                self.record = snapshot;
                Ok(())
            }
            Mode::Viewing => Err(EngineError::InvalidTransition {
                operation: "cancel",
                state: EditState::Viewing.as_str(),
            }),
        }
    }

    /// Sends the edited inputs to the store.
    ///
    /// On success the session moves to [`EditState::Viewing`] showing the
    /// store's canonical record. On failure it stays in
    /// [`EditState::Editing`] with the local edits and rollback point intact
    /// so the user can retry.
    pub async fn save<S: PayrollStore>(
        &mut self,
        store: &S,
        auth: &AuthContext,
    ) -> EngineResult<&PayrollDetail> {
        self.require(EditState::Editing, "save")?;
        let update = PayrollUpdate::from(&self.record);

        match store.save(auth, &self.key, &update).await {
            Ok(canonical) => {
                self.record = recompute(&canonical);
                self.mode = Mode::Viewing;
                info!(
                    site_id = self.key.site_id,
                    payroll_id = self.key.payroll_id,
                    net_pay = %self.record.net_pay,
                    "Payroll edits saved"
                );
                Ok(&self.record)
            }
            Err(err) => {
                warn!(
                    site_id = self.key.site_id,
                    payroll_id = self.key.payroll_id,
                    error = %err,
                    "Payroll save failed; edits kept"
                );
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use rust_decimal::Decimal;

    use super::*;
    use crate::client::ClientError;

    fn won(amount: i64) -> Decimal {
        Decimal::from(amount)
    }

    fn sample_detail() -> PayrollDetail {
        recompute(&PayrollDetail {
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
        })
    }

    /// In-memory store that echoes saves back and can be told to fail.
    #[derive(Default)]
    struct FakeStore {
        record: Mutex<Option<PayrollDetail>>,
        fail_with_status: Mutex<Option<u16>>,
        saved: Mutex<Vec<PayrollUpdate>>,
    }

    impl FakeStore {
        fn with_record(record: PayrollDetail) -> Self {
            Self {
                record: Mutex::new(Some(record)),
                ..Default::default()
            }
        }

        fn fail_next(&self, status: u16) {
            *self.fail_with_status.lock().unwrap() = Some(status);
        }

        fn failure(&self, endpoint: &str) -> Option<ClientError> {
            self.fail_with_status
                .lock()
                .unwrap()
                .take()
                .map(|status| match status {
                    401 => ClientError::AuthExpired {
                        endpoint: endpoint.to_string(),
                    },
                    status => ClientError::Api {
                        endpoint: endpoint.to_string(),
                        status,
                        message: "boom".to_string(),
                    },
                })
        }
    }

    impl PayrollStore for FakeStore {
        async fn fetch(
            &self,
            _auth: &AuthContext,
            _key: &PayrollKey,
        ) -> Result<PayrollDetail, ClientError> {
            if let Some(err) = self.failure("GET") {
                return Err(err);
            }
            self.record
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| ClientError::Api {
                    endpoint: "GET".to_string(),
                    status: 404,
                    message: "not found".to_string(),
                })
        }

        async fn save(
            &self,
            _auth: &AuthContext,
            _key: &PayrollKey,
            update: &PayrollUpdate,
        ) -> Result<PayrollDetail, ClientError> {
            if let Some(err) = self.failure("PATCH") {
                return Err(err);
            }
            self.saved.lock().unwrap().push(update.clone());

            let mut guard = self.record.lock().unwrap();
            let mut stored = guard.clone().unwrap_or_default();
            stored.meal_allowance = update.meal_allowance;
            stored.income_tax = update.income_tax;
            stored.local_income_tax = update.local_income_tax;
            stored.employment_insurance_amount = update.employment_insurance_amount;
            stored.is_employment_insurance_applicable = update.is_employment_insurance_applicable;
            stored.national_pension_amount = update.national_pension_amount;
            stored.is_national_pension_applicable = update.is_national_pension_applicable;
            stored.health_insurance_amount = update.health_insurance_amount;
            stored.is_health_insurance_applicable = update.is_health_insurance_applicable;
            stored.long_term_care_amount = update.long_term_care_amount;
            stored.is_long_term_care_applicable = update.is_long_term_care_applicable;
            stored.is_retirement_deduction_applicable = update.is_retirement_deduction_applicable;
            stored.reason_for_leaving = update.reason_for_leaving.clone();
            let stored = recompute(&stored);
            *guard = Some(stored.clone());
            Ok(stored)
        }
    }

    fn auth() -> AuthContext {
        AuthContext::new("test-token").unwrap()
    }

    fn key() -> PayrollKey {
        PayrollKey::new(10, 20, 30)
    }

    fn viewing_session() -> PayrollEditSession {
        PayrollEditSession::from_record(key(), sample_detail(), NumericInputPolicy::DefaultToZero)
    }

    #[test]
    fn test_new_session_is_viewing_and_clean() {
        let session = viewing_session();
        assert_eq!(session.state(), EditState::Viewing);
        assert!(!session.is_dirty());
        assert_eq!(session.record().net_pay, won(2_799_000));
    }

    #[test]
    fn test_from_record_recomputes_stale_derived_fields() {
        let mut stale = sample_detail();
        stale.net_pay = won(0);
        let session =
            PayrollEditSession::from_record(key(), stale, NumericInputPolicy::DefaultToZero);
        assert_eq!(session.record().net_pay, won(2_799_000));
    }

    #[test]
    fn test_edits_are_refused_while_viewing() {
        let mut session = viewing_session();
        let err = session.set_field(PayrollField::IncomeTax, "1").unwrap_err();
        assert_eq!(err.to_string(), "Cannot edit a field while viewing");

        assert!(
            session
                .toggle_applicability(InsuranceCategory::NationalPension)
                .is_err()
        );
        assert!(session.cancel().is_err());
        assert_eq!(session.record(), &sample_detail());
    }

    #[test]
    fn test_begin_edit_twice_is_refused() {
        let mut session = viewing_session();
        session.begin_edit().unwrap();
        assert!(matches!(
            session.begin_edit(),
            Err(EngineError::InvalidTransition {
                state: "editing",
                ..
            })
        ));
    }

    #[test]
    fn test_cancel_restores_snapshot() {
        let mut session = viewing_session();
        session.begin_edit().unwrap();
        session.set_field(PayrollField::IncomeTax, "0").unwrap();
        session
            .toggle_applicability(InsuranceCategory::NationalPension)
            .unwrap();
        assert!(session.is_dirty());

        session.cancel().unwrap();
        assert_eq!(session.state(), EditState::Viewing);
        assert_eq!(session.record(), &sample_detail());
    }

    #[test]
    fn test_set_field_named_parses_wire_names() {
        let mut session = viewing_session();
        session.begin_edit().unwrap();
        let record = session
            .set_field_named("longTermCareAmount", "20000")
            .unwrap();
        assert_eq!(record.total_deductions, won(208_000));

        assert!(matches!(
            session.set_field_named("netPay", "1"),
            Err(EngineError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_rejected_input_keeps_record_and_state() {
        let mut session =
            PayrollEditSession::from_record(key(), sample_detail(), NumericInputPolicy::Reject);
        session.begin_edit().unwrap();
        assert!(session.set_field(PayrollField::IncomeTax, "abc").is_err());
        assert_eq!(session.state(), EditState::Editing);
        assert!(!session.is_dirty());
    }

    #[tokio::test]
    async fn test_open_fetches_record() {
        let store = FakeStore::with_record(sample_detail());
        let session =
            PayrollEditSession::open(&store, &auth(), key(), NumericInputPolicy::DefaultToZero)
                .await
                .unwrap();
        assert_eq!(session.record(), &sample_detail());
        assert_eq!(session.key(), &key());
    }

    #[tokio::test]
    async fn test_failed_fetch_yields_no_session() {
        let store = FakeStore::with_record(sample_detail());
        store.fail_next(500);
        let result =
            PayrollEditSession::open(&store, &auth(), key(), NumericInputPolicy::DefaultToZero)
                .await;
        assert!(matches!(result, Err(EngineError::Store(_))));
    }

    #[tokio::test]
    async fn test_save_sends_inputs_and_returns_to_viewing() {
        let store = FakeStore::with_record(sample_detail());
        let mut session = viewing_session();
        session.begin_edit().unwrap();
        session
            .toggle_applicability(InsuranceCategory::NationalPension)
            .unwrap();

        let saved = session.save(&store, &auth()).await.unwrap();
        assert_eq!(saved.total_deductions, won(336_000));
        assert_eq!(saved.net_pay, won(2_664_000));
        assert_eq!(session.state(), EditState::Viewing);

        let sent = store.saved.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].is_national_pension_applicable);
        assert_eq!(sent[0].national_pension_amount, won(135_000));
    }

    #[tokio::test]
    async fn test_failed_save_keeps_edits_for_retry() {
        let store = FakeStore::with_record(sample_detail());
        let mut session = viewing_session();
        session.begin_edit().unwrap();
        session.set_field(PayrollField::IncomeTax, "60000").unwrap();

        store.fail_next(500);
        let err = session.save(&store, &auth()).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Store(ClientError::Api { status: 500, .. })
        ));
        assert_eq!(session.state(), EditState::Editing);
        assert_eq!(session.record().income_tax, won(60_000));
        assert!(store.saved.lock().unwrap().is_empty());

        let saved = session.save(&store, &auth()).await.unwrap();
        assert_eq!(saved.income_tax, won(60_000));
        assert_eq!(session.state(), EditState::Viewing);
    }

    #[tokio::test]
    async fn test_failed_save_still_allows_cancel_to_snapshot() {
        let store = FakeStore::with_record(sample_detail());
        let mut session = viewing_session();
        session.begin_edit().unwrap();
        session.set_field(PayrollField::IncomeTax, "60000").unwrap();

        store.fail_next(401);
        let err = session.save(&store, &auth()).await.unwrap_err();
        assert!(err.is_auth_expired());

        session.cancel().unwrap();
        assert_eq!(session.record(), &sample_detail());
    }

    #[tokio::test]
    async fn test_save_while_viewing_is_refused() {
        let store = FakeStore::with_record(sample_detail());
        let mut session = viewing_session();
        assert!(matches!(
            session.save(&store, &auth()).await,
            Err(EngineError::InvalidTransition { .. })
        ));
        assert!(store.saved.lock().unwrap().is_empty());
    }
}

use crate::core::money::Money;
use crate::core::participant::ParticipantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single debt as it was entered into the ledger.
///
/// Records `debtor` owing `creditor` an `amount`, before any netting or
/// simplification. The ledger keeps these in arrival order so the raw
/// history can always be compared with the simplified balances.
///
/// # Examples
///
/// ```
/// use group_ledger::core::money::{CurrencyCode, Money};
/// use group_ledger::core::participant::ParticipantId;
/// use group_ledger::core::record::DebtRecord;
/// use rust_decimal_macros::dec;
///
/// let record = DebtRecord::new(
///     Money::new(dec!(45.00), CurrencyCode::new("USD")).unwrap(),
///     ParticipantId::new("John"),
///     ParticipantId::new("Ben"),
/// )
/// .with_memo("groceries");
///
/// assert_eq!(record.memo(), Some("groceries"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtRecord {
    id: Uuid,
    amount: Money,
    debtor: ParticipantId,
    creditor: ParticipantId,
    recorded_at: DateTime<Utc>,
    memo: Option<String>,
}

impl DebtRecord {
    pub fn new(amount: Money, debtor: ParticipantId, creditor: ParticipantId) -> Self {
        Self::with_id(Uuid::new_v4(), amount, debtor, creditor)
    }

    /// Create a record with a specific ID (useful for testing / replay).
    pub fn with_id(
        id: Uuid,
        amount: Money,
        debtor: ParticipantId,
        creditor: ParticipantId,
    ) -> Self {
        Self {
            id,
            amount,
            debtor,
            creditor,
            recorded_at: Utc::now(),
            memo: None,
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn amount(&self) -> &Money {
        &self.amount
    }

    pub fn debtor(&self) -> &ParticipantId {
        &self.debtor
    }

    pub fn creditor(&self) -> &ParticipantId {
        &self.creditor
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }
}

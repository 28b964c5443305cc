use crate::core::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, case-sensitive name of a group member.
///
/// # Examples
///
/// ```
/// use group_ledger::core::participant::ParticipantId;
///
/// let ben = ParticipantId::new("Ben");
/// let lower = ParticipantId::new("ben");
/// assert_ne!(ben, lower);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this participant ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One outstanding debt: the snapshot owner owes `owed_to` this `amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    pub amount: Money,
    pub owed_to: ParticipantId,
}

/// The mirror of a [`Debt`], seen from the creditor's side.
///
/// Claims are never stored; they are derived by scanning the other
/// participants' debts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub amount: Money,
    pub owed_by: ParticipantId,
}

/// Owned copy of a participant and its outgoing debts at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSnapshot {
    pub id: ParticipantId,
    pub debts: Vec<Debt>,
}

impl ParticipantSnapshot {
    /// True when this participant owes nobody.
    pub fn is_settled(&self) -> bool {
        self.debts.is_empty()
    }

    /// Amount owed to `creditor`, if any.
    pub fn debt_to(&self, creditor: &ParticipantId) -> Option<&Money> {
        self.debts
            .iter()
            .find(|d| &d.owed_to == creditor)
            .map(|d| &d.amount)
    }
}

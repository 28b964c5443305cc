use crate::core::ledger::Ledger;
use crate::core::participant::ParticipantId;
use crate::core::record::DebtRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Net position of every participant, plus totals.
///
/// A positive position means the participant is owed money overall, a
/// negative one means it owes. Simplification only reshapes debts, so
/// the summary of a ledger always equals the summary of its raw history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSummary {
    /// Participant -> net position.
    pub positions: BTreeMap<ParticipantId, Decimal>,
    /// Sum of all outstanding debts.
    pub total_outstanding: Decimal,
    /// Number of outstanding debts.
    pub edge_count: usize,
}

impl BalanceSummary {
    /// Summarize a ledger's current, simplified debts.
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let mut positions = BTreeMap::new();
        let mut total_outstanding = Decimal::ZERO;
        let mut edge_count = 0;

        for participant in ledger.participants() {
            positions.entry(participant.id.clone()).or_insert(Decimal::ZERO);
            for debt in &participant.debts {
                let amount = debt.amount.amount();
                *positions.entry(participant.id.clone()).or_insert(Decimal::ZERO) -= amount;
                *positions.entry(debt.owed_to.clone()).or_insert(Decimal::ZERO) += amount;
                total_outstanding += amount;
                edge_count += 1;
            }
        }

        Self {
            positions,
            total_outstanding,
            edge_count,
        }
    }

    /// Summarize raw records as if nothing had been netted.
    ///
    /// `total_outstanding` and `edge_count` describe the gross records. The
    /// gross total saturates at `Decimal::MAX`, since netted histories may
    /// add up to more than a ledger can hold at once.
    pub fn from_records(records: &[DebtRecord]) -> Self {
        let mut positions = BTreeMap::new();
        let mut total_outstanding = Decimal::ZERO;

        for record in records {
            let amount = record.amount().amount();
            *positions.entry(record.debtor().clone()).or_insert(Decimal::ZERO) -= amount;
            *positions.entry(record.creditor().clone()).or_insert(Decimal::ZERO) += amount;
            total_outstanding = total_outstanding.saturating_add(amount);
        }

        Self {
            positions,
            total_outstanding,
            edge_count: records.len(),
        }
    }

    /// Net position of `id`, zero if it never appeared.
    pub fn position(&self, id: &ParticipantId) -> Decimal {
        self.positions.get(id).copied().unwrap_or(Decimal::ZERO)
    }

    /// Every debt has a matching credit: positions sum to zero.
    pub fn is_balanced(&self) -> bool {
        self.positions.values().copied().sum::<Decimal>() == Decimal::ZERO
    }

    /// Same net position for every participant, ignoring those at zero.
    pub fn same_positions(&self, other: &BalanceSummary) -> bool {
        let non_zero = |s: &BalanceSummary| -> BTreeMap<ParticipantId, Decimal> {
            s.positions
                .iter()
                .filter(|(_, v)| !v.is_zero())
                .map(|(k, v)| (k.clone(), v.normalize()))
                .collect()
        };
        non_zero(self) == non_zero(other)
    }
}

impl std::fmt::Display for BalanceSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Balance Summary ===")?;
        writeln!(f, "Outstanding debts: {}", self.edge_count)?;
        writeln!(f, "Total outstanding: {}", self.total_outstanding)?;
        writeln!(f, "Balanced:          {}", self.is_balanced())?;

        writeln!(f, "\nNet Positions:")?;
        for (participant, position) in &self.positions {
            let status = if *position > Decimal::ZERO {
                "OWED"
            } else if *position < Decimal::ZERO {
                "OWES"
            } else {
                "SETTLED"
            };
            writeln!(f, "  {:<15} {:>12}  [{}]", participant, position, status)?;
        }
        Ok(())
    }
}

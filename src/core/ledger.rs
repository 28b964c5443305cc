use crate::core::money::{CurrencyCode, Money};
use crate::core::participant::{Claim, Debt, ParticipantId, ParticipantSnapshot};
use crate::core::record::DebtRecord;
use crate::graph::debt_graph::{DebtGraph, NodeIndex};
use crate::optimization::netting::{record_and_net, surviving_direction};
use crate::optimization::pruning::prune;
use crate::optimization::simplification::{simplify_introduced, simplify_largest, Shortcut};
use log::{debug, trace};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors returned by ledger operations. None of them leave a partial update.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("participant {0} already exists")]
    DuplicateParticipant(ParticipantId),
    #[error("participant {0} is not registered")]
    UnknownParticipant(ParticipantId),
    #[error("ledger settles in {expected}, got an amount in {found}")]
    CurrencyMismatch {
        expected: CurrencyCode,
        found: CurrencyCode,
    },
    #[error("recording {0} would push the outstanding total past the largest representable amount")]
    Overflow(Money),
}

/// Shared-expense ledger for one group in one currency.
///
/// The ledger owns every participant and every outstanding debt. After
/// each recorded debt it runs a fixed pipeline:
///
/// 1. net the new debt against the reverse debt between the same pair;
/// 2. shortcut the largest debt in the group through its creditor;
/// 3. shortcut the debt touched by this update, forward and backward;
/// 4. prune every edge that reached zero.
///
/// Callers only ever see owned snapshots.
///
/// # Examples
///
/// ```
/// use group_ledger::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let usd = CurrencyCode::new("USD");
/// let mut ledger = Ledger::new(usd.clone());
/// for name in ["Ben", "John", "Mike"] {
///     ledger.register_participant(name).unwrap();
/// }
///
/// let thousand = Money::new(dec!(1000), usd).unwrap();
/// ledger.record_debt(thousand.clone(), &"John".into(), &"Ben".into()).unwrap();
/// ledger.record_debt(thousand, &"Ben".into(), &"Mike".into()).unwrap();
///
/// // John now owes Mike directly; Ben is out of the chain.
/// assert_eq!(ledger.balance(&"John".into(), &"Mike".into()).amount(), dec!(1000));
/// assert!(ledger.participant(&"Ben".into()).unwrap().is_settled());
/// ```
#[derive(Debug, Clone)]
pub struct Ledger {
    currency: CurrencyCode,
    graph: DebtGraph,
    history: Vec<DebtRecord>,
}

impl Ledger {
    pub fn new(currency: CurrencyCode) -> Self {
        Self {
            currency,
            graph: DebtGraph::new(),
            history: Vec::new(),
        }
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Zero in the ledger's currency.
    pub fn zero(&self) -> Money {
        Money::zero(self.currency.clone())
    }

    /// Add a participant with no debts.
    pub fn register_participant(
        &mut self,
        id: impl Into<ParticipantId>,
    ) -> Result<(), LedgerError> {
        let id = id.into();
        if self.graph.contains(&id) {
            return Err(LedgerError::DuplicateParticipant(id));
        }
        debug!("registering participant {}", id);
        self.graph.add_node(id);
        Ok(())
    }

    /// Record that `debtor` owes `creditor` `amount`, then re-simplify.
    pub fn record_debt(
        &mut self,
        amount: Money,
        debtor: &ParticipantId,
        creditor: &ParticipantId,
    ) -> Result<(), LedgerError> {
        self.apply(DebtRecord::new(amount, debtor.clone(), creditor.clone()))
    }

    /// Apply a prepared record.
    ///
    /// Both participants, the currency and the resulting outstanding total
    /// are validated before anything changes. The outstanding total never
    /// grows during simplification, so bounding it here keeps every later
    /// sum representable.
    ///
    /// A debt from a participant to itself is accepted as a no-op: it is
    /// not journaled and the simplification passes are skipped, so the
    /// existing debts keep their shape.
    pub fn apply(&mut self, record: DebtRecord) -> Result<(), LedgerError> {
        let debtor = self.require(record.debtor())?;
        let creditor = self.require(record.creditor())?;
        if record.amount().currency() != &self.currency {
            return Err(LedgerError::CurrencyMismatch {
                expected: self.currency.clone(),
                found: record.amount().currency().clone(),
            });
        }
        if debtor == creditor {
            debug!("ignoring debt of {} to itself", record.debtor());
            return Ok(());
        }
        self.total_outstanding()
            .plus(record.amount())
            .map_err(|_| LedgerError::Overflow(record.amount().clone()))?;

        debug!(
            "recording {} owed by {} to {}",
            record.amount(),
            record.debtor(),
            record.creditor()
        );
        self.settle(debtor, creditor, record.amount().amount());
        self.history.push(record);
        Ok(())
    }

    fn settle(&mut self, debtor: NodeIndex, creditor: NodeIndex, amount: Decimal) {
        if let Some(netting) = record_and_net(&mut self.graph, debtor, creditor, amount) {
            debug!(
                "netted {} -> {} ({}) against {} -> {} ({})",
                self.graph.id(debtor),
                self.graph.id(creditor),
                netting.gross_a_to_b,
                self.graph.id(creditor),
                self.graph.id(debtor),
                netting.gross_b_to_a
            );
        }

        if let Some(shortcut) = simplify_largest(&mut self.graph) {
            self.log_shortcut("largest debt", &shortcut);
        }

        if let Some((from, to)) = surviving_direction(&self.graph, debtor, creditor) {
            for shortcut in simplify_introduced(&mut self.graph, from, to) {
                self.log_shortcut("new debt", &shortcut);
            }
        }

        let removed = prune(&mut self.graph);
        trace!("pruned {} settled edges", removed);
    }

    fn log_shortcut(&self, pass: &str, shortcut: &Shortcut) {
        debug!(
            "{}: {} now owes {} {} directly instead of through {}",
            pass,
            self.graph.id(shortcut.debtor),
            self.graph.id(shortcut.creditor),
            shortcut.rerouted,
            self.graph.id(shortcut.intermediary)
        );
    }

    fn require(&self, id: &ParticipantId) -> Result<NodeIndex, LedgerError> {
        self.graph
            .index_of(id)
            .ok_or_else(|| LedgerError::UnknownParticipant(id.clone()))
    }

    fn money(&self, amount: Decimal) -> Money {
        debug_assert!(
            amount >= Decimal::ZERO,
            "negative amount {} left in the graph",
            amount
        );
        Money::new(amount, self.currency.clone()).unwrap_or_else(|_| self.zero())
    }

    fn snapshot(&self, idx: NodeIndex) -> ParticipantSnapshot {
        ParticipantSnapshot {
            id: self.graph.id(idx).clone(),
            debts: self
                .graph
                .outgoing(idx)
                .map(|(to, amount)| Debt {
                    amount: self.money(amount),
                    owed_to: self.graph.id(to).clone(),
                })
                .collect(),
        }
    }

    // --- Queries ---

    /// Every participant with its outstanding debts, in registration order.
    pub fn participants(&self) -> Vec<ParticipantSnapshot> {
        (0..self.graph.node_count())
            .map(|idx| self.snapshot(idx))
            .collect()
    }

    pub fn participant(&self, id: &ParticipantId) -> Option<ParticipantSnapshot> {
        self.graph.index_of(id).map(|idx| self.snapshot(idx))
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.graph.contains(id)
    }

    /// Number of registered participants.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// What `debtor` currently owes `creditor`; zero when either is unknown.
    pub fn balance(&self, debtor: &ParticipantId, creditor: &ParticipantId) -> Money {
        match (self.graph.index_of(debtor), self.graph.index_of(creditor)) {
            (Some(d), Some(c)) => self.money(self.graph.amount(d, c)),
            _ => self.zero(),
        }
    }

    /// Debts owed *to* `id`, derived from the other participants' debts.
    pub fn claims(&self, id: &ParticipantId) -> Result<Vec<Claim>, LedgerError> {
        let idx = self.require(id)?;
        Ok(self
            .graph
            .incoming(idx)
            .map(|(from, amount)| Claim {
                amount: self.money(amount),
                owed_by: self.graph.id(from).clone(),
            })
            .collect())
    }

    /// Amount owed to `id` minus amount it owes. Positive for net creditors.
    ///
    /// Both sums are bounded by the outstanding total, which `apply` keeps
    /// representable.
    pub fn net_position(&self, id: &ParticipantId) -> Option<Decimal> {
        let idx = self.graph.index_of(id)?;
        let owed: Decimal = self.graph.incoming(idx).map(|(_, a)| a).sum();
        let owing: Decimal = self.graph.outgoing(idx).map(|(_, a)| a).sum();
        Some(owed - owing)
    }

    /// Number of outstanding debts in the group.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Sum of all outstanding debts.
    pub fn total_outstanding(&self) -> Money {
        // `apply` rejects any debt that would overflow this sum.
        self.money(self.graph.total_amount().unwrap_or(Decimal::MAX))
    }

    /// Every accepted record, in arrival order.
    pub fn history(&self) -> &[DebtRecord] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd(amount: Decimal) -> Money {
        Money::new(amount, CurrencyCode::new("USD")).unwrap()
    }

    fn ledger_with(names: &[&str]) -> Ledger {
        let mut ledger = Ledger::new(CurrencyCode::new("USD"));
        for name in names {
            ledger.register_participant(*name).unwrap();
        }
        ledger
    }

    fn id(name: &str) -> ParticipantId {
        ParticipantId::new(name)
    }

    #[test]
    fn test_register_duplicate() {
        let mut ledger = ledger_with(&["Ben"]);
        assert_eq!(
            ledger.register_participant("Ben"),
            Err(LedgerError::DuplicateParticipant(id("Ben")))
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_unknown_participant_leaves_ledger_unchanged() {
        let mut ledger = ledger_with(&["Ben"]);
        let result = ledger.record_debt(usd(dec!(1000)), &id("John"), &id("Ben"));

        assert_eq!(result, Err(LedgerError::UnknownParticipant(id("John"))));
        assert!(ledger.participant(&id("Ben")).unwrap().is_settled());
        assert!(ledger.history().is_empty());
    }

    #[test]
    fn test_unknown_creditor() {
        let mut ledger = ledger_with(&["Ben"]);
        let result = ledger.record_debt(usd(dec!(5)), &id("Ben"), &id("Mike"));
        assert_eq!(result, Err(LedgerError::UnknownParticipant(id("Mike"))));
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let mut ledger = ledger_with(&["Ben", "John"]);
        let eur = Money::new(dec!(10), CurrencyCode::new("EUR")).unwrap();
        let result = ledger.record_debt(eur, &id("Ben"), &id("John"));

        assert!(matches!(result, Err(LedgerError::CurrencyMismatch { .. })));
        assert_eq!(ledger.edge_count(), 0);
    }

    #[test]
    fn test_overflowing_debt_rejected() {
        let mut ledger = ledger_with(&["Ben", "John", "Mike", "Greg"]);
        ledger.record_debt(usd(Decimal::MAX), &id("Ben"), &id("John")).unwrap();

        let result = ledger.record_debt(usd(Decimal::MAX), &id("Ben"), &id("John"));
        assert_eq!(result, Err(LedgerError::Overflow(usd(Decimal::MAX))));

        let result = ledger.record_debt(usd(dec!(1)), &id("Mike"), &id("Greg"));
        assert_eq!(result, Err(LedgerError::Overflow(usd(dec!(1)))));

        assert_eq!(ledger.history().len(), 1);
        assert_eq!(ledger.edge_count(), 1);
        assert_eq!(ledger.total_outstanding().amount(), Decimal::MAX);
        assert_eq!(ledger.net_position(&id("John")), Some(Decimal::MAX));
    }

    #[test]
    fn test_debt_at_the_limit_can_still_be_netted() {
        let mut ledger = ledger_with(&["Ben", "John"]);
        ledger.record_debt(usd(dec!(1)), &id("Ben"), &id("John")).unwrap();
        ledger
            .record_debt(usd(Decimal::MAX - dec!(1)), &id("John"), &id("Ben"))
            .unwrap();

        assert_eq!(
            ledger.balance(&id("John"), &id("Ben")).amount(),
            Decimal::MAX - dec!(2)
        );
        assert_eq!(ledger.history().len(), 2);
    }

    #[test]
    fn test_two_party_netting() {
        let mut ledger = ledger_with(&["Ben", "John"]);
        ledger.record_debt(usd(dec!(1000)), &id("Ben"), &id("John")).unwrap();
        ledger.record_debt(usd(dec!(1200)), &id("John"), &id("Ben")).unwrap();

        assert!(ledger.participant(&id("Ben")).unwrap().is_settled());
        assert_eq!(ledger.balance(&id("John"), &id("Ben")).amount(), dec!(200));
        assert_eq!(ledger.edge_count(), 1);
    }

    #[test]
    fn test_zero_amount_is_pruned() {
        let mut ledger = ledger_with(&["Ben", "John"]);
        ledger.record_debt(usd(Decimal::ZERO), &id("Ben"), &id("John")).unwrap();

        assert_eq!(ledger.edge_count(), 0);
        assert_eq!(ledger.history().len(), 1);
    }

    #[test]
    fn test_self_debt_is_ignored() {
        let mut ledger = ledger_with(&["Ben"]);
        ledger.record_debt(usd(dec!(50)), &id("Ben"), &id("Ben")).unwrap();

        assert_eq!(ledger.edge_count(), 0);
        assert!(ledger.history().is_empty());
    }

    #[test]
    fn test_self_debt_keeps_existing_debts() {
        let mut ledger = ledger_with(&["Ben", "John", "Mike"]);
        ledger.record_debt(usd(dec!(30)), &id("John"), &id("Ben")).unwrap();
        ledger.record_debt(usd(dec!(20)), &id("Mike"), &id("John")).unwrap();
        let before = ledger.participants();

        ledger.record_debt(usd(dec!(500)), &id("John"), &id("John")).unwrap();

        assert_eq!(ledger.participants(), before);
        assert_eq!(ledger.history().len(), 2);
    }

    #[test]
    fn test_claims_mirror_debts() {
        let mut ledger = ledger_with(&["Ben", "John", "Mike"]);
        ledger.record_debt(usd(dec!(30)), &id("John"), &id("Ben")).unwrap();
        ledger.record_debt(usd(dec!(20)), &id("Mike"), &id("Ben")).unwrap();

        let claims = ledger.claims(&id("Ben")).unwrap();
        assert_eq!(
            claims,
            vec![
                Claim {
                    amount: usd(dec!(30)),
                    owed_by: id("John"),
                },
                Claim {
                    amount: usd(dec!(20)),
                    owed_by: id("Mike"),
                },
            ]
        );
        assert_eq!(ledger.net_position(&id("Ben")), Some(dec!(50)));
        assert_eq!(ledger.total_outstanding().amount(), dec!(50));
        assert!(ledger.claims(&id("Greg")).is_err());
    }

    #[test]
    fn test_balance_for_unknown_is_zero() {
        let ledger = ledger_with(&["Ben"]);
        assert!(ledger.balance(&id("Ben"), &id("Nobody")).is_zero());
    }

    #[test]
    fn test_snapshots_are_detached() {
        let mut ledger = ledger_with(&["Ben", "John"]);
        ledger.record_debt(usd(dec!(10)), &id("Ben"), &id("John")).unwrap();

        let mut snapshot = ledger.participants();
        snapshot[0].debts.clear();

        assert_eq!(ledger.balance(&id("Ben"), &id("John")).amount(), dec!(10));
    }
}

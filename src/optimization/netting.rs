use crate::graph::debt_graph::{DebtGraph, NodeIndex};
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Outcome of offsetting two opposite debts between a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairNetting {
    /// The first party of the pair, as passed to [`net_pair`].
    pub party_a: NodeIndex,
    pub party_b: NodeIndex,
    /// Gross amount A owed B before netting.
    pub gross_a_to_b: Decimal,
    /// Gross amount B owed A before netting.
    pub gross_b_to_a: Decimal,
    /// Net amount: positive means A still owes B, negative means B owes A.
    pub net_amount: Decimal,
}

/// Merge a new debt into the graph and net it against the reverse edge.
///
/// If `debtor` already owes `creditor`, the amount is added to that edge;
/// otherwise a new edge is created. Then the pair is netted so at most
/// one direction keeps a positive amount.
pub fn record_and_net(
    graph: &mut DebtGraph,
    debtor: NodeIndex,
    creditor: NodeIndex,
    amount: Decimal,
) -> Option<PairNetting> {
    graph.add_amount(debtor, creditor, amount);
    net_pair(graph, debtor, creditor)
}

/// Offset the debts between `a` and `b` when both directions are stored.
///
/// If A owes B 100 and B owes A 60, A ends up owing B 40 and the B→A edge
/// drops to zero. Equal debts zero both edges. Returns `None` when only
/// one direction (or none) exists.
pub fn net_pair(graph: &mut DebtGraph, a: NodeIndex, b: NodeIndex) -> Option<PairNetting> {
    if !graph.has_edge(a, b) || !graph.has_edge(b, a) {
        return None;
    }

    let a_to_b = graph.amount(a, b);
    let b_to_a = graph.amount(b, a);

    match a_to_b.cmp(&b_to_a) {
        Ordering::Greater => {
            graph.set_amount(a, b, a_to_b - b_to_a);
            graph.set_amount(b, a, Decimal::ZERO);
        }
        Ordering::Less => {
            graph.set_amount(b, a, b_to_a - a_to_b);
            graph.set_amount(a, b, Decimal::ZERO);
        }
        Ordering::Equal => {
            graph.set_amount(a, b, Decimal::ZERO);
            graph.set_amount(b, a, Decimal::ZERO);
        }
    }

    Some(PairNetting {
        party_a: a,
        party_b: b,
        gross_a_to_b: a_to_b,
        gross_b_to_a: b_to_a,
        net_amount: a_to_b - b_to_a,
    })
}

/// The direction that still carries a positive amount between two parties.
pub fn surviving_direction(
    graph: &DebtGraph,
    a: NodeIndex,
    b: NodeIndex,
) -> Option<(NodeIndex, NodeIndex)> {
    if graph.amount(a, b) > Decimal::ZERO {
        Some((a, b))
    } else if graph.amount(b, a) > Decimal::ZERO {
        Some((b, a))
    } else {
        None
    }
}

//! Chain simplification.
//!
//! When M owes K and K owes X, part of the debt can skip K: M pays X
//! directly and owes K only the remainder. Each pass performs at most a
//! bounded number of such shortcuts, so repeated updates converge the
//! ledger gradually instead of running a global reduction every time.

use crate::graph::debt_graph::{DebtGraph, NodeIndex};
use crate::optimization::netting::{net_pair, PairNetting};
use rust_decimal::Decimal;

/// A debt rerouted around an intermediary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub debtor: NodeIndex,
    pub intermediary: NodeIndex,
    pub creditor: NodeIndex,
    /// Amount moved from `intermediary -> creditor` onto `debtor -> creditor`.
    pub rerouted: Decimal,
    /// Set when the new edge had to be netted against `creditor -> debtor`.
    pub netting: Option<PairNetting>,
}

/// Try to reroute `debtor -> intermediary` past the intermediary's largest debt.
///
/// With `mk` owed by the debtor and the intermediary's largest debt `kx`
/// owed to X, nothing happens unless `mk >= kx`. Otherwise the debtor
/// takes over `kx` towards X, the intermediary's edge to X drops to zero
/// and the debtor's edge to the intermediary keeps `mk - kx`.
pub fn shortcut(
    graph: &mut DebtGraph,
    debtor: NodeIndex,
    intermediary: NodeIndex,
) -> Option<Shortcut> {
    let mk = graph.amount(debtor, intermediary);
    if mk <= Decimal::ZERO {
        return None;
    }

    let (creditor, kx) = graph.largest_outgoing(intermediary)?;
    // X == M would mean a two-way pair, which netting never leaves behind.
    if creditor == debtor {
        return None;
    }

    let diff = mk - kx;
    if diff < Decimal::ZERO {
        return None;
    }

    graph.add_amount(debtor, creditor, kx);
    graph.set_amount(intermediary, creditor, Decimal::ZERO);
    graph.set_amount(debtor, intermediary, diff);
    let netting = net_pair(graph, debtor, creditor);

    Some(Shortcut {
        debtor,
        intermediary,
        creditor,
        rerouted: kx,
        netting,
    })
}

/// Shortcut the globally largest debt through its creditor.
pub fn simplify_largest(graph: &mut DebtGraph) -> Option<Shortcut> {
    let (debtor, intermediary, _) = graph.largest_edge()?;
    shortcut(graph, debtor, intermediary)
}

/// Give the debt `from -> to` touched by the latest update a chance to
/// collapse, even when it is not the global maximum.
///
/// Forward: `from` owes `to`, who owes someone else. Backward: someone
/// owes `from`, who owes `to` (or someone larger).
pub fn simplify_introduced(
    graph: &mut DebtGraph,
    from: NodeIndex,
    to: NodeIndex,
) -> Vec<Shortcut> {
    let mut applied = Vec::new();

    if let Some(forward) = shortcut(graph, from, to) {
        applied.push(forward);
    }

    if let Some((upstream, _)) = graph.largest_incoming(from) {
        if let Some(backward) = shortcut(graph, upstream, from) {
            applied.push(backward);
        }
    }

    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::participant::ParticipantId;
    use rust_decimal_macros::dec;

    fn graph_of(names: &[&str]) -> DebtGraph {
        let mut graph = DebtGraph::new();
        for name in names {
            graph.add_node(ParticipantId::new(*name));
        }
        graph
    }

    fn net_of(graph: &DebtGraph, idx: NodeIndex) -> Decimal {
        let owed: Decimal = graph.incoming(idx).map(|(_, a)| a).sum();
        let owing: Decimal = graph.outgoing(idx).map(|(_, a)| a).sum();
        owed - owing
    }

    #[test]
    fn test_exact_chain_collapses() {
        // M -> K -> X, 100 each.
        let mut graph = graph_of(&["M", "K", "X"]);
        graph.set_amount(0, 1, dec!(100));
        graph.set_amount(1, 2, dec!(100));

        let applied = shortcut(&mut graph, 0, 1).unwrap();

        assert_eq!(applied.rerouted, dec!(100));
        assert_eq!(graph.amount(0, 2), dec!(100));
        assert_eq!(graph.amount(0, 1), Decimal::ZERO);
        assert_eq!(graph.amount(1, 2), Decimal::ZERO);
    }

    #[test]
    fn test_partial_reroute_keeps_remainder() {
        let mut graph = graph_of(&["M", "K", "X"]);
        graph.set_amount(0, 1, dec!(150));
        graph.set_amount(1, 2, dec!(100));

        shortcut(&mut graph, 0, 1).unwrap();

        assert_eq!(graph.amount(0, 1), dec!(50));
        assert_eq!(graph.amount(0, 2), dec!(100));
        assert_eq!(graph.amount(1, 2), Decimal::ZERO);
    }

    #[test]
    fn test_smaller_debt_is_not_rerouted() {
        let mut graph = graph_of(&["M", "K", "X"]);
        graph.set_amount(0, 1, dec!(50));
        graph.set_amount(1, 2, dec!(100));

        assert!(shortcut(&mut graph, 0, 1).is_none());
        assert_eq!(graph.amount(0, 1), dec!(50));
        assert_eq!(graph.amount(1, 2), dec!(100));
    }

    #[test]
    fn test_shortcut_preserves_net_positions() {
        let mut graph = graph_of(&["M", "K", "X", "Y"]);
        graph.set_amount(0, 1, dec!(300));
        graph.set_amount(1, 2, dec!(120));
        graph.set_amount(1, 3, dec!(80));
        let before: Vec<Decimal> = (0..4).map(|i| net_of(&graph, i)).collect();

        shortcut(&mut graph, 0, 1).unwrap();

        let after: Vec<Decimal> = (0..4).map(|i| net_of(&graph, i)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_reroute_nets_against_reverse_edge() {
        // M -> K 100, K -> X 60, X -> M 20: M ends up owing X 40.
        let mut graph = graph_of(&["M", "K", "X"]);
        graph.set_amount(0, 1, dec!(100));
        graph.set_amount(1, 2, dec!(60));
        graph.set_amount(2, 0, dec!(20));

        let applied = shortcut(&mut graph, 0, 1).unwrap();

        assert!(applied.netting.is_some());
        assert_eq!(graph.amount(0, 2), dec!(40));
        assert_eq!(graph.amount(2, 0), Decimal::ZERO);
        assert_eq!(graph.amount(0, 1), dec!(40));
    }

    #[test]
    fn test_no_self_loop() {
        let mut graph = graph_of(&["M", "K"]);
        graph.set_amount(0, 1, dec!(100));
        graph.set_amount(1, 0, dec!(10));

        assert!(shortcut(&mut graph, 0, 1).is_none());
        assert!(!graph.has_edge(0, 0));
    }

    #[test]
    fn test_simplify_largest_uses_global_maximum() {
        let mut graph = graph_of(&["A", "B", "C", "D"]);
        graph.set_amount(0, 1, dec!(10));
        graph.set_amount(2, 3, dec!(500));
        graph.set_amount(3, 0, dec!(200));

        let applied = simplify_largest(&mut graph).unwrap();

        assert_eq!((applied.debtor, applied.intermediary, applied.creditor), (2, 3, 0));
        assert_eq!(graph.amount(2, 0), dec!(200));
        assert_eq!(graph.amount(2, 3), dec!(300));
    }

    #[test]
    fn test_simplify_largest_on_empty_graph() {
        let mut graph = graph_of(&["A", "B"]);
        assert!(simplify_largest(&mut graph).is_none());
    }

    #[test]
    fn test_simplify_introduced_backward() {
        // John -> Ben existed, Ben -> Mike just arrived.
        let mut graph = graph_of(&["Ben", "John", "Mike"]);
        graph.set_amount(1, 0, dec!(1000));
        graph.set_amount(0, 2, dec!(1000));

        let applied = simplify_introduced(&mut graph, 0, 2);

        assert_eq!(applied.len(), 1);
        assert_eq!(graph.amount(1, 2), dec!(1000));
        assert_eq!(graph.amount(1, 0), Decimal::ZERO);
        assert_eq!(graph.amount(0, 2), Decimal::ZERO);
    }

    #[test]
    fn test_simplify_introduced_forward() {
        let mut graph = graph_of(&["A", "B", "C"]);
        graph.set_amount(1, 2, dec!(30));
        graph.set_amount(0, 1, dec!(30));

        let applied = simplify_introduced(&mut graph, 0, 1);

        assert_eq!(applied.len(), 1);
        assert_eq!(graph.amount(0, 2), dec!(30));
    }
}

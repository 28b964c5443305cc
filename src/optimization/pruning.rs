use crate::graph::debt_graph::DebtGraph;
use rust_decimal::Decimal;

/// Remove every edge whose amount is not strictly positive.
///
/// Returns the number of edges removed. Running it again straight away
/// removes nothing.
pub fn prune(graph: &mut DebtGraph) -> usize {
    graph.retain_edges(|amount| amount > Decimal::ZERO)
}

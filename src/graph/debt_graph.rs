use crate::core::participant::ParticipantId;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// Position of a participant in registration order.
pub type NodeIndex = usize;

/// A participant together with the debts it owes.
///
/// `outgoing` maps counterparty index to amount, so there is at most one
/// edge per direction and pair. Zero amounts may appear while an update
/// is in progress and are removed by pruning.
#[derive(Debug, Clone)]
struct Node {
    id: ParticipantId,
    outgoing: BTreeMap<NodeIndex, Decimal>,
}

/// Directed weighted graph of who owes whom.
///
/// Nodes are participants in registration order. Every "largest edge"
/// query walks nodes and counterparties in that order and keeps the first
/// strictly greatest positive amount, which makes all tie-breaks
/// deterministic. Edges at zero or below are invisible to those queries.
#[derive(Debug, Clone, Default)]
pub struct DebtGraph {
    nodes: Vec<Node>,
    index: HashMap<ParticipantId, NodeIndex>,
}

impl DebtGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a participant and return its index. Re-adding an existing id
    /// returns the existing index.
    pub fn add_node(&mut self, id: ParticipantId) -> NodeIndex {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = self.nodes.len();
        self.index.insert(id.clone(), idx);
        self.nodes.push(Node {
            id,
            outgoing: BTreeMap::new(),
        });
        idx
    }

    pub fn index_of(&self, id: &ParticipantId) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.index.contains_key(id)
    }

    pub fn id(&self, idx: NodeIndex) -> &ParticipantId {
        &self.nodes[idx].id
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Participant ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &ParticipantId> {
        self.nodes.iter().map(|n| &n.id)
    }

    /// Amount `from` owes `to`, zero when there is no edge.
    pub fn amount(&self, from: NodeIndex, to: NodeIndex) -> Decimal {
        self.nodes[from]
            .outgoing
            .get(&to)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Whether an edge `from -> to` is stored, whatever its amount.
    pub fn has_edge(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.nodes[from].outgoing.contains_key(&to)
    }

    /// Merge `amount` into the edge `from -> to`, creating it if needed.
    pub fn add_amount(&mut self, from: NodeIndex, to: NodeIndex, amount: Decimal) {
        *self.nodes[from]
            .outgoing
            .entry(to)
            .or_insert(Decimal::ZERO) += amount;
    }

    pub fn set_amount(&mut self, from: NodeIndex, to: NodeIndex, amount: Decimal) {
        self.nodes[from].outgoing.insert(to, amount);
    }

    /// Edges stored under `from`, including transient zero edges.
    pub fn outgoing(&self, from: NodeIndex) -> impl Iterator<Item = (NodeIndex, Decimal)> + '_ {
        self.nodes[from].outgoing.iter().map(|(&to, &amt)| (to, amt))
    }

    /// Edges pointing at `to`, as `(debtor, amount)`.
    pub fn incoming(&self, to: NodeIndex) -> impl Iterator<Item = (NodeIndex, Decimal)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(move |(from, node)| node.outgoing.get(&to).map(|&amt| (from, amt)))
    }

    /// All stored edges as `(debtor, creditor, amount)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, Decimal)> + '_ {
        self.nodes.iter().enumerate().flat_map(|(from, node)| {
            node.outgoing.iter().map(move |(&to, &amt)| (from, to, amt))
        })
    }

    /// Sum of all stored edges, `None` if it does not fit in a `Decimal`.
    pub fn total_amount(&self) -> Option<Decimal> {
        self.edges()
            .try_fold(Decimal::ZERO, |total, (_, _, amt)| total.checked_add(amt))
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.outgoing.len()).sum()
    }

    /// The largest positive debt owed by `from`.
    pub fn largest_outgoing(&self, from: NodeIndex) -> Option<(NodeIndex, Decimal)> {
        first_largest(self.outgoing(from))
    }

    /// The largest positive debt owed to `to`.
    pub fn largest_incoming(&self, to: NodeIndex) -> Option<(NodeIndex, Decimal)> {
        first_largest(self.incoming(to))
    }

    /// The largest positive debt in the whole graph, as `(debtor, creditor, amount)`.
    pub fn largest_edge(&self) -> Option<(NodeIndex, NodeIndex, Decimal)> {
        let mut best: Option<(NodeIndex, NodeIndex, Decimal)> = None;
        for (from, to, amount) in self.edges() {
            if amount > best.map_or(Decimal::ZERO, |(_, _, a)| a) {
                best = Some((from, to, amount));
            }
        }
        best
    }

    /// Keep only the edges for which `keep` returns true. Returns how many
    /// edges were removed.
    pub fn retain_edges<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(Decimal) -> bool,
    {
        let before = self.edge_count();
        for node in &mut self.nodes {
            node.outgoing.retain(|_, amount| keep(*amount));
        }
        before - self.edge_count()
    }
}

fn first_largest<I>(edges: I) -> Option<(NodeIndex, Decimal)>
where
    I: Iterator<Item = (NodeIndex, Decimal)>,
{
    let mut best: Option<(NodeIndex, Decimal)> = None;
    for (idx, amount) in edges {
        if amount > best.map_or(Decimal::ZERO, |(_, a)| a) {
            best = Some((idx, amount));
        }
    }
    best
}

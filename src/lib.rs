//! # group-ledger
//!
//! Shared-expense ledger that keeps a group's debts netted and simplified.
//!
//! Every recorded debt is merged with existing debts between the same
//! pair, then chains such as "A owes B, B owes C" are shortened so the
//! group holds as few pairwise balances as the greedy pass can find.
//!
//! ## Architecture
//!
//! - **core** — Money, participants, debt records and the [`Ledger`](crate::core::ledger::Ledger)
//! - **graph** — The owned debt graph the ledger mutates
//! - **optimization** — Netting, chain simplification, pruning and balance summaries
//! - **simulation** — Random debt histories for demos and benchmarks

pub mod core;
pub mod graph;
pub mod optimization;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::ledger::{Ledger, LedgerError};
    pub use crate::core::money::{CurrencyCode, Money, MoneyError};
    pub use crate::core::participant::{Claim, Debt, ParticipantId, ParticipantSnapshot};
    pub use crate::core::record::DebtRecord;
    pub use crate::optimization::positions::BalanceSummary;
}

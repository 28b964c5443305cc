//! Five-participant chain collapse, plus a random group.
//!
//! Each new debt extends the chain by one hop; the ledger shortens it
//! on every entry, so only the first debtor and the last creditor remain.

use group_ledger::prelude::*;
use group_ledger::simulation::random_expenses::{generate_random_expenses, ExpenseConfig};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("╔═══════════════════════════════════════════╗");
    println!("║  group-ledger: Five-Node Chain Collapse   ║");
    println!("╚═══════════════════════════════════════════╝\n");

    let usd = CurrencyCode::new("USD");
    let mut ledger = Ledger::new(usd.clone());
    for name in ["Ben", "John", "Mike", "Greg", "Frank"] {
        ledger.register_participant(name)?;
    }

    let chain = [("Mike", "John"), ("John", "Ben"), ("Ben", "Greg"), ("Greg", "Frank")];
    for (debtor, creditor) in chain {
        ledger.record_debt(
            Money::new(dec!(120), usd.clone())?,
            &ParticipantId::new(debtor),
            &ParticipantId::new(creditor),
        )?;
        println!(
            "After {} → {}: {} outstanding debt(s)",
            debtor,
            creditor,
            ledger.edge_count()
        );
    }

    println!("\nFinal balances:");
    for participant in ledger.participants() {
        for debt in &participant.debts {
            println!("  {} owes {} {}", participant.id, debt.owed_to, debt.amount);
        }
    }

    // --- Random group ---
    println!("\n━━━ Random Group (12 participants, 80 debts) ━━━\n");

    let config = ExpenseConfig {
        participant_count: 12,
        debt_count: 80,
        seed: Some(7),
        ..Default::default()
    };
    let history = generate_random_expenses(&config);

    let mut ledger = Ledger::new(config.currency.clone());
    for participant in &history.participants {
        ledger.register_participant(participant.clone())?;
    }
    for record in history.records {
        ledger.apply(record)?;
    }

    let simplified = BalanceSummary::from_ledger(&ledger);
    let raw = BalanceSummary::from_records(ledger.history());
    println!("Gross recorded:  {} in {} debts", raw.total_outstanding, raw.edge_count);
    println!(
        "Outstanding now: {} in {} debts",
        simplified.total_outstanding, simplified.edge_count
    );
    println!("Positions kept:  {}", simplified.same_positions(&raw));
    Ok(())
}

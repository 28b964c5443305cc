//! Two-party netting and a three-party chain collapse.
//!
//! Shows how the ledger keeps a single balance per pair and reroutes
//! debts around participants who only pass money along.

use group_ledger::prelude::*;
use rust_decimal_macros::dec;

fn print_balances(ledger: &Ledger) {
    for participant in ledger.participants() {
        if participant.is_settled() {
            println!("  {:<6} owes nobody", participant.id);
        }
        for debt in &participant.debts {
            println!("  {:<6} owes {:<6} {}", participant.id, debt.owed_to, debt.amount);
        }
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("╔═══════════════════════════════════════╗");
    println!("║  group-ledger: Basic Ledger Example   ║");
    println!("╚═══════════════════════════════════════╝\n");

    let usd = CurrencyCode::new("USD");

    // --- Scenario 1: Two-party netting ---
    println!("━━━ Scenario 1: Two-Party Netting ━━━\n");

    let mut ledger = Ledger::new(usd.clone());
    ledger.register_participant("Ben")?;
    ledger.register_participant("John")?;

    let ben = ParticipantId::new("Ben");
    let john = ParticipantId::new("John");

    println!("Ben owes John 1000, then John owes Ben 1200:");
    ledger.record_debt(Money::new(dec!(1000), usd.clone())?, &ben, &john)?;
    ledger.record_debt(Money::new(dec!(1200), usd.clone())?, &john, &ben)?;
    print_balances(&ledger);

    // --- Scenario 2: Chain collapse ---
    println!("━━━ Scenario 2: Chain Collapse ━━━\n");

    let mut ledger = Ledger::new(usd.clone());
    for name in ["Ben", "John", "Mike"] {
        ledger.register_participant(name)?;
    }
    let mike = ParticipantId::new("Mike");

    println!("John owes Ben 1000, then Ben owes Mike 1000:");
    ledger.record_debt(Money::new(dec!(1000), usd.clone())?, &john, &ben)?;
    ledger.record_debt(Money::new(dec!(1000), usd)?, &ben, &mike)?;
    print_balances(&ledger);

    println!("{}", BalanceSummary::from_ledger(&ledger));
    Ok(())
}

//! group-ledger CLI
//!
//! Replay a group's debts and print the simplified balances.
//!
//! # Usage
//!
//! ```bash
//! # Settle a group from a JSON file
//! group-ledger settle --input group.json
//!
//! # Output as JSON
//! group-ledger settle --input group.json --format json
//!
//! # Generate a random group for testing
//! group-ledger generate --participants 8 --debts 40 --seed 7
//! ```
//!
//! Set `RUST_LOG=group_ledger=debug` to trace every netting and shortcut.

use group_ledger::core::ledger::Ledger;
use group_ledger::core::money::{CurrencyCode, Money};
use group_ledger::core::participant::ParticipantId;
use group_ledger::core::record::DebtRecord;
use group_ledger::optimization::positions::BalanceSummary;
use group_ledger::simulation::random_expenses::{generate_random_expenses, ExpenseConfig};
use rust_decimal::Decimal;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"group-ledger — shared-expense ledger with automatic debt simplification

USAGE:
    group-ledger <COMMAND> [OPTIONS]

COMMANDS:
    settle      Replay a group's debts and show who owes whom
    generate    Generate a random group file (for testing)
    help        Show this message

OPTIONS (settle):
    --input <FILE>        Path to JSON group file
    --format <FORMAT>     Output format: text (default) or json

OPTIONS (generate):
    --participants <N>    Number of participants (default: 10)
    --debts <N>           Number of debts (default: 30)
    --currency <CODE>     Currency code (default: USD)
    --seed <N>            Seed for a reproducible group
    --output <FILE>       Write to file instead of stdout

EXAMPLES:
    group-ledger settle --input group.json
    group-ledger settle --input group.json --format json
    group-ledger generate --participants 5 --debts 20 --output group.json"#
    );
}

/// JSON schema for an input group.
#[derive(serde::Deserialize, serde::Serialize)]
struct GroupFile {
    #[serde(default = "default_currency")]
    currency: String,
    participants: Vec<String>,
    debts: Vec<DebtInput>,
}

#[derive(serde::Deserialize, serde::Serialize)]
struct DebtInput {
    debtor: String,
    creditor: String,
    amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    memo: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// JSON output schema for a settled group.
#[derive(serde::Serialize)]
struct SettleOutput {
    currency: String,
    total_outstanding: String,
    debt_count: usize,
    recorded: usize,
    participants: Vec<ParticipantOutput>,
}

#[derive(serde::Serialize)]
struct ParticipantOutput {
    id: String,
    net_position: String,
    owes: Vec<OwedOutput>,
}

#[derive(serde::Serialize)]
struct OwedOutput {
    to: String,
    amount: String,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn load_ledger(path: &str) -> Ledger {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("reading file '{}': {}", path, e)));

    let file: GroupFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "currency": "USD",
  "participants": ["Ben", "John"],
  "debts": [
    {{ "debtor": "Ben", "creditor": "John", "amount": "12.50", "memo": "lunch" }}
  ]
}}"#
        );
        process::exit(1);
    });

    let currency = CurrencyCode::new(&file.currency);
    let mut ledger = Ledger::new(currency.clone());
    for name in file.participants {
        ledger
            .register_participant(name)
            .unwrap_or_else(|e| fail(e));
    }

    for debt in file.debts {
        let amount: Decimal = debt
            .amount
            .parse()
            .unwrap_or_else(|e| fail(format!("invalid amount '{}': {}", debt.amount, e)));
        let money = Money::new(amount, currency.clone()).unwrap_or_else(|e| fail(e));
        let mut record = DebtRecord::new(
            money,
            ParticipantId::new(debt.debtor),
            ParticipantId::new(debt.creditor),
        );
        if let Some(memo) = debt.memo {
            record = record.with_memo(memo);
        }
        ledger.apply(record).unwrap_or_else(|e| fail(e));
    }
    ledger
}

fn option_value(args: &[String], i: usize, what: &str) -> String {
    args.get(i)
        .cloned()
        .unwrap_or_else(|| fail(format!("{} requires {}", args[i - 1], what)))
}

fn cmd_settle(args: &[String]) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(option_value(args, i, "a file path"));
            }
            "--format" => {
                i += 1;
                format = option_value(args, i, "'text' or 'json'");
            }
            other => fail(format!("unknown option: {}", other)),
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| fail("--input <FILE> is required"));
    let ledger = load_ledger(&path);
    let summary = BalanceSummary::from_ledger(&ledger);

    if format == "json" {
        let participants = ledger
            .participants()
            .into_iter()
            .map(|p| ParticipantOutput {
                net_position: summary.position(&p.id).to_string(),
                id: p.id.to_string(),
                owes: p
                    .debts
                    .iter()
                    .map(|d| OwedOutput {
                        to: d.owed_to.to_string(),
                        amount: d.amount.amount().to_string(),
                    })
                    .collect(),
            })
            .collect();

        let output = SettleOutput {
            currency: ledger.currency().to_string(),
            total_outstanding: ledger.total_outstanding().amount().to_string(),
            debt_count: ledger.edge_count(),
            recorded: ledger.history().len(),
            participants,
        };

        let json = serde_json::to_string_pretty(&output).unwrap_or_else(|e| fail(e));
        println!("{}", json);
    } else {
        println!("=== Group Balances ({}) ===", ledger.currency());
        for participant in ledger.participants() {
            if participant.is_settled() {
                println!("  {:<15} owes nobody", participant.id);
            }
            for debt in &participant.debts {
                println!("  {:<15} owes {:<15} {}", participant.id, debt.owed_to, debt.amount);
            }
        }
        println!("\nRecorded debts:    {}", ledger.history().len());
        println!("{}", summary);
    }
}

fn parse_number<T: std::str::FromStr>(args: &[String], i: usize) -> T {
    args.get(i)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| fail(format!("{} requires a number", args[i - 1])))
}

fn cmd_generate(args: &[String]) {
    let mut config = ExpenseConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--participants" => {
                i += 1;
                config.participant_count = parse_number(args, i);
            }
            "--debts" => {
                i += 1;
                config.debt_count = parse_number(args, i);
            }
            "--currency" => {
                i += 1;
                config.currency = CurrencyCode::new(option_value(args, i, "a currency code"));
            }
            "--seed" => {
                i += 1;
                config.seed = Some(parse_number(args, i));
            }
            "--output" => {
                i += 1;
                output_path = Some(option_value(args, i, "a file path"));
            }
            other => fail(format!("unknown option: {}", other)),
        }
        i += 1;
    }

    let history = generate_random_expenses(&config);

    let output = GroupFile {
        currency: config.currency.to_string(),
        participants: history.participants.iter().map(|p| p.to_string()).collect(),
        debts: history
            .records
            .iter()
            .map(|r| DebtInput {
                debtor: r.debtor().to_string(),
                creditor: r.creditor().to_string(),
                amount: r.amount().amount().to_string(),
                memo: None,
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).unwrap_or_else(|e| fail(e));

    if let Some(path) = output_path {
        fs::write(&path, &json)
            .unwrap_or_else(|e| fail(format!("writing to '{}': {}", path, e)));
        eprintln!(
            "Generated {} debts across {} participants → {}",
            history.records.len(),
            history.participants.len(),
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "settle" => cmd_settle(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}

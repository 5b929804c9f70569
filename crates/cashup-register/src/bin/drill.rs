//! # Register Drill
//!
//! Runs one full open/close drill against the in-memory gateway: previews
//! the count sheet, opens the register, then closes it with the same count.
//! Useful for exercising a register.toml before it reaches a real till.
//!
//! ## Usage
//! ```bash
//! # Drill with the default drawer (2 x Rs 5000, 3 x Rs 1000 = 13000)
//! cargo run -p cashup-register --bin drill
//!
//! # Custom declared balance and counts (id=quantity, repeatable)
//! cargo run -p cashup-register --bin drill -- --declared 13000 --count 1=2 --count 2=3
//!
//! # Load a register.toml
//! cargo run -p cashup-register --bin drill -- --config ./register.toml
//! ```
//!
//! An out-of-balance drawer is part of the drill: the rejection is printed
//! the way a till operator would see it, and the process still exits cleanly.

use std::env;
use std::path::PathBuf;

use tracing::Level;
use tracing_subscriber::EnvFilter;

use cashup_core::{validation, DenominationCounts, RegisterMode};
use cashup_register::{InMemorySessionGateway, RegisterConfig, RegisterCoordinator};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut declared = String::from("13000");
    let mut notes: Option<String> = None;
    let mut count_args: Vec<(i64, u32)> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-f" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--declared" | "-d" => {
                if i + 1 < args.len() {
                    declared = args[i + 1].clone();
                    i += 1;
                }
            }
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    match parse_count(&args[i + 1]) {
                        Some(entry) => count_args.push(entry),
                        None => eprintln!("Ignoring malformed count '{}'", args[i + 1]),
                    }
                    i += 1;
                }
            }
            "--notes" | "-n" => {
                if i + 1 < args.len() {
                    notes = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Cashup Register Drill");
                println!();
                println!("Usage: drill [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -f, --config <PATH>    register.toml to load (default: built-in drawer)");
                println!("  -d, --declared <N>     Declared balance (default: 13000)");
                println!("  -c, --count <ID=QTY>   Denomination count, repeatable (default: 1=2 2=3)");
                println!("  -n, --notes <TEXT>     Note attached to both transitions");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    if count_args.is_empty() {
        count_args = vec![(1, 2), (2, 3)];
    }
    let counts: DenominationCounts = count_args.into_iter().collect();

    println!("💵 Cashup Register Drill");
    println!("========================");

    let config = RegisterConfig::load(config_path)?;
    let tolerance = config.tolerance()?;
    let catalog = config.catalog()?;

    use cashup_register::DenominationCatalog;
    let denominations = catalog.denominations().await?;
    let notes_in_drawer = denominations.iter().filter(|d| d.is_note()).count();

    println!("Till: {}", config.till.name);
    println!("Tolerance: {}", tolerance);
    println!(
        "Drawer: {} denominations ({} notes, {} coins)",
        denominations.len(),
        notes_in_drawer,
        denominations.len() - notes_in_drawer
    );
    println!();
    println!("Count sheet (declared {}):", declared);
    for denomination in &denominations {
        let quantity = counts.get(denomination.id);
        if quantity > 0 {
            println!("  {} x {}", denomination.name, quantity);
        }
    }
    println!();

    let coordinator = RegisterCoordinator::new(catalog, InMemorySessionGateway::new())
        .with_tolerance(tolerance);

    // Live evaluation, the same numbers the count sheet shows the operator
    let evaluation = coordinator
        .preview(RegisterMode::Opening, &declared, &counts)
        .await?;
    println!(
        "Preview: difference {} (balanced: {})",
        evaluation.difference, evaluation.is_balanced
    );
    println!();

    let opened = match coordinator
        .open_register(&declared, counts.clone(), notes.clone())
        .await
    {
        Ok(session) => {
            println!("✓ Register opened: session {}", session.id);
            println!("  Opening balance: {}", session.opening_balance);
            session
        }
        Err(e) => {
            println!("✗ Open rejected: {}", e);
            return Ok(());
        }
    };

    match coordinator
        .close_register(&opened.id, &declared, counts, notes)
        .await
    {
        Ok(session) => {
            println!("✓ Register closed: session {}", session.id);
            if let Some(closing_balance) = session.closing_balance {
                println!("  Closing balance: {}", closing_balance);
            }
        }
        Err(e) => {
            println!("✗ Close rejected: {}", e);
            return Ok(());
        }
    }

    println!();
    println!(
        "✓ Drill complete! Sessions recorded: {}",
        coordinator.gateway().sessions().await.len()
    );

    Ok(())
}

/// Parses an `id=quantity` count argument. The quantity half follows the
/// count-sheet rule: anything unparseable clamps to zero.
fn parse_count(raw: &str) -> Option<(i64, u32)> {
    let (id, quantity) = raw.split_once('=')?;
    let id = id.trim().parse().ok()?;

    Some((id, validation::quantity_from_input(quantity)))
}

/// Initializes log output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cashup_register=trace` - Trace the register layer only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cashup_core=debug,cashup_register=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .init();
}

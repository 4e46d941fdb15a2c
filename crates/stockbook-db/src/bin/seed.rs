//! # Seed Data Generator
//!
//! Populates the database with demo products and opening stock for
//! development.
//!
//! ## Usage
//! ```bash
//! cargo run -p stockbook-db --bin seed
//!
//! # Specify database path
//! cargo run -p stockbook-db --bin seed -- --db ./data/stockbook.db
//! ```

use std::env;

use stockbook_core::MoveAction;
use stockbook_db::{Database, DbConfig};

/// Demo catalog: (barcode, name, sku, opening qty at MAIN).
const DEMO_PRODUCTS: &[(&str, &str, &str, i64)] = &[
    ("5449000000996", "Coca-Cola 330ml", "BEV-0001", 48),
    ("5449000131805", "Coca-Cola Zero 330ml", "BEV-0002", 36),
    ("4060800104441", "Pepsi 330ml", "BEV-0003", 24),
    ("8710398162229", "Lays Classic 175g", "SNK-0001", 30),
    ("5000159459228", "Snickers 50g", "SNK-0002", 60),
    ("4000417025005", "Milka Alpine Milk 100g", "SNK-0003", 40),
    ("4006381333931", "Stabilo Boss Highlighter", "OFF-0001", 12),
    ("4902505163081", "Pilot G2 Pen 0.7", "OFF-0002", 25),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = parse_db_arg().unwrap_or_else(|| "./stockbook.db".to_string());

    println!("Seeding {db_path}");

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let products = db.products();
    let ledger = db.ledger();

    for (barcode, name, sku, opening_qty) in DEMO_PRODUCTS {
        products.upsert(barcode, name, Some(sku)).await?;
        let level = ledger
            .record_move(MoveAction::In, barcode, *opening_qty, "MAIN")
            .await?;
        println!("  {barcode}  {name:<28} MAIN={level}");
    }

    let total = products.count().await?;
    println!("Done: {total} products in catalog");

    Ok(())
}

/// Extracts `--db <path>` from the command line.
fn parse_db_arg() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|a| a == "--db")
        .and_then(|i| args.get(i + 1).cloned())
}

//! # Seed Data Generator
//!
//! Creates the dining room tables and a starter menu.
//!
//! ## Usage
//! ```bash
//! # 10 tables (default) in ./data/tableside.db
//! cargo run -p tableside-db --bin seed
//!
//! # Custom amount and location
//! cargo run -p tableside-db --bin seed -- --tables 24 --db ./data/tableside.db
//! ```
//!
//! ## Generated Data
//! - Tables `1..=N`, capacities cycling 2 / 4 / 6
//! - A small menu, only when the products table is empty
//!
//! Re-running is safe: existing table numbers are skipped.

use std::env;

use tableside_core::Money;
use tableside_db::{Database, DbConfig};

/// Seat counts assigned round-robin.
const CAPACITIES: &[i64] = &[2, 4, 6];

/// Starter menu: (name, price in cents).
const MENU: &[(&str, i64)] = &[
    ("Pizza Margherita", 2550),
    ("Pizza Diavola", 2800),
    ("Spaghetti Carbonara", 2200),
    ("Lasagna Bolognese", 2400),
    ("Caesar Salad", 1650),
    ("Tiramisu", 900),
    ("Panna Cotta", 850),
    ("House Red Wine", 900),
    ("Sparkling Water", 450),
    ("Espresso Coffee", 350),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut table_count: i64 = 10;
    let mut db_path = String::from("./data/tableside.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--tables" | "-t" => {
                if i + 1 < args.len() {
                    table_count = args[i + 1].parse().unwrap_or(10);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Tableside Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -t, --tables <N>   Number of tables to create (default: 10)");
                println!("  -d, --db <PATH>    Database file path (default: ./data/tableside.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Tableside Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("Tables:   {}", table_count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Tables
    let tables = db.tables();
    let mut created = 0;
    for number in 1..=table_count {
        if tables.get_by_number(number).await?.is_some() {
            continue;
        }
        let capacity = CAPACITIES[(number as usize - 1) % CAPACITIES.len()];
        tables.insert(number, Some(capacity)).await?;
        created += 1;
    }
    println!(
        "✓ Created {} tables ({} already present)",
        created,
        table_count - created
    );

    // Menu
    let products = db.products();
    let existing = products.count().await?;
    if existing > 0 {
        println!("⚠ Menu already has {} products, skipping", existing);
    } else {
        for (name, cents) in MENU {
            products.insert(name, Money::from_cents(*cents)).await?;
        }
        println!("✓ Created {} products", MENU.len());
    }

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

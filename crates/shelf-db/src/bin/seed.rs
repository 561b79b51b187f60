//! # Seed Data Generator
//!
//! Populates the database with a demo catalog for development.
//!
//! ## Usage
//! ```bash
//! # Generate 60 products (default)
//! cargo run -p shelf-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p shelf-db --bin seed -- --count 200
//!
//! # Specify database path
//! cargo run -p shelf-db --bin seed -- --db ./data/shelf.db
//! ```
//!
//! ## Generated Products
//! Office and stationery items, each in a few variants. Prices and stock
//! derive from the product index, so two runs produce the same catalog
//! (apart from ids and timestamps).
//!
//! The default stays small: the combination finder is cubic in catalog size.

use std::env;

use shelf_core::{find_combinations, summarize, Money, ProductDraft};
use shelf_db::{Database, DbConfig};

/// Product families for realistic demo data
const FAMILIES: &[(&str, &[&str])] = &[
    (
        "Writing",
        &[
            "Ballpoint Pen",
            "Gel Pen",
            "Fountain Pen",
            "Pencil HB",
            "Mechanical Pencil",
            "Highlighter",
            "Fine Liner",
            "Marker",
        ],
    ),
    (
        "Paper",
        &[
            "Notebook A5",
            "Notebook A4",
            "Sticky Notes",
            "Index Cards",
            "Legal Pad",
            "Sketchbook",
            "Graph Paper",
            "Envelopes",
        ],
    ),
    (
        "Desk",
        &[
            "Stapler",
            "Hole Punch",
            "Tape Dispenser",
            "Paper Clips",
            "Binder Clips",
            "Desk Organizer",
            "Letter Tray",
            "Scissors",
        ],
    ),
];

/// Variants with their price addon in cents
const VARIANTS: &[(&str, i64)] = &[("Basic", 0), ("Plus", 150), ("Pro", 400)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 60;
    let mut db_path = String::from("./shelf.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse()?;
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
                println!("shelf Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 60)");
                println!("  -d, --db <PATH>    Database file path (default: ./shelf.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 shelf Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let start = std::time::Instant::now();
    let mut generated = 0;

    let items: Vec<(&str, &str)> = FAMILIES
        .iter()
        .flat_map(|(family, names)| names.iter().map(move |name| (*family, *name)))
        .collect();

    for seed in 0..count {
        let draft = generate_draft(&items, seed);
        let name = draft.name.clone();
        if let Err(e) = db.products().insert(draft).await {
            eprintln!("Failed to insert {}: {}", name, e);
            continue;
        }
        generated += 1;
    }

    println!("✓ Generated {} products in {:?}", generated, start.elapsed());

    println!();
    println!("Inventory summary:");
    let summary = summarize(&db.products().list_all().await?);
    println!("  Products:    {}", summary.product_count);
    println!("  Total value: {}", summary.total_value);
    if let Some(top) = &summary.top_product {
        println!("  Top product: {} ({})", top.name, top.inventory_value());
    }

    println!();
    let budget = Money::from_cents(1500);
    println!("Combinations within {}:", budget);
    let combos = find_combinations(&db.products().list_by_price().await?, budget)?;
    for combo in &combos {
        println!("  {} = {}", combo.product_names.join(" + "), combo.total);
    }

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

/// Generates a single draft with deterministic price and stock.
///
/// Seeds walk every item in every variant, then start over with a
/// round suffix on the name.
fn generate_draft(items: &[(&str, &str)], seed: usize) -> ProductDraft {
    let per_round = items.len() * VARIANTS.len();
    let round = seed / per_round;
    let slot = seed % per_round;

    let (family, item) = items[slot / VARIANTS.len()];
    let (variant, price_addon) = VARIANTS[slot % VARIANTS.len()];

    // base 0.49 - 9.48 plus variant addon
    let price_cents = 49 + ((seed * 37) % 900) as i64 + price_addon;

    // 0 - 120 units
    let stock_quantity = ((seed * 13) % 121) as i64;

    let name = if round == 0 {
        format!("{} {}", item, variant)
    } else {
        format!("{} {} #{}", item, variant, round + 1)
    };

    ProductDraft {
        name,
        description: Some(format!("{} supplies", family)),
        price_cents,
        stock_quantity,
    }
}

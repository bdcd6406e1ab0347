//! # Seed Data Generator
//!
//! Populates the database with development data: a pharmacy catalog,
//! a few customers, and the branch list.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p botica-db --bin seed
//!
//! # Specify database path
//! cargo run -p botica-db --bin seed -- --db ./data/botica.db
//! ```
//!
//! Each product gets stock between 5 and 120 units and a price between
//! S/ 2.50 and S/ 85.00, derived deterministically from its position so
//! reruns against a fresh file produce the same catalog.

use chrono::Utc;
use std::env;
use tracing_subscriber::EnvFilter;

use botica_core::{Branch, Customer, Product};
use botica_db::repository::branch::generate_branch_id;
use botica_db::repository::customer::generate_customer_id;
use botica_db::repository::product::generate_product_id;
use botica_db::{Database, DbConfig};

/// Pharmacy catalog for realistic test data.
const PRODUCTS: &[&str] = &[
    "Bismutol 87.33mg/5ml Suspensión",
    "Paracetamol 500mg x 10 Tabletas",
    "Ibuprofeno 400mg x 10 Tabletas",
    "Amoxicilina 500mg x 12 Cápsulas",
    "Omeprazol 20mg x 14 Cápsulas",
    "Loratadina 10mg x 10 Tabletas",
    "Naproxeno 550mg x 10 Tabletas",
    "Azitromicina 500mg x 3 Tabletas",
    "Salbutamol Inhalador 100mcg",
    "Clorfenamina 4mg x 20 Tabletas",
    "Diclofenaco Gel 1% 30g",
    "Metformina 850mg x 30 Tabletas",
    "Losartán 50mg x 30 Tabletas",
    "Enalapril 10mg x 30 Tabletas",
    "Sal de Andrews x 12 Sobres",
    "Panadol Antigripal x 10 Tabletas",
    "Hirudoid Crema 40g",
    "Ensure Advance Vainilla 850g",
    "Suero Oral Frutilla 500ml",
    "Alcohol Medicinal 70° 250ml",
    "Agua Oxigenada 120ml",
    "Gasa Estéril 10x10 x 5",
    "Termómetro Digital",
    "Mascarilla Quirúrgica x 50",
];

const CUSTOMERS: &[(&str, Option<&str>)] = &[
    ("María Quispe Huamán", Some("45678912")),
    ("Jorge Luis Paredes", Some("08765432")),
    ("Farmacias del Sur S.A.C.", Some("20512345678")),
    ("Cliente Varios", None),
];

const BRANCHES: &[&str] = &["Sucursal Centro", "Sucursal Miraflores", "Sucursal Norte"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./botica_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Botica POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./botica_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Botica POS Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database (migrations run on connect)
    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing products
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding catalog...");

    let now = Utc::now();
    for (idx, name) in PRODUCTS.iter().enumerate() {
        let product = Product {
            id: generate_product_id(),
            name: name.to_string(),
            // Stock 5-120, price S/ 2.50 - S/ 85.00, stable per index.
            quantity: 5 + ((idx * 23) % 116) as i64,
            price_cents: 250 + ((idx * 1371) % 8251) as i64,
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await?;
    }
    println!("  {} products", PRODUCTS.len());

    for (name, document) in CUSTOMERS {
        let customer = Customer {
            id: generate_customer_id(),
            name: name.to_string(),
            document: document.map(str::to_string),
            created_at: now,
        };
        db.customers().insert(&customer).await?;
    }
    println!("  {} customers", CUSTOMERS.len());

    for name in BRANCHES {
        let branch = Branch {
            id: generate_branch_id(),
            name: name.to_string(),
            created_at: now,
        };
        db.branches().insert(&branch).await?;
    }
    println!("  {} branches", BRANCHES.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

//! # Seed Data Generator
//!
//! Populates the database with demo customers and products for development.
//!
//! ## Usage
//! ```bash
//! # 20 customers, 200 products (default)
//! cargo run -p orderflow-db --bin seed
//!
//! # Custom amounts
//! cargo run -p orderflow-db --bin seed -- --customers 50 --products 1000
//!
//! # Specify database path (otherwise ORDERFLOW_DB_PATH or ./orderflow.db)
//! cargo run -p orderflow-db --bin seed -- --db ./data/orderflow.db
//!
//! # Place one demo order afterwards
//! cargo run -p orderflow-db --bin seed -- --demo-order
//! ```
//!
//! Products get a deterministic price ($0.99 - $19.98) and stock (0 - 50)
//! derived from their index, so repeated seeds of fresh databases match.

use std::env;

use orderflow_core::{OrderLineRequest, WorkflowConfig};
use orderflow_db::{Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Grace", "Linus", "Barbara", "Dennis", "Margaret", "Ken", "Frances", "Edsger",
];

const LAST_NAMES: &[&str] = &[
    "Lovelace", "Turing", "Hopper", "Torvalds", "Liskov", "Ritchie", "Hamilton", "Thompson",
    "Allen", "Dijkstra",
];

const PRODUCT_NAMES: &[&str] = &[
    "Notebook", "Pencil", "Stapler", "Desk Lamp", "Monitor Stand", "USB Cable", "Keyboard",
    "Mouse Pad", "Headphones", "Water Bottle", "Backpack", "Sticky Notes",
];

const VARIANTS: &[&str] = &["Small", "Medium", "Large", "Black", "White", "Blue"];

struct Args {
    customers: usize,
    products: usize,
    db_path: Option<String>,
    demo_order: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let Some(args) = parse_args() else {
        return Ok(());
    };

    let config = match &args.db_path {
        Some(path) => DbConfig::new(path),
        None => DbConfig::from_env(),
    };

    println!("Orderflow Seed Data Generator");
    println!("=============================");
    println!("Database:  {}", config.database_path.display());
    println!("Customers: {}", args.customers);
    println!("Products:  {}", args.products);
    println!();

    let db = Database::new(config).await?;
    println!("✓ Connected to database, migrations applied");

    let existing = db.products().count().await? + db.customers().count().await?;
    if existing > 0 {
        println!("⚠ Database already has data ({} rows)", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();

    let mut first_customer = None;
    for i in 0..args.customers {
        let first = FIRST_NAMES[i % FIRST_NAMES.len()];
        let last = LAST_NAMES[(i / FIRST_NAMES.len()) % LAST_NAMES.len()];
        let name = format!("{first} {last}");
        let email = format!("{}.{}.{}@example.com", first.to_lowercase(), last.to_lowercase(), i);

        match db.customers().create(&name, &email).await {
            Ok(customer) if first_customer.is_none() => first_customer = Some(customer),
            Ok(_) => {}
            Err(e) => warn!(email = %email, error = %e, "Failed to insert customer"),
        }
    }

    let mut stocked = Vec::new();
    for i in 0..args.products {
        let name = format!(
            "{} {}",
            PRODUCT_NAMES[i % PRODUCT_NAMES.len()],
            VARIANTS[(i / PRODUCT_NAMES.len()) % VARIANTS.len()]
        );
        let price_cents = 99 + ((i as i64 * 37) % 1900);
        let quantity = (i as i64 * 7) % 51;

        match db.products().create(&name, price_cents, quantity).await {
            Ok(product) if product.quantity > 0 => stocked.push(product),
            Ok(_) => {}
            Err(e) => warn!(name = %name, error = %e, "Failed to insert product"),
        }

        if (i + 1) % 100 == 0 {
            println!("  Generated {} products...", i + 1);
        }
    }

    println!();
    println!(
        "✓ Generated {} customers and {} products in {:?}",
        db.customers().count().await?,
        db.products().count().await?,
        start.elapsed()
    );

    if args.demo_order {
        match (first_customer, stocked.first()) {
            (Some(customer), Some(product)) => {
                let order = db
                    .order_workflow(WorkflowConfig::from_env())
                    .execute(&customer.id, &[OrderLineRequest::new(&product.id, 1)])
                    .await?;
                info!(order_id = %order.id, "Demo order placed");
                println!("✓ Demo order {} for {} ({})", order.id, customer.name, order.total());
            }
            _ => println!("⚠ No customer or stocked product, skipping demo order"),
        }
    }

    db.close().await;
    println!("✓ Seed complete!");

    Ok(())
}

/// Parses command line arguments. Returns `None` when help was printed.
fn parse_args() -> Option<Args> {
    let argv: Vec<String> = env::args().collect();

    let mut args = Args {
        customers: 20,
        products: 200,
        db_path: None,
        demo_order: false,
    };

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--customers" | "-c" => {
                if i + 1 < argv.len() {
                    args.customers = argv[i + 1].parse().unwrap_or(args.customers);
                    i += 1;
                }
            }
            "--products" | "-p" => {
                if i + 1 < argv.len() {
                    args.products = argv[i + 1].parse().unwrap_or(args.products);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < argv.len() {
                    args.db_path = Some(argv[i + 1].clone());
                    i += 1;
                }
            }
            "--demo-order" => args.demo_order = true,
            "--help" | "-h" => {
                println!("Orderflow Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --customers <N>  Number of customers (default: 20)");
                println!("  -p, --products <N>   Number of products (default: 200)");
                println!("  -d, --db <PATH>      Database file path (default: $ORDERFLOW_DB_PATH or ./orderflow.db)");
                println!("      --demo-order     Place one order through the workflow");
                println!("  -h, --help           Show this help message");
                return None;
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    Some(args)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=orderflow=trace` - Show trace for orderflow crates only
/// - Default: `info,orderflow=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,orderflow=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

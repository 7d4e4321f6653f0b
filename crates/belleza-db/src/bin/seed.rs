//! # Seed Data Generator
//!
//! Populates the database with demo data for development.
//!
//! ## Usage
//! ```bash
//! # Seed with defaults
//! cargo run -p belleza-db --bin seed
//!
//! # Custom article count
//! cargo run -p belleza-db --bin seed -- --count 500
//!
//! # Specify database path
//! cargo run -p belleza-db --bin seed -- --db ./data/belleza.db
//! ```
//!
//! ## Generated Data
//! - Beauty retail categories (skincare, haircare, makeup, fragrance, nails)
//! - Articles with EAN-style barcodes, stock levels and some expiration dates
//! - Two price lists: "Mostrador" (default) and "Mayorista"
//! - Prices on both lists with realistic margins
//! - A supplier linked to every article
//! - Customers, several with store-credit accounts in every standing
//! - One branch and an admin user

use chrono::{Duration, Utc};
use std::env;

use belleza_core::{
    Branch, CreditLimitType, CustomerKind, SaleUnit, StockAdjustmentKind, User, UserRole,
};
use belleza_db::service::article::NewArticle;
use belleza_db::service::customer::NewCustomer;
use belleza_db::{Database, DbConfig};

/// Beauty retail categories with product lines
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Skincare",
        &[
            "Crema Hidratante Facial",
            "Serum Vitamina C",
            "Protector Solar FPS50",
            "Agua Micelar",
            "Exfoliante Facial",
            "Mascarilla de Arcilla",
            "Contorno de Ojos",
            "Tónico Facial",
        ],
    ),
    (
        "Haircare",
        &[
            "Shampoo Nutritivo",
            "Acondicionador Reparador",
            "Máscara Capilar",
            "Aceite de Argán",
            "Spray Termoprotector",
            "Shampoo Anticaspa",
            "Crema para Peinar",
            "Ampolla Fortalecedora",
        ],
    ),
    (
        "Makeup",
        &[
            "Base Líquida",
            "Corrector de Ojeras",
            "Máscara de Pestañas",
            "Labial Mate",
            "Rubor Compacto",
            "Sombras Paleta",
            "Delineador Líquido",
            "Polvo Traslúcido",
        ],
    ),
    (
        "Fragrance",
        &[
            "Eau de Parfum Floral",
            "Eau de Toilette Cítrica",
            "Body Splash Vainilla",
            "Perfume Amaderado",
            "Colonia Fresca",
        ],
    ),
    (
        "Nails",
        &[
            "Esmalte Semipermanente",
            "Quitaesmalte",
            "Endurecedor de Uñas",
            "Aceite de Cutículas",
            "Top Coat Brillo",
        ],
    ),
];

/// Size variants with price addons in cents
const SIZES: &[(&str, i64)] = &[
    ("30ml", 0),
    ("75ml", 150),
    ("120ml", 300),
    ("200ml", 500),
    ("400ml", 800),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 120;
    let mut db_path = String::from("./belleza_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(120);
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
                println!("Belleza POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of articles to generate (default: 120)");
                println!("  -d, --db <PATH>    Database file path (default: ./belleza_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Belleza POS Seed Data Generator");
    println!("==================================");
    println!("Database: {}", db_path);
    println!("Articles: {}", count);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing articles
    let existing = db.articles().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} articles", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Categories
    println!();
    println!("Creating categories...");
    let category_service = db.category_service();
    let mut category_ids = Vec::new();
    for (name, _) in CATEGORIES {
        let category = category_service.create(name, None, 2100).await?;
        category_ids.push(category.id);
    }
    println!("  {} categories", category_ids.len());

    // Price lists
    println!("Creating price lists...");
    let list_service = db.price_list_service();
    let counter = list_service
        .create("Mostrador", Some("Precio de venta al público".to_string()), true)
        .await?;
    let wholesale = list_service
        .create("Mayorista", Some("Revendedoras y salones".to_string()), false)
        .await?;
    println!("  Mostrador (default), Mayorista");

    // Supplier
    println!("Creating supplier...");
    let supplier = {
        use belleza_core::Supplier;
        let next = db.suppliers().count().await? + 1;
        let now = Utc::now();
        let supplier = Supplier {
            id: uuid::Uuid::new_v4().to_string(),
            supplier_number: Some(format!("PRV{next:06}")),
            legal_name: "Distribuidora Bella SA".to_string(),
            trade_name: Some("DistriBella".to_string()),
            tax_id: "30-71234567-8".to_string(),
            phone: Some("+54 11 4555-0199".to_string()),
            email: Some("ventas@distribella.example".to_string()),
            contact_name: Some("Marcos Pereyra".to_string()),
            notes: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        db.suppliers().insert(&supplier).await?;
        supplier
    };

    // Articles with prices and stock
    println!();
    println!("Generating articles...");

    let article_service = db.article_service();
    let today = Utc::now().date_naive();
    let mut generated = 0usize;
    let start = std::time::Instant::now();

    'outer: for (category_idx, (_, products)) in CATEGORIES.iter().enumerate() {
        for (product_idx, product_name) in products.iter().enumerate() {
            for (size_idx, (size_name, price_addon)) in SIZES.iter().enumerate() {
                if generated >= count {
                    break 'outer;
                }

                let seed = category_idx * 1000 + product_idx * 40 + size_idx;

                // EAN-style barcode (Argentine 779 prefix, checksum not real)
                let barcode = format!("779{:010}", seed);

                // A slice of articles carries an expiration date
                let expires_on = match seed % 7 {
                    0 => Some(today + Duration::days(5)),   // critical
                    1 => Some(today + Duration::days(20)),  // upcoming
                    2 => Some(today + Duration::days(180)), // fine
                    _ => None,
                };

                let article = article_service
                    .create(NewArticle {
                        barcode,
                        description: format!("{} {}", product_name, size_name),
                        category_id: Some(category_ids[category_idx].clone()),
                        sale_unit: SaleUnit::Unit,
                        track_stock: true,
                        stock_min: 10_000,
                        stock_max: 60_000,
                        expires_on,
                    })
                    .await?;

                // Stock: some articles land below the minimum for the report
                let stock_units = (seed * 13) % 40;
                if stock_units > 0 {
                    article_service
                        .adjust_stock(
                            &article.id,
                            StockAdjustmentKind::Increase,
                            (stock_units as i64) * 1000,
                        )
                        .await?;
                }

                // Prices: counter price plus a wholesale discount
                let cost = 1_500 + ((seed * 17) % 4_000) as i64;
                let counter_price = cost * 2 + price_addon;
                let wholesale_price = cost * 3 / 2 + price_addon;

                article_service
                    .set_price(&article.id, &counter.id, cost, counter_price)
                    .await?;
                article_service
                    .set_price(&article.id, &wholesale.id, cost, wholesale_price)
                    .await?;

                article_service
                    .link_supplier(&article.id, &supplier.id, cost, true)
                    .await?;

                generated += 1;

                if generated % 50 == 0 {
                    println!("  Generated {} articles...", generated);
                }
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} articles in {:?}", generated, elapsed);

    // Customers across every credit standing
    println!();
    println!("Creating customers...");
    let customer_service = db.customer_service();

    let cash_only = NewCustomer {
        kind: CustomerKind::Individual,
        name: "Carla".to_string(),
        last_name: Some("Domínguez".to_string()),
        document_number: Some("28555111".to_string()),
        phone: None,
        email: None,
        address: None,
        credit_enabled: false,
        credit_limit_type: CreditLimitType::Limited,
        credit_limit_cents: 0,
        payment_term_days: 0,
        notes: None,
    };
    customer_service.create(cash_only).await?;

    let normal = customer_service
        .create(NewCustomer {
            kind: CustomerKind::Individual,
            name: "Lucía".to_string(),
            last_name: Some("Fernández".to_string()),
            document_number: Some("30123456".to_string()),
            phone: Some("+54 11 5555-0123".to_string()),
            email: Some("lucia@example.com".to_string()),
            address: None,
            credit_enabled: true,
            credit_limit_type: CreditLimitType::Limited,
            credit_limit_cents: 100_000,
            payment_term_days: 30,
            notes: None,
        })
        .await?;
    customer_service.register_sale(&normal.id, 30_000).await?;

    let warning = customer_service
        .create(NewCustomer {
            kind: CustomerKind::Company,
            name: "Salón Glamour SRL".to_string(),
            last_name: None,
            document_number: Some("30-70888999-1".to_string()),
            phone: None,
            email: None,
            address: Some("Av. Corrientes 2450, CABA".to_string()),
            credit_enabled: true,
            credit_limit_type: CreditLimitType::Limited,
            credit_limit_cents: 500_000,
            payment_term_days: 15,
            notes: Some("Retira los martes".to_string()),
        })
        .await?;
    customer_service.register_sale(&warning.id, 450_000).await?;

    let unlimited = customer_service
        .create(NewCustomer {
            kind: CustomerKind::Company,
            name: "Perfumerías del Sur SA".to_string(),
            last_name: None,
            document_number: Some("30-70777888-2".to_string()),
            phone: None,
            email: None,
            address: None,
            credit_enabled: true,
            credit_limit_type: CreditLimitType::Unlimited,
            credit_limit_cents: 0,
            payment_term_days: 60,
            notes: None,
        })
        .await?;
    customer_service.register_sale(&unlimited.id, 1_200_000).await?;

    println!("  4 customers (cash-only, normal, warning, unlimited)");

    // Branch and admin user
    println!("Creating branch and admin user...");
    let now = Utc::now();
    let branch = Branch {
        id: uuid::Uuid::new_v4().to_string(),
        name: "Casa Central".to_string(),
        address: Some("Av. Santa Fe 1234, CABA".to_string()),
        phone: Some("+54 11 4811-0000".to_string()),
        email: Some("central@belleza.example".to_string()),
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    db.branches().insert(&branch).await?;

    db.users()
        .insert(&User {
            id: uuid::Uuid::new_v4().to_string(),
            username: "admin".to_string(),
            // Placeholder hash; real hashing happens in the outer surface
            password_hash: "$argon2id$demo-not-a-real-hash".to_string(),
            full_name: "Administrador".to_string(),
            role: UserRole::Admin,
            branch_id: Some(branch.id.clone()),
            is_active: true,
            created_at: now,
            updated_at: now,
        })
        .await?;

    // Verify reports come back populated
    println!();
    println!("Verifying reports...");
    let low_stock = article_service.low_stock_report().await?;
    println!("  Low stock report: {} articles", low_stock.len());

    let expiring = article_service.expiration_report(today).await?;
    println!("  Expiration report: {} articles", expiring.len());

    let credit = customer_service.credit_report().await?;
    println!("  Credit report: {} accounts", credit.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

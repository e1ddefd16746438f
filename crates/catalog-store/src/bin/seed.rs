//! # Seed Data Generator
//!
//! Writes sample product and review record files for development.
//!
//! ## Usage
//! ```bash
//! # 12 products into the configured data folder (default)
//! cargo run -p catalog-store --bin seed
//!
//! # Custom amount
//! cargo run -p catalog-store --bin seed -- --count 20
//!
//! # Specific folder
//! cargo run -p catalog-store --bin seed -- --data ./data
//! ```
//!
//! ## Generated Records
//! - Ids start at 10, one `product{id}.txt` per product
//! - Drinks and foods alternate through the name table
//! - Foods get a best-before date a few days from today
//! - Up to three reviews per product in `reviews{id}.txt`; the product
//!   record carries the rating those reviews average to

use catalog_core::{Money, Product, ProductId, Rating, Review};
use catalog_store::codec::{format_product_record, format_review_record};
use catalog_store::CatalogConfig;
use chrono::{Days, Local};
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const FIRST_ID: u32 = 10;

/// (is_food, name) pairs cycled through in order.
const PRODUCTS: &[(bool, &str)] = &[
    (false, "Tea"),
    (false, "Coffee"),
    (true, "Cake"),
    (true, "Cookie"),
    (false, "Hot Chocolate"),
    (true, "Chocolate"),
    (false, "Orange Juice"),
    (true, "Croissant"),
    (false, "Lemonade"),
    (true, "Muffin"),
    (false, "Iced Tea"),
    (true, "Scone"),
];

const COMMENTS: &[&str] = &[
    "Rather weak",
    "Fine, but nothing special",
    "Good value",
    "Just right",
    "Perfect, would buy again",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = PRODUCTS.len();
    let mut data_folder: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(count);
                    i += 1;
                }
            }
            "--data" | "-d" => {
                if i + 1 < args.len() {
                    data_folder = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Catalog Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>     Number of products to generate (default: {})", PRODUCTS.len());
                println!("  -d, --data <PATH>   Data folder (default: from catalog.toml)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let mut config = CatalogConfig::load_or_default(None);
    if let Some(folder) = data_folder {
        config.paths.data_folder = folder;
    }
    let folder = config.paths.data_folder.clone();

    println!("Catalog Seed Data Generator");
    println!("===========================");
    println!("Data folder: {}", folder.display());
    println!("Products:    {}", count);
    println!();

    fs::create_dir_all(&folder)?;

    let existing = fs::read_dir(&folder)?
        .filter_map(Result::ok)
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| name.starts_with(&config.files.product_prefix))
                .unwrap_or(false)
        })
        .count();
    if existing > 0 {
        println!("⚠ Data folder already has {} product records", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the folder to regenerate.");
        return Ok(());
    }

    let mut written = 0;
    for seed in 0..count {
        let (product, reviews) = generate_product(seed)?;
        let id = product.id();

        let product_file = folder.join(format!("{}{}.txt", config.files.product_prefix, id));
        fs::write(&product_file, format_product_record(&product) + "\n")?;

        if !reviews.is_empty() {
            let lines: String = reviews
                .iter()
                .map(|review| format_review_record(id, review) + "\n")
                .collect();
            fs::write(folder.join(config.files.reviews_file_name(id)), lines)?;
        }

        info!(id = %id, name = product.name(), reviews = reviews.len(), "Seeded product");
        written += 1;
    }

    println!();
    println!("✓ Wrote {} product records", written);
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates one product and its reviews from a sequence number.
fn generate_product(seed: usize) -> Result<(Product, Vec<Review>), Box<dyn std::error::Error>> {
    let (is_food, base_name) = PRODUCTS[seed % PRODUCTS.len()];
    let round = seed / PRODUCTS.len();
    let name = if round == 0 {
        base_name.to_string()
    } else {
        format!("{} {}", base_name, round + 1)
    };

    let id = ProductId::new(FIRST_ID + seed as u32);

    // 0.99 - 4.99
    let price = Money::from_cents(99 + ((seed * 37) % 400) as i64);

    let reviews: Vec<Review> = (0..seed % 4)
        .map(|n| {
            let ordinal = ((seed + n * 3) % 5 + 1) as i64;
            Review::new(Rating::from_ordinal(ordinal), COMMENTS[(ordinal - 1) as usize])
        })
        .collect();
    let rating = Rating::average_of(reviews.iter().map(Review::rating));

    let product = if is_food {
        let best_before = Local::now()
            .date_naive()
            .checked_add_days(Days::new(1 + (seed % 5) as u64))
            .ok_or("best-before date out of range")?;
        Product::food(id, name, price, rating, best_before)?
    } else {
        Product::drink(id, name, price, rating)?
    };

    Ok((product, reviews))
}

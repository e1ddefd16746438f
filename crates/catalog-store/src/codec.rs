//! # Record Codec
//!
//! Decodes and encodes the one-line text records the catalog is persisted as.
//!
//! ## Record Formats
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  product file (first line)                                              │
//! │    kind,id,name,price,rating[,best_before]                              │
//! │    D,101,Tea,1.99,0                                                     │
//! │    F,103,Cake,3.99,0,2026-10-20                                         │
//! │                                                                         │
//! │  reviews file (one review per line)                                     │
//! │    id,rating,comments                                                   │
//! │    101,4,Nice hot cup of tea, just right                                │
//! │           └── comments keep their commas (split into 3 fields max)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices are parsed straight into [`Money`]; they never pass through a float.
//! Ratings out of range are clamped onto the scale like any other ordinal.

use catalog_core::{Money, Product, ProductId, ProductKind, Rating, Review};
use chrono::NaiveDate;

use crate::error::DecodeError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Decodes a product record.
///
/// ## Example
/// ```rust
/// use catalog_store::codec::parse_product;
///
/// let tea = parse_product("D,101,Tea,1.99,0").unwrap();
/// assert_eq!(tea.name(), "Tea");
/// assert_eq!(tea.price().cents(), 199);
/// ```
pub fn parse_product(line: &str) -> Result<Product, DecodeError> {
    let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();

    let expected = match fields[0] {
        "D" => 5,
        "F" => 6,
        other => return Err(DecodeError::UnknownKind(other.to_string())),
    };
    if fields.len() != expected {
        return Err(DecodeError::FieldCount {
            expected,
            found: fields.len(),
        });
    }

    let id = parse_id(fields[1])?;
    let name = fields[2];
    let price: Money = fields[3].parse()?;
    let rating = parse_rating(fields[4])?;

    let product = match fields[0] {
        "F" => {
            let best_before = NaiveDate::parse_from_str(fields[5], DATE_FORMAT)
                .map_err(|_| DecodeError::InvalidDate(fields[5].to_string()))?;
            Product::food(id, name, price, rating, best_before)?
        }
        _ => Product::drink(id, name, price, rating)?,
    };

    Ok(product)
}

/// Decodes a review record, returning the product id it belongs to.
///
/// ## Example
/// ```rust
/// use catalog_core::Rating;
/// use catalog_store::codec::parse_review;
///
/// let (id, review) = parse_review("101,4,Fine tea, thanks").unwrap();
/// assert_eq!(id.value(), 101);
/// assert_eq!(review.rating(), Rating::FourStar);
/// assert_eq!(review.comments(), "Fine tea, thanks");
/// ```
pub fn parse_review(line: &str) -> Result<(ProductId, Review), DecodeError> {
    let fields: Vec<&str> = line.trim().splitn(3, ',').collect();
    if fields.len() != 3 {
        return Err(DecodeError::FieldCount {
            expected: 3,
            found: fields.len(),
        });
    }

    let id = parse_id(fields[0].trim())?;
    let rating = parse_rating(fields[1].trim())?;

    Ok((id, Review::new(rating, fields[2].trim())))
}

/// Encodes a product as a record line (no trailing newline).
///
/// Commas are not escaped; names containing commas do not round-trip.
pub fn format_product_record(product: &Product) -> String {
    let mut line = format!(
        "{},{},{},{},{}",
        product.kind().code(),
        product.id(),
        product.name(),
        product.price(),
        product.rating().ordinal()
    );
    if let ProductKind::Food { best_before } = product.kind() {
        line.push(',');
        line.push_str(&best_before.format(DATE_FORMAT).to_string());
    }
    line
}

/// Encodes a review of product `id` as a record line.
pub fn format_review_record(id: ProductId, review: &Review) -> String {
    format!("{},{},{}", id, review.rating().ordinal(), review.comments())
}

fn parse_id(text: &str) -> Result<ProductId, DecodeError> {
    text.parse::<u32>()
        .map(ProductId::new)
        .map_err(|_| DecodeError::InvalidNumber {
            field: "id",
            value: text.to_string(),
        })
}

fn parse_rating(text: &str) -> Result<Rating, DecodeError> {
    text.parse::<i64>()
        .map(Rating::from_ordinal)
        .map_err(|_| DecodeError::InvalidNumber {
            field: "rating",
            value: text.to_string(),
        })
}

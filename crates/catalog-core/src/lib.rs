//! # catalog-core: Pure Domain Logic for the Product Catalog
//!
//! This crate holds the catalog's value types and the rules that act on
//! them, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/shop (driver)                           │   │
//! │  │    client threads: discounts ──► review ──► report              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    catalog-store                                │   │
//! │  │    CatalogStore (RwLock) · codec · loader · formatters          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ catalog-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  rating   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  Rating   │  │   rules   │  │   │
//! │  │   │  Review   │  │  percent  │  │  average  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductKind, Review)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`rating`] - The star rating scale and review averaging
//! - [`error`] - Domain error types
//! - [`validation`] - Argument validation
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::{Money, Product, ProductId, Rating};
//!
//! let tea = Product::drink(ProductId::new(101), "Tea", Money::from_cents(199), Rating::NotRated)
//!     .unwrap();
//!
//! let reviewed = tea.apply_rating(Rating::average_of([Rating::FourStar, Rating::FiveStar]));
//! assert_eq!(reviewed.rating(), Rating::FiveStar);
//! assert!(reviewed.discount().is_zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod rating;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ValidationError, ValidationResult};
pub use money::Money;
pub use rating::Rating;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Base discount rate in basis points (1000 = 10%).
pub const DISCOUNT_RATE_BPS: u32 = 1000;

/// Maximum length of a product name, in characters.
pub const MAX_NAME_LENGTH: usize = 200;

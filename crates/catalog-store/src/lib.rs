//! # catalog-store: Concurrent Catalog for the Product Catalog
//!
//! This crate owns the shared product → reviews mapping and everything
//! that reads or writes it: record files, locale formatting, reports and
//! discount tables.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Data Flow                                │
//! │                                                                         │
//! │  apps/shop client (review / report / discounts)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  catalog-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ CatalogStore  │    │ReportAssembler│    │  Formatters  │  │   │
//! │  │   │  (store.rs)   │◄───│  (report.rs)  │───►│ (format.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ RwLock<Map>   │    │ ReportSink    │    │ en-GB, fr-FR │  │   │
//! │  │   │ discount.rs   │    │ FileReportSink│    │ ...          │  │   │
//! │  │   └───────▲───────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           │                                                     │   │
//! │  │   ┌───────┴───────┐    ┌───────────────┐                       │   │
//! │  │   │    loader     │───►│     codec     │                       │   │
//! │  │   └───────────────┘    └───────────────┘                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   data/product{id}.txt   data/reviews{id}.txt                   │   │
//! │  │   reports/product{id}_{client}.txt                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The lock-protected catalog
//! - [`discount`] - Discount aggregation over the store
//! - [`report`] - Per-product reports and their sinks
//! - [`format`] - Locale formatters
//! - [`codec`] - Record line encoding and decoding
//! - [`loader`] - Bulk load from the data folder
//! - [`config`] - Folders, file name patterns, default locale
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_store::{load_catalog, CatalogConfig, ReportAssembler};
//! use std::sync::Arc;
//!
//! let config = CatalogConfig::load(None)?;
//! let store = Arc::new(load_catalog(&config)?);
//! let reports = ReportAssembler::from_config(Arc::clone(&store), &config)?;
//!
//! store.review(ProductId::new(101), Rating::FourStar, "Another review")?;
//! reports.print_product_report(ProductId::new(101), "fr-FR", "Client 1")?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod config;
pub mod discount;
pub mod error;
pub mod format;
pub mod loader;
pub mod report;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::CatalogConfig;
pub use error::{DecodeError, StoreError, StoreResult};
pub use format::{Formatters, ProductFormatter, ResourceFormatter, DEFAULT_LANGUAGE_TAG};
pub use loader::load_catalog;
pub use report::{FileReportSink, ReportAssembler, ReportSink};
pub use store::{CatalogStore, ProductSnapshot};

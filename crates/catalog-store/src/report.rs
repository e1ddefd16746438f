//! # Report Assembly
//!
//! Per-product reports: the product line followed by its reviews, rendered
//! for a language tag and handed to a [`ReportSink`].
//!
//! ## Report Flow
//! ```text
//! print_product_report(id, tag, client)
//!      │
//!      ├─► store.snapshot(id)        shared lock, released on return
//!      │        │
//!      │        └─ NotFound ──► warn! + Err
//!      ▼
//! formatter = formatters.get(tag)   (unknown tag → default)
//!      │
//!      ▼
//! "<product line>\n"
//! "<review line>\n" ...   or   "<no.reviews text>\n"
//!      │
//!      ▼
//! sink.write_report(id, client, text)   no lock held
//!      │
//!      └─ I/O failure ──► warn! + Err(Persistence)
//! ```
//!
//! [`FileReportSink`] writes `<reports_folder>/product{id}_{client}.txt`,
//! truncating any earlier report for the same (id, client).

use catalog_core::{Product, ProductId};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{CatalogConfig, FileSettings};
use crate::error::{StoreError, StoreResult};
use crate::format::{Formatters, KEY_NO_REVIEWS};
use crate::store::{CatalogStore, ProductSnapshot};

// =============================================================================
// Sinks
// =============================================================================

/// Destination for finished reports.
pub trait ReportSink: Send + Sync {
    /// Stores `contents` as the report for (`id`, `client`), replacing any
    /// earlier one, and returns where it went.
    fn write_report(&self, id: ProductId, client: &str, contents: &str) -> StoreResult<PathBuf>;
}

/// Writes reports as files under the reports folder.
#[derive(Debug, Clone)]
pub struct FileReportSink {
    folder: PathBuf,
    files: FileSettings,
}

impl FileReportSink {
    pub fn new(config: &CatalogConfig) -> Self {
        FileReportSink {
            folder: config.paths.reports_folder.clone(),
            files: config.files.clone(),
        }
    }
}

impl ReportSink for FileReportSink {
    fn write_report(&self, id: ProductId, client: &str, contents: &str) -> StoreResult<PathBuf> {
        fs::create_dir_all(&self.folder).map_err(|e| {
            StoreError::Persistence(format!("{}: {}", self.folder.display(), e))
        })?;

        let path = self.folder.join(self.files.report_file_name(id, client));
        fs::write(&path, contents)
            .map_err(|e| StoreError::Persistence(format!("{}: {}", path.display(), e)))?;

        debug!(path = %path.display(), bytes = contents.len(), "Report written");
        Ok(path)
    }
}

// =============================================================================
// Assembler
// =============================================================================

/// Renders reports and discount tables for any supported language tag.
pub struct ReportAssembler<S: ReportSink = FileReportSink> {
    store: Arc<CatalogStore>,
    formatters: Formatters,
    sink: S,
}

impl ReportAssembler<FileReportSink> {
    /// Assembler writing files where `config` says, with `config`'s
    /// default locale.
    pub fn from_config(store: Arc<CatalogStore>, config: &CatalogConfig) -> StoreResult<Self> {
        let formatters = Formatters::with_default(&config.locale.default_tag)?;
        Ok(ReportAssembler::new(store, formatters, FileReportSink::new(config)))
    }
}

impl<S: ReportSink> ReportAssembler<S> {
    pub fn new(store: Arc<CatalogStore>, formatters: Formatters, sink: S) -> Self {
        ReportAssembler {
            store,
            formatters,
            sink,
        }
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Language tags reports can be rendered in.
    pub fn supported_locales(&self) -> Vec<&'static str> {
        self.formatters.supported_tags()
    }

    /// Report text for a product.
    pub fn render_product_report(&self, id: ProductId, tag: &str) -> StoreResult<String> {
        let snapshot = self.store.snapshot(id)?;
        Ok(self.render(&snapshot, tag))
    }

    /// Renders a product's report and writes it for `client`.
    ///
    /// ## Errors
    /// - [`StoreError::NotFound`] for an unknown id; nothing is written
    /// - [`StoreError::Persistence`] if the sink fails
    ///
    /// Both are logged before being returned.
    pub fn print_product_report(&self, id: ProductId, tag: &str, client: &str) -> StoreResult<PathBuf> {
        let result = self
            .render_product_report(id, tag)
            .and_then(|text| self.sink.write_report(id, client, &text));

        match &result {
            Ok(path) => info!(id = %id, client, tag, path = %path.display(), "Report printed"),
            Err(e) => warn!(id = %id, client, tag, error = %e, "Report failed"),
        }
        result
    }

    /// Discount table for `tag`: star label → formatted sum.
    pub fn discounts(&self, tag: &str) -> BTreeMap<String, String> {
        self.store.discounts(self.formatters.get(tag))
    }

    /// Formatted product listing for `tag`.
    pub fn print_products<F, O>(&self, filter: F, order: O, tag: &str) -> String
    where
        F: Fn(&Product) -> bool,
        O: FnMut(&Product, &Product) -> Ordering,
    {
        self.store.print_products(filter, order, self.formatters.get(tag))
    }

    fn render(&self, snapshot: &ProductSnapshot, tag: &str) -> String {
        let formatter = self.formatters.get(tag);

        let mut text = formatter.format_product(&snapshot.product);
        text.push('\n');

        if snapshot.reviews.is_empty() {
            text.push_str(&formatter.text(KEY_NO_REVIEWS));
            text.push('\n');
        } else {
            for review in &snapshot.reviews {
                text.push_str(&formatter.format_review(review));
                text.push('\n');
            }
        }
        text
    }
}

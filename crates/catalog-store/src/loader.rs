//! # Bulk Loader
//!
//! Builds a [`CatalogStore`] from the record files in the data folder.
//!
//! ## Load Flow
//! ```text
//! data_folder/
//!   product101.txt ──┐
//!   product102.txt ──┤   name starts with files.product_prefix, sorted
//!   product103.txt ──┘
//!        │
//!        ▼  first line ──► parse_product ──┐
//!        │                                 │  failure: warn! and skip file
//!        ▼                                 ▼
//!   reviews{id}.txt ──► parse_review per line (bad lines skipped)
//!        │                 missing file = no reviews
//!        ▼
//!   CatalogStore::from_entries  (first file wins on duplicate ids)
//! ```
//!
//! Persisted product ratings are kept as written; they are only
//! recomputed when a new review arrives.

use catalog_core::{Product, ProductId, Review};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::Utf8Error;
use tracing::{debug, info, warn};

use crate::codec::{parse_product, parse_review};
use crate::config::CatalogConfig;
use crate::error::{DecodeError, StoreError, StoreResult};
use crate::store::CatalogStore;

/// Loads every product record (and its reviews) under the data folder.
///
/// ## Errors
/// [`StoreError::DataFolder`] if the folder itself cannot be listed.
/// Individual bad files never fail the load.
pub fn load_catalog(config: &CatalogConfig) -> StoreResult<CatalogStore> {
    let folder = &config.paths.data_folder;
    let files = product_files(folder, &config.files.product_prefix)?;
    info!(folder = %folder.display(), files = files.len(), "Loading catalog");

    let mut entries = Vec::with_capacity(files.len());
    let mut skipped = 0usize;

    for path in files {
        match load_entry(config, &path) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                skipped += 1;
                warn!(file = %path.display(), error = %e, "Skipping product record");
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, loaded = entries.len(), "Some product records were skipped");
    }

    Ok(CatalogStore::from_entries(entries))
}

/// Product record files in `folder`, sorted by file name.
fn product_files(folder: &Path, prefix: &str) -> StoreResult<Vec<PathBuf>> {
    let listing = fs::read_dir(folder)
        .map_err(|e| StoreError::DataFolder(format!("{}: {}", folder.display(), e)))?;

    let mut files: Vec<PathBuf> = listing
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| name.starts_with(prefix))
                .unwrap_or(false)
        })
        .map(|entry| entry.path())
        .collect();

    files.sort();
    Ok(files)
}

fn load_entry(config: &CatalogConfig, path: &Path) -> StoreResult<(Product, Vec<Review>)> {
    let bytes = fs::read(path)
        .map_err(|e| StoreError::DataFolder(format!("{}: {}", path.display(), e)))?;

    // only the first line is a record; later lines are never decoded
    let first_line = record_lines(&bytes)
        .next()
        .unwrap_or(Ok(""))
        .map_err(|_| DecodeError::NotUtf8)?;
    let product = parse_product(first_line)?;
    let reviews = load_reviews(config, product.id());

    debug!(id = %product.id(), reviews = reviews.len(), "Loaded product");
    Ok((product, reviews))
}

/// Reviews of `id`. An unreadable file or line costs only that file or line.
fn load_reviews(config: &CatalogConfig, id: ProductId) -> Vec<Review> {
    let path = config
        .paths
        .data_folder
        .join(config.files.reviews_file_name(id));

    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            warn!(file = %path.display(), error = %e, "Reviews unreadable, loading product without them");
            return Vec::new();
        }
    };

    let mut reviews = Vec::new();
    for (number, line) in record_lines(&bytes).enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(_) => {
                warn!(file = %path.display(), line = number + 1, error = %DecodeError::NotUtf8, "Skipping review");
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_review(line) {
            Ok((review_id, review)) if review_id == id => reviews.push(review),
            Ok((review_id, _)) => {
                warn!(file = %path.display(), line = number + 1, found = %review_id, expected = %id,
                    "Review belongs to another product, skipping");
            }
            Err(e) => {
                warn!(file = %path.display(), line = number + 1, error = %e, "Skipping review");
            }
        }
    }

    reviews
}

/// Splits raw file contents on `\n`, decoding each line on its own.
fn record_lines(bytes: &[u8]) -> impl Iterator<Item = Result<&str, Utf8Error>> {
    bytes.split(|b| *b == b'\n').map(|line| {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        std::str::from_utf8(line)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::Rating;
    use uuid::Uuid;

    struct TempCatalog {
        base: PathBuf,
        config: CatalogConfig,
    }

    impl TempCatalog {
        fn new() -> Self {
            let base = std::env::temp_dir().join(format!("catalog-loader-{}", Uuid::new_v4()));
            let config = CatalogConfig::rooted_at(&base);
            fs::create_dir_all(&config.paths.data_folder).unwrap();
            TempCatalog { base, config }
        }

        fn write(&self, name: &str, contents: impl AsRef<[u8]>) {
            fs::write(self.config.paths.data_folder.join(name), contents).unwrap();
        }
    }

    impl Drop for TempCatalog {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.base);
        }
    }

    #[test]
    fn test_load_skips_malformed_records() {
        let tmp = TempCatalog::new();
        tmp.write("product101.txt", "D,101,Tea,1.99,0\n");
        tmp.write("product102.txt", "D,102,Coffee,1.99,0\n");
        tmp.write("product103.txt", "F,103,Cake,3.99,0,2026-10-20\n");
        tmp.write("product104.txt", "X,104,Mystery,1.00,0\n");
        tmp.write("product105.txt", "D,105,Tea\n");
        tmp.write("product106.txt", "F,106,Cookie,abc,0,2026-10-20\n");
        tmp.write("notes.txt", "D,999,Ignored,1.00,0\n");

        let store = load_catalog(&tmp.config).unwrap();

        assert_eq!(store.len(), 3);
        assert!(store.find(ProductId::new(103)).is_ok());
        assert!(store.find(ProductId::new(104)).is_err());
        assert!(store.find(ProductId::new(999)).is_err());
    }

    #[test]
    fn test_load_reviews() {
        let tmp = TempCatalog::new();
        tmp.write("product101.txt", "D,101,Tea,1.99,3\n");
        tmp.write(
            "reviews101.txt",
            "101,4,Nice hot cup of tea\n101,2,Rather weak, as tea goes\nbroken line\n\n202,5,Wrong file\n",
        );

        let store = load_catalog(&tmp.config).unwrap();
        let reviews = store.reviews_of(ProductId::new(101)).unwrap();

        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[1].comments(), "Rather weak, as tea goes");
        // rating is taken from the record, not recomputed
        assert_eq!(store.find(ProductId::new(101)).unwrap().rating(), Rating::ThreeStar);
    }

    #[test]
    fn test_invalid_utf8_costs_only_that_line() {
        let tmp = TempCatalog::new();
        tmp.write("product101.txt", b"D,101,Tea,1.99,0\n# caf\xe9 notes\n");
        tmp.write("reviews101.txt", b"101,4,Nice\n101,3,caf\xe9 latte\n101,2,Too hot\r\n");

        let store = load_catalog(&tmp.config).unwrap();

        assert_eq!(store.len(), 1);
        let reviews = store.reviews_of(ProductId::new(101)).unwrap();
        let comments: Vec<&str> = reviews.iter().map(Review::comments).collect();
        assert_eq!(comments, ["Nice", "Too hot"]);
    }

    #[test]
    fn test_invalid_utf8_record_line_is_skipped() {
        let tmp = TempCatalog::new();
        tmp.write("product101.txt", b"D,101,T\xffa,1.99,0\n");
        tmp.write("product102.txt", "D,102,Coffee,1.99,0\n");

        let store = load_catalog(&tmp.config).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.find(ProductId::new(102)).is_ok());
    }

    #[test]
    fn test_record_lines() {
        let lines: Vec<_> = record_lines(b"a\r\nb\n\xff\n").collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], Ok("a"));
        assert_eq!(lines[1], Ok("b"));
        assert!(lines[2].is_err());
        assert_eq!(lines[3], Ok(""));
    }

    #[test]
    fn test_missing_reviews_file_means_no_reviews() {
        let tmp = TempCatalog::new();
        tmp.write("product101.txt", "D,101,Tea,1.99,0\n");

        let store = load_catalog(&tmp.config).unwrap();
        assert!(store.reviews_of(ProductId::new(101)).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_ids_first_file_wins() {
        let tmp = TempCatalog::new();
        tmp.write("product_a.txt", "D,101,Tea,1.99,0\n");
        tmp.write("product_b.txt", "D,101,Green Tea,2.49,0\n");

        let store = load_catalog(&tmp.config).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.find(ProductId::new(101)).unwrap().name(), "Tea");
    }

    #[test]
    fn test_missing_data_folder() {
        let tmp = TempCatalog::new();
        let mut config = tmp.config.clone();
        config.paths.data_folder = tmp.base.join("nowhere");

        let result = load_catalog(&config);
        assert!(matches!(result, Err(StoreError::DataFolder(_))));
    }

    #[test]
    fn test_empty_folder_loads_empty_catalog() {
        let tmp = TempCatalog::new();
        let store = load_catalog(&tmp.config).unwrap();
        assert!(store.is_empty());
    }
}

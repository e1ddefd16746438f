//! # Catalog Configuration
//!
//! Where the catalog reads its records from and writes its reports to.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CATALOG_DATA_FOLDER=/srv/catalog/data                              │
//! │     CATALOG_REPORTS_FOLDER=/srv/catalog/reports                        │
//! │     CATALOG_DEFAULT_LOCALE=en-US                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     explicit path, or ~/.config/catalog/catalog.toml (Linux)           │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     ./data, ./reports, en-GB                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # catalog.toml
//! [paths]
//! data_folder = "data"
//! reports_folder = "reports"
//!
//! [files]
//! product_prefix = "product"
//! reviews_file = "reviews{0}.txt"
//! report_file = "product{0}_{1}.txt"
//!
//! [locale]
//! default_tag = "en-GB"
//! ```
//!
//! File name patterns use positional placeholders: `{0}` is the product id,
//! `{1}` the requesting client.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::format::DEFAULT_LANGUAGE_TAG;

// =============================================================================
// Paths
// =============================================================================

/// Folders the catalog reads from and writes to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Folder holding `product*` and `reviews*` record files.
    #[serde(default = "default_data_folder")]
    pub data_folder: PathBuf,

    /// Folder reports are written to. Created on demand.
    #[serde(default = "default_reports_folder")]
    pub reports_folder: PathBuf,
}

fn default_data_folder() -> PathBuf {
    PathBuf::from("data")
}

fn default_reports_folder() -> PathBuf {
    PathBuf::from("reports")
}

impl Default for PathSettings {
    fn default() -> Self {
        PathSettings {
            data_folder: default_data_folder(),
            reports_folder: default_reports_folder(),
        }
    }
}

// =============================================================================
// File Names
// =============================================================================

/// File naming patterns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSettings {
    /// Files in the data folder starting with this prefix are product records.
    #[serde(default = "default_product_prefix")]
    pub product_prefix: String,

    /// Reviews file for a product; `{0}` is the id.
    #[serde(default = "default_reviews_file")]
    pub reviews_file: String,

    /// Report file; `{0}` is the id, `{1}` the client name.
    #[serde(default = "default_report_file")]
    pub report_file: String,
}

fn default_product_prefix() -> String {
    "product".to_string()
}

fn default_reviews_file() -> String {
    "reviews{0}.txt".to_string()
}

fn default_report_file() -> String {
    "product{0}_{1}.txt".to_string()
}

impl Default for FileSettings {
    fn default() -> Self {
        FileSettings {
            product_prefix: default_product_prefix(),
            reviews_file: default_reviews_file(),
            report_file: default_report_file(),
        }
    }
}

impl FileSettings {
    /// Reviews file name for a product id.
    pub fn reviews_file_name(&self, id: impl ToString) -> String {
        fill_pattern(&self.reviews_file, &[&id.to_string()])
    }

    /// Report file name for a product id and client.
    ///
    /// Path separators in `client` become `_`, so the report always lands
    /// directly in the reports folder.
    pub fn report_file_name(&self, id: impl ToString, client: &str) -> String {
        fill_pattern(&self.report_file, &[&id.to_string(), &file_name_safe(client)])
    }
}

fn file_name_safe(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            other => other,
        })
        .collect()
}

// =============================================================================
// Locale
// =============================================================================

/// Locale settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleSettings {
    /// Language tag used when a caller asks for an unsupported one.
    #[serde(default = "default_tag")]
    pub default_tag: String,
}

fn default_tag() -> String {
    DEFAULT_LANGUAGE_TAG.to_string()
}

impl Default for LocaleSettings {
    fn default() -> Self {
        LocaleSettings {
            default_tag: default_tag(),
        }
    }
}

// =============================================================================
// Catalog Config
// =============================================================================

/// Complete catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub paths: PathSettings,

    #[serde(default)]
    pub files: FileSettings,

    #[serde(default)]
    pub locale: LocaleSettings,
}

impl CatalogConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (catalog.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading catalog config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| StoreError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load catalog config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Builds a config rooted at `base`: `base/data` and `base/reports`.
    pub fn rooted_at(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        CatalogConfig {
            paths: PathSettings {
                data_folder: base.join("data"),
                reports_folder: base.join("reports"),
            },
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if self.files.product_prefix.trim().is_empty() {
            return Err(StoreError::InvalidConfig(
                "files.product_prefix must not be empty".into(),
            ));
        }

        if !self.files.reviews_file.contains("{0}") {
            return Err(StoreError::InvalidConfig(format!(
                "files.reviews_file must contain {{0}} for the product id, got: {}",
                self.files.reviews_file
            )));
        }

        // reports are keyed by (id, client)
        if !self.files.report_file.contains("{0}") || !self.files.report_file.contains("{1}") {
            return Err(StoreError::InvalidConfig(format!(
                "files.report_file must contain {{0}} and {{1}}, got: {}",
                self.files.report_file
            )));
        }

        if self.locale.default_tag.trim().is_empty() {
            return Err(StoreError::InvalidConfig(
                "locale.default_tag must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(folder) = std::env::var("CATALOG_DATA_FOLDER") {
            debug!(folder = %folder, "Overriding data folder from environment");
            self.paths.data_folder = PathBuf::from(folder);
        }

        if let Ok(folder) = std::env::var("CATALOG_REPORTS_FOLDER") {
            debug!(folder = %folder, "Overriding reports folder from environment");
            self.paths.reports_folder = PathBuf::from(folder);
        }

        if let Ok(tag) = std::env::var("CATALOG_DEFAULT_LOCALE") {
            self.locale.default_tag = tag;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "catalog", "catalog")
            .map(|dirs| dirs.config_dir().join("catalog.toml"))
    }
}

/// Substitutes `{0}`, `{1}`, ... in `pattern` with `args`.
pub(crate) fn fill_pattern(pattern: &str, args: &[&str]) -> String {
    args.iter()
        .enumerate()
        .fold(pattern.to_string(), |acc, (i, arg)| {
            acc.replace(&format!("{{{}}}", i), arg)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.paths.data_folder, PathBuf::from("data"));
        assert_eq!(config.files.product_prefix, "product");
        assert_eq!(config.locale.default_tag, "en-GB");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_names() {
        let files = FileSettings::default();
        assert_eq!(files.reviews_file_name(101), "reviews101.txt");
        assert_eq!(files.report_file_name(101, "Client 1"), "product101_Client 1.txt");
        assert_eq!(files.report_file_name(101, "a/b"), "product101_a_b.txt");
        assert_eq!(files.report_file_name(101, "..\\up:x"), "product101_.._up_x.txt");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: CatalogConfig = toml::from_str(
            r#"
            [paths]
            data_folder = "/srv/data"
            "#,
        )
        .unwrap();

        assert_eq!(config.paths.data_folder, PathBuf::from("/srv/data"));
        assert_eq!(config.paths.reports_folder, PathBuf::from("reports"));
        assert_eq!(config.files.report_file, "product{0}_{1}.txt");
    }

    #[test]
    fn test_config_validation() {
        let mut config = CatalogConfig::default();
        config.files.report_file = "report{0}.txt".to_string();
        assert!(config.validate().is_err());

        let mut config = CatalogConfig::default();
        config.files.reviews_file = "reviews.txt".to_string();
        assert!(config.validate().is_err());

        let mut config = CatalogConfig::default();
        config.files.product_prefix = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rooted_at() {
        let config = CatalogConfig::rooted_at("/tmp/shop");
        assert_eq!(config.paths.data_folder, PathBuf::from("/tmp/shop/data"));
        assert_eq!(config.paths.reports_folder, PathBuf::from("/tmp/shop/reports"));
    }

    #[test]
    fn test_fill_pattern() {
        assert_eq!(fill_pattern("{1}-{0}-{1}", &["a", "b"]), "b-a-b");
        assert_eq!(fill_pattern("plain", &["a"]), "plain");
    }
}

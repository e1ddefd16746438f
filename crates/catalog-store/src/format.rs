//! # Locale Formatters
//!
//! Turns products, reviews and amounts into locale-specific text.
//!
//! ## Formatter Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  language tag ──► Formatters::get(tag) ──► &dyn ProductFormatter        │
//! │                        │                                                │
//! │                        └─ unknown tag → default tag (en-GB)             │
//! │                                                                         │
//! │  tag     currency      date         "no reviews"                        │
//! │  ─────   ──────────    ──────────   ─────────────                       │
//! │  en-GB   £1,234.50     20/10/2026   Not reviewed                        │
//! │  en-US   $1,234.50     10/20/26     Not reviewed                        │
//! │  es-ES   1.234,50 €    20/10/26     Sin reseñas                         │
//! │  fr-FR   1 234,50 €    20/10/2026   Aucun avis                          │
//! │  ru-RU   1 234,50 ₽    20.10.2026   Нет отзывов                         │
//! │  zh-CN   ¥1,234.50     2026/10/20   暂无评论                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tags are opaque strings: only membership in the table is checked.

use catalog_core::{Money, Product, Review};
use std::collections::HashMap;
use tracing::debug;

use crate::config::fill_pattern;
use crate::error::{StoreError, StoreResult};

/// Tag used when a caller asks for one that is not supported.
pub const DEFAULT_LANGUAGE_TAG: &str = "en-GB";

/// Resource key of the perishable product line.
pub const KEY_PRODUCT: &str = "product";
/// Resource key of the non-perishable product line.
pub const KEY_DRINK: &str = "drink";
/// Resource key of a review line.
pub const KEY_REVIEW: &str = "review";
/// Resource key of the placeholder printed for an unreviewed product.
pub const KEY_NO_REVIEWS: &str = "no.reviews";

// =============================================================================
// Formatter Capability
// =============================================================================

/// What the report and discount code need from a locale.
pub trait ProductFormatter: Send + Sync {
    /// Language tag this formatter renders.
    fn tag(&self) -> &str;

    /// One line describing a product.
    fn format_product(&self, product: &Product) -> String;

    /// One line describing a review.
    fn format_review(&self, review: &Review) -> String;

    /// Localized text for a resource key. Unknown keys come back unchanged.
    fn text(&self, key: &str) -> String;

    /// Amount rendered in the locale's currency.
    fn format_money(&self, amount: Money) -> String;
}

// =============================================================================
// Locale Data
// =============================================================================

/// How a locale writes currency amounts.
#[derive(Debug, Clone, Copy)]
struct CurrencyStyle {
    symbol: &'static str,
    symbol_first: bool,
    /// Between symbol and number ("" or a no-break space).
    spacing: &'static str,
    decimal: &'static str,
    group: &'static str,
}

/// Text resources of one locale.
#[derive(Debug, Clone, Copy)]
struct Resources {
    product: &'static str,
    drink: &'static str,
    review: &'static str,
    no_reviews: &'static str,
}

const ENGLISH: Resources = Resources {
    product: "{0}, Price: {1}, Rating: {2}, Best Before: {3}",
    drink: "{0}, Price: {1}, Rating: {2}",
    review: "Review: {0}\t{1}",
    no_reviews: "Not reviewed",
};

const SPANISH: Resources = Resources {
    product: "{0}, Precio: {1}, Valoración: {2}, Consumir antes de: {3}",
    drink: "{0}, Precio: {1}, Valoración: {2}",
    review: "Reseña: {0}\t{1}",
    no_reviews: "Sin reseñas",
};

const FRENCH: Resources = Resources {
    product: "{0}, Prix : {1}, Note : {2}, À consommer avant : {3}",
    drink: "{0}, Prix : {1}, Note : {2}",
    review: "Avis : {0}\t{1}",
    no_reviews: "Aucun avis",
};

const RUSSIAN: Resources = Resources {
    product: "{0}, Цена: {1}, Рейтинг: {2}, Годен до: {3}",
    drink: "{0}, Цена: {1}, Рейтинг: {2}",
    review: "Отзыв: {0}\t{1}",
    no_reviews: "Нет отзывов",
};

const CHINESE: Resources = Resources {
    product: "{0}，价格：{1}，评分：{2}，保质期至：{3}",
    drink: "{0}，价格：{1}，评分：{2}",
    review: "评论：{0}\t{1}",
    no_reviews: "暂无评论",
};

// =============================================================================
// Resource Formatter
// =============================================================================

/// Built-in formatter for one locale.
#[derive(Debug, Clone)]
pub struct ResourceFormatter {
    tag: &'static str,
    currency: CurrencyStyle,
    date_pattern: &'static str,
    resources: Resources,
}

impl ResourceFormatter {
    fn new(
        tag: &'static str,
        currency: CurrencyStyle,
        date_pattern: &'static str,
        resources: Resources,
    ) -> Self {
        ResourceFormatter {
            tag,
            currency,
            date_pattern,
            resources,
        }
    }

    /// Every built-in locale.
    fn builtin() -> Vec<ResourceFormatter> {
        vec![
            ResourceFormatter::new(
                "en-GB",
                CurrencyStyle {
                    symbol: "£",
                    symbol_first: true,
                    spacing: "",
                    decimal: ".",
                    group: ",",
                },
                "%d/%m/%Y",
                ENGLISH,
            ),
            ResourceFormatter::new(
                "en-US",
                CurrencyStyle {
                    symbol: "$",
                    symbol_first: true,
                    spacing: "",
                    decimal: ".",
                    group: ",",
                },
                "%-m/%-d/%y",
                ENGLISH,
            ),
            ResourceFormatter::new(
                "es-ES",
                CurrencyStyle {
                    symbol: "€",
                    symbol_first: false,
                    spacing: "\u{a0}",
                    decimal: ",",
                    group: ".",
                },
                "%-d/%-m/%y",
                SPANISH,
            ),
            ResourceFormatter::new(
                "fr-FR",
                CurrencyStyle {
                    symbol: "€",
                    symbol_first: false,
                    spacing: "\u{a0}",
                    decimal: ",",
                    group: "\u{202f}",
                },
                "%d/%m/%Y",
                FRENCH,
            ),
            ResourceFormatter::new(
                "ru-RU",
                CurrencyStyle {
                    symbol: "₽",
                    symbol_first: false,
                    spacing: "\u{a0}",
                    decimal: ",",
                    group: "\u{a0}",
                },
                "%d.%m.%Y",
                RUSSIAN,
            ),
            ResourceFormatter::new(
                "zh-CN",
                CurrencyStyle {
                    symbol: "¥",
                    symbol_first: true,
                    spacing: "",
                    decimal: ".",
                    group: ",",
                },
                "%Y/%-m/%-d",
                CHINESE,
            ),
        ]
    }
}

impl ProductFormatter for ResourceFormatter {
    fn tag(&self) -> &str {
        self.tag
    }

    fn format_product(&self, product: &Product) -> String {
        let price = self.format_money(product.price());
        let stars = product.rating().stars();

        match product.best_before() {
            Some(date) => {
                let date = date.format(self.date_pattern).to_string();
                fill_pattern(
                    self.resources.product,
                    &[product.name(), price.as_str(), stars, date.as_str()],
                )
            }
            None => fill_pattern(self.resources.drink, &[product.name(), price.as_str(), stars]),
        }
    }

    fn format_review(&self, review: &Review) -> String {
        fill_pattern(
            self.resources.review,
            &[review.rating().stars(), review.comments()],
        )
    }

    fn text(&self, key: &str) -> String {
        let text = match key {
            KEY_PRODUCT => self.resources.product,
            KEY_DRINK => self.resources.drink,
            KEY_REVIEW => self.resources.review,
            KEY_NO_REVIEWS => self.resources.no_reviews,
            other => {
                debug!(tag = self.tag, key = other, "Missing text resource");
                other
            }
        };
        text.to_string()
    }

    fn format_money(&self, amount: Money) -> String {
        let style = &self.currency;
        let cents = amount.cents().unsigned_abs();
        let number = format!(
            "{}{}{:02}",
            group_digits(cents / 100, style.group),
            style.decimal,
            cents % 100
        );
        let sign = if amount.is_negative() { "-" } else { "" };

        if style.symbol_first {
            format!("{}{}{}{}", sign, style.symbol, style.spacing, number)
        } else {
            format!("{}{}{}{}", sign, number, style.spacing, style.symbol)
        }
    }
}

/// Inserts `separator` between every group of three digits.
fn group_digits(value: u64, separator: &str) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

// =============================================================================
// Formatter Table
// =============================================================================

/// Formatters keyed by language tag, with a required default entry.
#[derive(Debug, Clone)]
pub struct Formatters {
    table: HashMap<&'static str, ResourceFormatter>,
    default_tag: &'static str,
}

impl Formatters {
    /// All built-in locales, falling back to [`DEFAULT_LANGUAGE_TAG`].
    pub fn new() -> Self {
        let table = ResourceFormatter::builtin()
            .into_iter()
            .map(|f| (f.tag, f))
            .collect();

        Formatters {
            table,
            default_tag: DEFAULT_LANGUAGE_TAG,
        }
    }

    /// Built-in locales with a different fallback tag.
    ///
    /// The fallback must itself be supported.
    pub fn with_default(tag: &str) -> StoreResult<Self> {
        let mut formatters = Self::new();
        let (&key, _) = formatters.table.get_key_value(tag).ok_or_else(|| {
            StoreError::InvalidConfig(format!(
                "default locale '{}' is not supported; valid options: {}",
                tag,
                formatters.supported_tags().join(", ")
            ))
        })?;
        formatters.default_tag = key;
        Ok(formatters)
    }

    /// Formatter for `tag`, or the default formatter if `tag` is unknown.
    pub fn get(&self, tag: &str) -> &dyn ProductFormatter {
        match self.table.get(tag) {
            Some(formatter) => formatter,
            None => {
                debug!(tag, fallback = self.default_tag, "Unsupported language tag");
                &self.table[self.default_tag]
            }
        }
    }

    /// Supported tags, sorted.
    pub fn supported_tags(&self) -> Vec<&'static str> {
        let mut tags: Vec<&'static str> = self.table.keys().copied().collect();
        tags.sort_unstable();
        tags
    }
}

impl Default for Formatters {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{ProductId, Rating};
    use chrono::NaiveDate;

    fn cake() -> Product {
        Product::food(
            ProductId::new(103),
            "Cake",
            Money::from_cents(123450),
            Rating::ThreeStar,
            NaiveDate::from_ymd_opt(2026, 10, 2).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_supported_tags() {
        let formatters = Formatters::new();
        assert_eq!(
            formatters.supported_tags(),
            ["en-GB", "en-US", "es-ES", "fr-FR", "ru-RU", "zh-CN"]
        );
        assert_eq!(formatters.get("fr-FR").tag(), "fr-FR");
        assert_eq!(formatters.get("fr").tag(), "en-GB");
    }

    #[test]
    fn test_unknown_tag_falls_back_to_default() {
        let formatters = Formatters::new();
        assert_eq!(formatters.get("xx-XX").tag(), "en-GB");
        assert_eq!(formatters.get("en-US").tag(), "en-US");
    }

    #[test]
    fn test_with_default() {
        let formatters = Formatters::with_default("en-US").unwrap();
        assert_eq!(formatters.get("nope").tag(), "en-US");

        assert!(Formatters::with_default("tlh").is_err());
    }

    #[test]
    fn test_money_formats() {
        let formatters = Formatters::new();
        let amount = Money::from_cents(123450);

        assert_eq!(formatters.get("en-GB").format_money(amount), "£1,234.50");
        assert_eq!(formatters.get("en-US").format_money(amount), "$1,234.50");
        assert_eq!(formatters.get("es-ES").format_money(amount), "1.234,50\u{a0}€");
        assert_eq!(
            formatters.get("fr-FR").format_money(amount),
            "1\u{202f}234,50\u{a0}€"
        );
        assert_eq!(formatters.get("ru-RU").format_money(amount), "1\u{a0}234,50\u{a0}₽");
        assert_eq!(formatters.get("zh-CN").format_money(amount), "¥1,234.50");
    }

    #[test]
    fn test_money_small_and_negative() {
        let en = Formatters::new();
        let en = en.get("en-US");
        assert_eq!(en.format_money(Money::zero()), "$0.00");
        assert_eq!(en.format_money(Money::from_cents(7)), "$0.07");
        assert_eq!(en.format_money(Money::from_cents(-600)), "-$6.00");
        assert_eq!(en.format_money(Money::from_cents(100_000_000)), "$1,000,000.00");
    }

    #[test]
    fn test_format_food() {
        let formatters = Formatters::new();
        assert_eq!(
            formatters.get("en-GB").format_product(&cake()),
            "Cake, Price: £1,234.50, Rating: ★★★☆☆, Best Before: 02/10/2026"
        );
        assert_eq!(
            formatters.get("en-US").format_product(&cake()),
            "Cake, Price: $1,234.50, Rating: ★★★☆☆, Best Before: 10/2/26"
        );
    }

    #[test]
    fn test_format_drink_has_no_date() {
        let tea = Product::drink(ProductId::new(101), "Tea", Money::from_cents(199), Rating::NotRated)
            .unwrap();
        assert_eq!(
            Formatters::new().get("en-GB").format_product(&tea),
            "Tea, Price: £1.99, Rating: ☆☆☆☆☆"
        );
    }

    #[test]
    fn test_format_review_and_text() {
        let formatters = Formatters::new();
        let review = Review::new(Rating::FourStar, "Nice");
        assert_eq!(formatters.get("en-GB").format_review(&review), "Review: ★★★★☆\tNice");
        assert_eq!(formatters.get("fr-FR").text(KEY_NO_REVIEWS), "Aucun avis");
        assert_eq!(formatters.get("en-GB").text("unknown.key"), "unknown.key");
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(0, ","), "0");
        assert_eq!(group_digits(999, ","), "999");
        assert_eq!(group_digits(1000, ","), "1,000");
        assert_eq!(group_digits(1234567, "."), "1.234.567");
    }
}

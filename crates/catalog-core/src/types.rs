//! # Domain Types
//!
//! Products and reviews held by the catalog.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  ProductKind    │   │     Review      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u32)       │   │  Food           │   │  rating         │       │
//! │  │  name           │   │   best_before   │   │  comments       │       │
//! │  │  price (Money)  │   │  Drink          │   │                 │       │
//! │  │  rating         │   │                 │   │                 │       │
//! │  │  kind           │   │                 │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! A product's identity is its id alone: two values with the same id are the
//! same product, whatever their rating. Products are never mutated in place;
//! a new review produces a new value through [`Product::apply_rating`].

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::ValidationResult;
use crate::money::Money;
use crate::rating::Rating;
use crate::validation::{validate_price, validate_product_name};
use crate::DISCOUNT_RATE_BPS;

// =============================================================================
// Product Id
// =============================================================================

/// Catalog-unique product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(u32);

impl ProductId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

// =============================================================================
// Product Kind
// =============================================================================

/// Variant-specific product data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKind {
    /// Perishable; carries the date it must be sold by.
    Food { best_before: NaiveDate },
    /// Non-perishable.
    Drink,
}

impl ProductKind {
    /// Single-letter tag used in record files (`F` / `D`).
    pub const fn code(&self) -> char {
        match self {
            ProductKind::Food { .. } => 'F',
            ProductKind::Drink => 'D',
        }
    }

    /// Highest rating that still qualifies for the base discount.
    ///
    /// Perishables stay discounted longer than drinks.
    const fn discount_ceiling(&self) -> Rating {
        match self {
            ProductKind::Food { .. } => Rating::FourStar,
            ProductKind::Drink => Rating::ThreeStar,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A purchasable catalog entry.
///
/// Fields are private: a `Product` can only be built through [`Product::food`]
/// or [`Product::drink`], which validate the name and price.
#[derive(Debug, Clone)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
    rating: Rating,
    kind: ProductKind,
}

impl Product {
    /// Builds a perishable product.
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::{Money, Product, ProductId, Rating};
    /// use chrono::NaiveDate;
    ///
    /// let cake = Product::food(
    ///     ProductId::new(103),
    ///     "Cake",
    ///     Money::from_cents(399),
    ///     Rating::NotRated,
    ///     NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
    /// )
    /// .unwrap();
    /// assert_eq!(cake.discount().cents(), 40);
    /// ```
    pub fn food(
        id: ProductId,
        name: impl Into<String>,
        price: Money,
        rating: Rating,
        best_before: NaiveDate,
    ) -> ValidationResult<Self> {
        Self::new(id, name.into(), price, rating, ProductKind::Food { best_before })
    }

    /// Builds a non-perishable product.
    pub fn drink(
        id: ProductId,
        name: impl Into<String>,
        price: Money,
        rating: Rating,
    ) -> ValidationResult<Self> {
        Self::new(id, name.into(), price, rating, ProductKind::Drink)
    }

    fn new(
        id: ProductId,
        name: String,
        price: Money,
        rating: Rating,
        kind: ProductKind,
    ) -> ValidationResult<Self> {
        validate_product_name(&name)?;
        validate_price(price)?;

        Ok(Product {
            id,
            name: name.trim().to_string(),
            price,
            rating,
            kind,
        })
    }

    #[inline]
    pub fn id(&self) -> ProductId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    #[inline]
    pub fn rating(&self) -> Rating {
        self.rating
    }

    #[inline]
    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    /// Best-before date, if the product is perishable.
    pub fn best_before(&self) -> Option<NaiveDate> {
        match self.kind {
            ProductKind::Food { best_before } => Some(best_before),
            ProductKind::Drink => None,
        }
    }

    /// Discount offered on this product.
    ///
    /// 10% of the price while the rating is at or below the variant's
    /// ceiling, nothing above it. A better rating never raises the discount.
    pub fn discount(&self) -> Money {
        if self.rating <= self.kind.discount_ceiling() {
            self.price.percentage(DISCOUNT_RATE_BPS)
        } else {
            Money::zero()
        }
    }

    /// Returns a copy of this product carrying `rating`.
    #[must_use]
    pub fn apply_rating(&self, rating: Rating) -> Product {
        Product {
            rating,
            ..self.clone()
        }
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// =============================================================================
// Review
// =============================================================================

/// A customer review attached to one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    rating: Rating,
    comments: String,
}

impl Review {
    pub fn new(rating: Rating, comments: impl Into<String>) -> Self {
        Review {
            rating,
            comments: comments.into(),
        }
    }

    #[inline]
    pub fn rating(&self) -> Rating {
        self.rating
    }

    #[inline]
    pub fn comments(&self) -> &str {
        &self.comments
    }

    /// Display order: best rating first.
    pub fn display_order(a: &Review, b: &Review) -> Ordering {
        b.rating.cmp(&a.rating)
    }
}

/// Sorts reviews for display. The sort is stable, so reviews with the same
/// rating keep their insertion order.
pub fn sort_for_display(reviews: &mut [Review]) {
    reviews.sort_by(Review::display_order);
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
    }

    fn tea(rating: Rating) -> Product {
        Product::drink(ProductId::new(101), "Tea", Money::from_cents(199), rating).unwrap()
    }

    #[test]
    fn test_construction_validates() {
        assert!(Product::drink(ProductId::new(1), "", Money::zero(), Rating::NotRated).is_err());
        assert!(
            Product::drink(ProductId::new(1), "Tea", Money::from_cents(-1), Rating::NotRated)
                .is_err()
        );
    }

    #[test]
    fn test_name_is_trimmed() {
        let p = Product::drink(ProductId::new(1), "  Tea ", Money::zero(), Rating::NotRated)
            .unwrap();
        assert_eq!(p.name(), "Tea");
    }

    #[test]
    fn test_best_before() {
        let cake = Product::food(
            ProductId::new(2),
            "Cake",
            Money::from_cents(399),
            Rating::NotRated,
            date(),
        )
        .unwrap();
        assert_eq!(cake.best_before(), Some(date()));
        assert_eq!(cake.kind().code(), 'F');
        assert_eq!(tea(Rating::NotRated).best_before(), None);
        assert_eq!(tea(Rating::NotRated).kind().code(), 'D');
    }

    #[test]
    fn test_drink_discount_by_rating() {
        assert_eq!(tea(Rating::NotRated).discount().cents(), 20);
        assert_eq!(tea(Rating::ThreeStar).discount().cents(), 20);
        assert!(tea(Rating::FourStar).discount().is_zero());
        assert!(tea(Rating::FiveStar).discount().is_zero());
    }

    #[test]
    fn test_food_discount_by_rating() {
        let cake = |rating| {
            Product::food(ProductId::new(2), "Cake", Money::from_cents(1000), rating, date())
                .unwrap()
        };
        assert_eq!(cake(Rating::FourStar).discount().cents(), 100);
        assert!(cake(Rating::FiveStar).discount().is_zero());
    }

    #[test]
    fn test_apply_rating_keeps_identity() {
        let before = tea(Rating::NotRated);
        let after = before.apply_rating(Rating::FourStar);

        assert_eq!(before.rating(), Rating::NotRated);
        assert_eq!(after.rating(), Rating::FourStar);
        assert_eq!(after.name(), before.name());
        assert_eq!(after.price(), before.price());
        assert_eq!(after, before);
    }

    #[test]
    fn test_review_sort_is_stable() {
        let mut reviews = vec![
            Review::new(Rating::ThreeStar, "first three"),
            Review::new(Rating::FiveStar, "five"),
            Review::new(Rating::ThreeStar, "second three"),
            Review::new(Rating::OneStar, "one"),
        ];
        sort_for_display(&mut reviews);

        let comments: Vec<&str> = reviews.iter().map(Review::comments).collect();
        assert_eq!(comments, ["five", "first three", "second three", "one"]);
    }
}

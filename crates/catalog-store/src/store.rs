//! # Catalog Store
//!
//! Thread-safe ownership of the product → reviews mapping.
//!
//! ## Lock Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 RwLock<HashMap<ProductId, Entry>>                       │
//! │                                                                         │
//! │  EXCLUSIVE (write)                  SHARED (read)                       │
//! │  ─────────────────                  ─────────────                       │
//! │  create_food / create_drink         find                                │
//! │  insert                             list / print_products               │
//! │  review                             reviews_of / snapshot               │
//! │                                     discount_totals / discounts         │
//! │                                                                         │
//! │  One writer at a time; any number of readers; never both.               │
//! │  Everything returned is a copy taken before the guard drops, so        │
//! │  callers read it (and do I/O with it) without holding the lock.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Review Flow
//! ```text
//! review(id, rating, comments)           ── write lock held throughout ──
//!      │
//!      ├─ entry missing? ──► NotFound, map untouched
//!      ▼
//! push Review ──► average of ALL review ordinals (round half-up, clamp)
//!      │
//!      ▼
//! entry.product = product.apply_rating(avg)   (same id, same review list)
//!      │
//!      ▼
//! return copy of the new Product
//! ```
//!
//! Entries are keyed by id, so a rating change replaces the stored product
//! value in place; readers see either the old (product, reviews) pair or
//! the new one.

use catalog_core::types::sort_for_display;
use catalog_core::{Money, Product, ProductId, Rating, Review};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::format::ProductFormatter;

/// One product and everything said about it.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub(crate) product: Product,
    pub(crate) reviews: Vec<Review>,
}

/// A product together with its reviews, copied under one read lock.
///
/// Reviews are in display order: best rating first, ties in the order
/// they were written.
#[derive(Debug, Clone)]
pub struct ProductSnapshot {
    pub product: Product,
    pub reviews: Vec<Review>,
}

/// The shared, lock-protected catalog.
///
/// ## Usage
/// ```rust
/// use catalog_core::{Money, ProductId, Rating};
/// use catalog_store::CatalogStore;
///
/// let store = CatalogStore::new();
/// let id = ProductId::new(101);
/// store.create_drink(id, "Tea", Money::from_cents(199), Rating::NotRated).unwrap();
///
/// store.review(id, Rating::TwoStar, "Too weak").unwrap();
/// let tea = store.review(id, Rating::FourStar, "Better today").unwrap();
/// assert_eq!(tea.rating(), Rating::ThreeStar);
/// ```
#[derive(Debug, Default)]
pub struct CatalogStore {
    entries: RwLock<HashMap<ProductId, Entry>>,
}

impl CatalogStore {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from already-decoded products and their reviews.
    ///
    /// If an id appears more than once the first occurrence wins.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Product, Vec<Review>)>,
    {
        let mut map: HashMap<ProductId, Entry> = HashMap::new();

        for (product, reviews) in entries {
            let id = product.id();
            if map.contains_key(&id) {
                warn!(id = %id, "Duplicate product id, keeping the first one");
                continue;
            }
            map.insert(id, Entry { product, reviews });
        }

        info!(count = map.len(), "Catalog built");
        CatalogStore {
            entries: RwLock::new(map),
        }
    }

    // Poisoning is ignored: no write leaves the map half-updated.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<ProductId, Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ProductId, Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Writes (exclusive)
    // =========================================================================

    /// Creates a perishable product unless the id is already taken.
    ///
    /// Returns the product stored under `id` afterwards, which on a
    /// duplicate is the earlier one. Invalid arguments insert nothing.
    pub fn create_food(
        &self,
        id: ProductId,
        name: &str,
        price: Money,
        rating: Rating,
        best_before: NaiveDate,
    ) -> StoreResult<Product> {
        let product = Product::food(id, name, price, rating, best_before)?;
        Ok(self.insert(product))
    }

    /// Creates a non-perishable product unless the id is already taken.
    pub fn create_drink(
        &self,
        id: ProductId,
        name: &str,
        price: Money,
        rating: Rating,
    ) -> StoreResult<Product> {
        let product = Product::drink(id, name, price, rating)?;
        Ok(self.insert(product))
    }

    /// Insert-if-absent with an empty review list.
    ///
    /// Returns the product stored under that id after the call.
    pub fn insert(&self, product: Product) -> Product {
        let mut entries = self.write();
        let id = product.id();

        let entry = entries.entry(id).or_insert_with(|| {
            debug!(id = %id, name = product.name(), "Product created");
            Entry {
                product,
                reviews: Vec::new(),
            }
        });

        entry.product.clone()
    }

    /// Adds a review and recomputes the product's rating.
    ///
    /// The new rating is the mean of every review's ordinal for this
    /// product, rounded half-up onto the scale.
    ///
    /// ## Errors
    /// [`StoreError::NotFound`] if no product has `id`; nothing changes.
    pub fn review(
        &self,
        id: ProductId,
        rating: Rating,
        comments: impl Into<String>,
    ) -> StoreResult<Product> {
        let mut entries = self.write();
        let entry = entries.get_mut(&id).ok_or_else(|| StoreError::not_found(id))?;

        entry.reviews.push(Review::new(rating, comments));
        let average = Rating::average_of(entry.reviews.iter().map(Review::rating));
        entry.product = entry.product.apply_rating(average);

        debug!(
            id = %id,
            reviews = entry.reviews.len(),
            rating = average.ordinal(),
            "Product reviewed"
        );
        Ok(entry.product.clone())
    }

    // =========================================================================
    // Reads (shared)
    // =========================================================================

    /// Looks a product up by id.
    pub fn find(&self, id: ProductId) -> StoreResult<Product> {
        self.read()
            .get(&id)
            .map(|entry| entry.product.clone())
            .ok_or_else(|| StoreError::not_found(id))
    }

    /// Products matching `filter`, sorted by `order`.
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::{Money, ProductId, Rating};
    /// use catalog_store::CatalogStore;
    ///
    /// let store = CatalogStore::new();
    /// store.create_drink(ProductId::new(1), "Tea", Money::from_cents(199), Rating::NotRated).unwrap();
    /// store.create_drink(ProductId::new(2), "Coffee", Money::from_cents(299), Rating::NotRated).unwrap();
    ///
    /// let cheap = store.list(|p| p.price() < Money::from_cents(250), |a, b| a.name().cmp(b.name()));
    /// assert_eq!(cheap.len(), 1);
    /// ```
    pub fn list<F, S>(&self, filter: F, order: S) -> Vec<Product>
    where
        F: Fn(&Product) -> bool,
        S: FnMut(&Product, &Product) -> Ordering,
    {
        let mut products: Vec<Product> = self
            .read()
            .values()
            .map(|entry| &entry.product)
            .filter(|product| filter(product))
            .cloned()
            .collect();

        products.sort_by(order);
        products
    }

    /// Reviews of a product, in display order.
    pub fn reviews_of(&self, id: ProductId) -> StoreResult<Vec<Review>> {
        self.snapshot(id).map(|snapshot| snapshot.reviews)
    }

    /// A product and its reviews, read under one lock.
    ///
    /// The stored list keeps insertion order; only the copy is sorted.
    pub fn snapshot(&self, id: ProductId) -> StoreResult<ProductSnapshot> {
        let (product, mut reviews) = {
            let entries = self.read();
            let entry = entries.get(&id).ok_or_else(|| StoreError::not_found(id))?;
            (entry.product.clone(), entry.reviews.clone())
        };

        sort_for_display(&mut reviews);
        Ok(ProductSnapshot { product, reviews })
    }

    /// Formatted listing, one line per matching product.
    pub fn print_products<F, S>(&self, filter: F, order: S, formatter: &dyn ProductFormatter) -> String
    where
        F: Fn(&Product) -> bool,
        S: FnMut(&Product, &Product) -> Ordering,
    {
        self.list(filter, order)
            .iter()
            .map(|product| formatter.format_product(product) + "\n")
            .collect()
    }

    /// Runs `f` over every stored product while holding the read lock.
    pub(crate) fn with_products<R>(&self, f: impl FnOnce(&mut dyn Iterator<Item = &Product>) -> R) -> R {
        let entries = self.read();
        let mut products = entries.values().map(|entry| &entry.product);
        f(&mut products)
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

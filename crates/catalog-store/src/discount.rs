//! Discount aggregation: every product grouped by rating, discounts summed
//! per group.
//!
//! ```text
//! ☆☆☆☆☆  Tea 0.20 + Coffee 0.20 + Cake 0.40  ──►  "£0.80"
//! ★★★★☆  Juice (drink, no discount)         ──►  "£0.00"
//! ```
//!
//! Only ratings some product currently holds appear in the result. Sums are
//! exact [`Money`]; formatting happens once per group.

use catalog_core::{Money, Rating};
use std::collections::BTreeMap;

use crate::format::ProductFormatter;
use crate::store::CatalogStore;

impl CatalogStore {
    /// Discount sums per rating, read in one pass under the shared lock.
    pub fn discount_totals(&self) -> BTreeMap<Rating, Money> {
        self.with_products(|products| {
            let mut totals: BTreeMap<Rating, Money> = BTreeMap::new();
            for product in products {
                *totals.entry(product.rating()).or_default() += product.discount();
            }
            totals
        })
    }

    /// Discount sums keyed by star label and formatted as currency.
    pub fn discounts(&self, formatter: &dyn ProductFormatter) -> BTreeMap<String, String> {
        self.discount_totals()
            .into_iter()
            .map(|(rating, total)| (rating.stars().to_string(), formatter.format_money(total)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Formatters;
    use catalog_core::ProductId;
    use chrono::NaiveDate;

    fn drink(store: &CatalogStore, id: u32, cents: i64, rating: Rating) {
        store
            .create_drink(ProductId::new(id), "Drink", Money::from_cents(cents), rating)
            .unwrap();
    }

    #[test]
    fn test_not_rated_drinks_sum() {
        let store = CatalogStore::new();
        drink(&store, 1, 1000, Rating::NotRated);
        drink(&store, 2, 2000, Rating::NotRated);
        drink(&store, 3, 3000, Rating::NotRated);
        drink(&store, 4, 5000, Rating::FiveStar);

        let totals = store.discount_totals();
        assert_eq!(totals.get(&Rating::NotRated), Some(&Money::from_cents(600)));
        assert_eq!(totals.get(&Rating::FiveStar), Some(&Money::zero()));
        assert_eq!(totals.len(), 2);

        let formatters = Formatters::new();
        let discounts = store.discounts(formatters.get("en-GB"));
        assert_eq!(discounts.get("☆☆☆☆☆").map(String::as_str), Some("£6.00"));
        assert!(!discounts.contains_key("★☆☆☆☆"));
    }

    #[test]
    fn test_food_and_drink_ceilings() {
        let store = CatalogStore::new();
        let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        drink(&store, 1, 1000, Rating::FourStar);
        store
            .create_food(ProductId::new(2), "Cake", Money::from_cents(1000), Rating::FourStar, date)
            .unwrap();

        let totals = store.discount_totals();
        assert_eq!(totals.get(&Rating::FourStar), Some(&Money::from_cents(100)));
    }

    #[test]
    fn test_totals_follow_reviews() {
        let store = CatalogStore::new();
        drink(&store, 1, 1000, Rating::NotRated);
        store
            .review(ProductId::new(1), Rating::FiveStar, "great")
            .unwrap();

        let totals = store.discount_totals();
        assert!(!totals.contains_key(&Rating::NotRated));
        assert_eq!(totals.get(&Rating::FiveStar), Some(&Money::zero()));
    }

    #[test]
    fn test_empty_store() {
        let store = CatalogStore::new();
        assert!(store.discount_totals().is_empty());
    }
}

//! # Rating Scale
//!
//! Star ratings shared by products and reviews.
//!
//! ## Scale
//! ```text
//! ┌──────────────┬─────────┬──────────────┐
//! │ Level        │ Ordinal │ Stars        │
//! ├──────────────┼─────────┼──────────────┤
//! │ NotRated     │    0    │ ☆☆☆☆☆        │
//! │ OneStar      │    1    │ ★☆☆☆☆        │
//! │ TwoStar      │    2    │ ★★☆☆☆        │
//! │ ThreeStar    │    3    │ ★★★☆☆        │
//! │ FourStar     │    4    │ ★★★★☆        │
//! │ FiveStar     │    5    │ ★★★★★        │
//! └──────────────┴─────────┴──────────────┘
//! ```
//!
//! A product's rating is the review average rounded half-up and then clamped
//! back onto the scale, so recomputing it can never fail.

use std::fmt;

/// A discrete star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Rating {
    #[default]
    NotRated,
    OneStar,
    TwoStar,
    ThreeStar,
    FourStar,
    FiveStar,
}

impl Rating {
    /// Every level, lowest first.
    pub const ALL: [Rating; 6] = [
        Rating::NotRated,
        Rating::OneStar,
        Rating::TwoStar,
        Rating::ThreeStar,
        Rating::FourStar,
        Rating::FiveStar,
    ];

    /// Highest valid ordinal.
    pub const MAX_ORDINAL: u8 = 5;

    /// Position of this level on the scale (0..=5).
    #[inline]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Maps an integer onto the scale, clamping out-of-range values to the
    /// nearest bound.
    ///
    /// ```rust
    /// use catalog_core::Rating;
    ///
    /// assert_eq!(Rating::from_ordinal(3), Rating::ThreeStar);
    /// assert_eq!(Rating::from_ordinal(-2), Rating::NotRated);
    /// assert_eq!(Rating::from_ordinal(9), Rating::FiveStar);
    /// ```
    pub fn from_ordinal(n: i64) -> Rating {
        let clamped = n.clamp(0, Self::MAX_ORDINAL as i64) as usize;
        Self::ALL[clamped]
    }

    /// Display string, e.g. `★★★☆☆`.
    pub const fn stars(self) -> &'static str {
        match self {
            Rating::NotRated => "\u{2606}\u{2606}\u{2606}\u{2606}\u{2606}",
            Rating::OneStar => "\u{2605}\u{2606}\u{2606}\u{2606}\u{2606}",
            Rating::TwoStar => "\u{2605}\u{2605}\u{2606}\u{2606}\u{2606}",
            Rating::ThreeStar => "\u{2605}\u{2605}\u{2605}\u{2606}\u{2606}",
            Rating::FourStar => "\u{2605}\u{2605}\u{2605}\u{2605}\u{2606}",
            Rating::FiveStar => "\u{2605}\u{2605}\u{2605}\u{2605}\u{2605}",
        }
    }

    /// Average of the given ratings' ordinals, rounded half-up, as a scale
    /// value. An empty input averages to `NotRated`.
    ///
    /// Integer arithmetic only: `round(sum / n) == (2 * sum + n) / (2 * n)`
    /// for non-negative sums.
    ///
    /// ```rust
    /// use catalog_core::Rating;
    ///
    /// let avg = Rating::average_of([Rating::TwoStar, Rating::FourStar, Rating::FiveStar]);
    /// assert_eq!(avg, Rating::FourStar); // 11 / 3 = 3.67 → 4
    /// ```
    pub fn average_of<I>(ratings: I) -> Rating
    where
        I: IntoIterator<Item = Rating>,
    {
        let (sum, count) = ratings
            .into_iter()
            .fold((0i64, 0i64), |(sum, count), r| {
                (sum + r.ordinal() as i64, count + 1)
            });

        if count == 0 {
            return Rating::NotRated;
        }

        Rating::from_ordinal((2 * sum + count) / (2 * count))
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stars())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(ordinals: &[i64]) -> Vec<Rating> {
        ordinals.iter().copied().map(Rating::from_ordinal).collect()
    }

    #[test]
    fn test_ordinal_round_trip() {
        for rating in Rating::ALL {
            assert_eq!(Rating::from_ordinal(rating.ordinal() as i64), rating);
        }
    }

    #[test]
    fn test_from_ordinal_clamps() {
        assert_eq!(Rating::from_ordinal(-1), Rating::NotRated);
        assert_eq!(Rating::from_ordinal(6), Rating::FiveStar);
        assert_eq!(Rating::from_ordinal(i64::MAX), Rating::FiveStar);
        assert_eq!(Rating::from_ordinal(i64::MIN), Rating::NotRated);
    }

    #[test]
    fn test_stars() {
        assert_eq!(Rating::NotRated.stars(), "☆☆☆☆☆");
        assert_eq!(Rating::ThreeStar.stars(), "★★★☆☆");
        assert_eq!(Rating::FiveStar.to_string(), "★★★★★");
    }

    #[test]
    fn test_average_exact() {
        assert_eq!(Rating::average_of(ratings(&[2, 4])), Rating::ThreeStar);
    }

    #[test]
    fn test_average_rounds_up_above_half() {
        // (2 + 4 + 5) / 3 = 3.67
        assert_eq!(Rating::average_of(ratings(&[2, 4, 5])), Rating::FourStar);
        // (1 + 1 + 2) / 3 = 1.33
        assert_eq!(Rating::average_of(ratings(&[1, 1, 2])), Rating::OneStar);
    }

    #[test]
    fn test_average_half_rounds_up() {
        // 1.5 → 2, 2.5 → 3, 4.5 → 5 (not to even)
        assert_eq!(Rating::average_of(ratings(&[1, 2])), Rating::TwoStar);
        assert_eq!(Rating::average_of(ratings(&[2, 3])), Rating::ThreeStar);
        assert_eq!(Rating::average_of(ratings(&[4, 5])), Rating::FiveStar);
    }

    #[test]
    fn test_average_empty_is_not_rated() {
        assert_eq!(Rating::average_of(Vec::new()), Rating::NotRated);
    }

    #[test]
    fn test_ordering_follows_ordinals() {
        assert!(Rating::NotRated < Rating::OneStar);
        assert!(Rating::FourStar < Rating::FiveStar);
    }
}

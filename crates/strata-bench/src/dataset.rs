//! Sorted unique dataset generation.

use log::warn;
use rand::Rng;
use std::collections::BTreeSet;

use strata_common::{Result, StrataError};

/// Draws `count` unique integers uniformly from `[min, max]` and returns
/// them sorted ascending.
///
/// When the range holds fewer than `count` values the result is clamped to
/// the whole range (with a warning); use [`try_generate_sorted_keys`] to
/// reject that case instead. `count == 0` yields an empty vector.
pub fn generate_sorted_keys<R: Rng>(rng: &mut R, count: usize, min: i64, max: i64) -> Vec<i64> {
    let available = range_size(min, max);
    if count > available {
        warn!(
            "range [{min}, {max}] holds only {available} unique keys, clamping request for {count}"
        );
        return fill(rng, available, min, max);
    }
    fill(rng, count, min, max)
}

/// Strict variant of [`generate_sorted_keys`]: fails with
/// [`StrataError::RangeTooSmall`] instead of clamping.
pub fn try_generate_sorted_keys<R: Rng>(
    rng: &mut R,
    count: usize,
    min: i64,
    max: i64,
) -> Result<Vec<i64>> {
    let available = range_size(min, max);
    if count > available {
        return Err(StrataError::RangeTooSmall {
            requested: count,
            available,
        });
    }
    Ok(fill(rng, count, min, max))
}

/// Number of integers in `[min, max]`, saturating at `usize::MAX`.
fn range_size(min: i64, max: i64) -> usize {
    if max < min {
        return 0;
    }
    usize::try_from(max.abs_diff(min))
        .ok()
        .and_then(|d| d.checked_add(1))
        .unwrap_or(usize::MAX)
}

/// Rejection-samples `count` unique values; the ordered set comes out
/// already sorted.
fn fill<R: Rng>(rng: &mut R, count: usize, min: i64, max: i64) -> Vec<i64> {
    if count == 0 {
        return Vec::new();
    }
    let mut unique = BTreeSet::new();
    while unique.len() < count {
        unique.insert(rng.random_range(min..=max));
    }
    unique.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sorted_unique_and_sized() {
        let mut rng = StdRng::seed_from_u64(1);
        let keys = generate_sorted_keys(&mut rng, 1_000, 0, 1_000_000);

        assert_eq!(keys.len(), 1_000);
        assert!(keys.windows(2).all(|w| w[0] < w[1]), "sorted and unique");
        assert!(keys.iter().all(|&k| (0..=1_000_000).contains(&k)));
    }

    #[test]
    fn test_zero_count() {
        let mut rng = StdRng::seed_from_u64(2);
        assert!(generate_sorted_keys(&mut rng, 0, 0, 100).is_empty());
    }

    #[test]
    fn test_clamps_to_range_size() {
        let mut rng = StdRng::seed_from_u64(3);
        // Only 6 unique values exist in [10, 15].
        let keys = generate_sorted_keys(&mut rng, 100, 10, 15);
        assert_eq!(keys, vec![10, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn test_strict_variant_rejects_small_range() {
        let mut rng = StdRng::seed_from_u64(4);
        let err = try_generate_sorted_keys(&mut rng, 100, 1, 5).unwrap_err();
        assert!(matches!(
            err,
            StrataError::RangeTooSmall {
                requested: 100,
                available: 5,
            }
        ));

        assert!(try_generate_sorted_keys(&mut rng, 5, 1, 5).is_ok());
    }

    #[test]
    fn test_seed_determinism() {
        let a = generate_sorted_keys(&mut StdRng::seed_from_u64(42), 500, 0, 100_000);
        let b = generate_sorted_keys(&mut StdRng::seed_from_u64(42), 500, 0, 100_000);
        assert_eq!(a, b);
    }

    #[test]
    fn test_negative_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let keys = generate_sorted_keys(&mut rng, 50, -1_000, -500);
        assert_eq!(keys.len(), 50);
        assert!(keys.iter().all(|&k| (-1_000..=-500).contains(&k)));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let mut rng = StdRng::seed_from_u64(6);
        assert!(generate_sorted_keys(&mut rng, 10, 5, 1).is_empty());
    }
}

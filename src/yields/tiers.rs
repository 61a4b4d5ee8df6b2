//! Tier ordering and principal allocation for tiered-rate deposits

use crate::deposit::InterestTier;
use std::cmp::Ordering;

/// A slice of principal assigned to one tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierAllocation {
    pub tier: InterestTier,
    pub portion: f64,
}

/// Sort tiers ascending by ceiling, the unbounded tier last
pub fn sort_tiers(tiers: &[InterestTier]) -> Vec<InterestTier> {
    let mut sorted = tiers.to_vec();
    sorted.sort_by(|a, b| match (a.up_to, b.up_to) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}

/// Walk the sorted tiers, giving each `min(remaining, ceiling - previous ceiling)`
///
/// Portions sum to the principal whenever the schedule ends in an unbounded
/// tier. Principal above the last ceiling of a fully bounded schedule is left
/// unallocated and earns nothing.
pub fn allocate(principal: f64, tiers: &[InterestTier]) -> Vec<TierAllocation> {
    let mut remaining = principal.max(0.0);
    let mut previous_ceiling = 0.0;
    let mut allocations = Vec::with_capacity(tiers.len());

    for tier in sort_tiers(tiers) {
        let capacity = match tier.up_to {
            Some(ceiling) => (ceiling - previous_ceiling).max(0.0),
            None => f64::INFINITY,
        };
        let portion = remaining.min(capacity);
        remaining -= portion;

        if let Some(ceiling) = tier.up_to {
            previous_ceiling = f64::max(previous_ceiling, ceiling);
        }

        allocations.push(TierAllocation { tier, portion });
    }

    if remaining > 0.0 {
        log::warn!(
            "Tier schedule covers only {:.2} of principal {:.2}; remainder earns no interest",
            principal - remaining,
            principal
        );
    }

    allocations
}

/// Portion-weighted average of tier rates
pub fn blended_rate(allocations: &[TierAllocation]) -> f64 {
    let allocated: f64 = allocations.iter().map(|a| a.portion).sum();
    if allocated <= 0.0 {
        return 0.0;
    }

    allocations
        .iter()
        .map(|a| a.portion * a.tier.rate)
        .sum::<f64>()
        / allocated
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ladder() -> Vec<InterestTier> {
        vec![
            InterestTier::unbounded(0.05),
            InterestTier::new(Some(250_000.0), 0.045),
            InterestTier::new(Some(100_000.0), 0.04),
        ]
    }

    #[test]
    fn test_sort_puts_unbounded_last() {
        let sorted = sort_tiers(&ladder());
        assert_eq!(sorted[0].up_to, Some(100_000.0));
        assert_eq!(sorted[1].up_to, Some(250_000.0));
        assert_eq!(sorted[2].up_to, None);
    }

    #[test]
    fn test_allocation_walks_brackets() {
        let allocations = allocate(300_000.0, &ladder());
        let portions: Vec<f64> = allocations.iter().map(|a| a.portion).collect();
        assert_eq!(portions, vec![100_000.0, 150_000.0, 50_000.0]);
    }

    #[test]
    fn test_allocation_stops_in_first_bracket() {
        let allocations = allocate(40_000.0, &ladder());
        let portions: Vec<f64> = allocations.iter().map(|a| a.portion).collect();
        assert_eq!(portions, vec![40_000.0, 0.0, 0.0]);
    }

    #[test]
    fn test_allocation_sums_to_principal() {
        for principal in [0.01, 1.0, 99_999.99, 100_000.0, 123_456.78, 250_000.01, 9_876_543.21] {
            let total: f64 = allocate(principal, &ladder()).iter().map(|a| a.portion).sum();
            assert_relative_eq!(total, principal, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_bounded_schedule_leaves_remainder() {
        let tiers = vec![InterestTier::new(Some(1_000.0), 0.03)];
        let allocations = allocate(1_500.0, &tiers);
        assert_eq!(allocations.len(), 1);
        assert_eq!(allocations[0].portion, 1_000.0);
    }

    #[test]
    fn test_blended_rate() {
        let allocations = allocate(200_000.0, &ladder());
        // 100k at 4%, 100k at 4.5%
        assert_relative_eq!(blended_rate(&allocations), 0.0425, epsilon = 1e-12);
        assert_eq!(blended_rate(&[]), 0.0);
    }
}

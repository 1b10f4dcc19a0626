//! Commission Engine
//!
//! Tiered commission-rate lookup for B2B course sales. The resolved rate
//! and amount are snapshotted onto the sale at creation; rule edits never
//! retroactively change historical figures.

use shared::models::CommissionRule;

/// Rate for `price` from a price-sorted, non-overlapping rule set.
/// First rule with `min_amount <= price <= max_amount` wins; no match → 0.
pub fn lookup_rate(rules: &[CommissionRule], price: f64) -> f64 {
    rules
        .iter()
        .find(|r| price >= r.min_amount && price <= r.max_amount)
        .map(|r| r.rate)
        .unwrap_or(0.0)
}

/// Resolved (rate, amount) pair for a sale price.
pub fn commission_for(rules: &[CommissionRule], price: f64) -> (f64, f64) {
    let rate = lookup_rate(rules, price);
    (rate, price * rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Vec<CommissionRule> {
        vec![
            CommissionRule { id: 1, min_amount: 0.0, max_amount: 10_000.0, rate: 0.05 },
            CommissionRule { id: 2, min_amount: 10_000.01, max_amount: 50_000.0, rate: 0.08 },
            CommissionRule { id: 3, min_amount: 50_000.01, max_amount: 1_000_000.0, rate: 0.10 },
        ]
    }

    #[test]
    fn test_lookup_inside_range() {
        assert_eq!(lookup_rate(&rules(), 5_000.0), 0.05);
        assert_eq!(lookup_rate(&rules(), 20_000.0), 0.08);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        assert_eq!(lookup_rate(&rules(), 0.0), 0.05);
        assert_eq!(lookup_rate(&rules(), 10_000.0), 0.05);
        assert_eq!(lookup_rate(&rules(), 10_000.01), 0.08);
    }

    #[test]
    fn test_no_match_defaults_to_zero() {
        assert_eq!(lookup_rate(&rules(), 2_000_000.0), 0.0);
        assert_eq!(lookup_rate(&[], 100.0), 0.0);
    }

    #[test]
    fn test_commission_amount() {
        let (rate, amount) = commission_for(&rules(), 20_000.0);
        assert_eq!(rate, 0.08);
        assert_eq!(amount, 1_600.0);
    }
}

//! Group-activity bracket pricing
//!
//! Fixed tier tables: each entry is (max people in bracket, unit price),
//! ascending by capacity. The first bracket that fits the requested group
//! wins; a group larger than every bracket gets the last bracket's price
//! (no overflow penalty — deliberate policy).

/// On-site activity brackets
pub const BRACKETS_ON_SITE: &[(i64, f64)] = &[
    (10, 900.0),
    (15, 850.0),
    (20, 800.0),
    (30, 750.0),
    (40, 700.0),
    (50, 650.0),
];

/// Off-site activity brackets
pub const BRACKETS_OFF_SITE: &[(i64, f64)] = &[
    (20, 1300.0),
    (40, 1100.0),
    (60, 1000.0),
    (80, 950.0),
    (100, 850.0),
];

/// Product-name markers selecting a bracket table
const MARKER_ON_SITE: &str = "On-site";
const MARKER_OFF_SITE: &str = "Off-site";

/// Pick the unit price for `quantity` people from a bracket table.
fn price_from_brackets(brackets: &[(i64, f64)], quantity: i64) -> f64 {
    for &(max_people, price) in brackets {
        if quantity <= max_people {
            return price;
        }
    }
    // Overflow: largest bracket's price
    brackets[brackets.len() - 1].1
}

/// Resolve the bracket unit price for a group-activity product.
///
/// Returns `None` when the product name carries neither site marker —
/// pricing is then left to the caller-supplied `price_per_unit`.
pub fn resolve_unit_price(product_name: &str, quantity: i64) -> Option<f64> {
    if product_name.contains(MARKER_ON_SITE) {
        Some(price_from_brackets(BRACKETS_ON_SITE, quantity))
    } else if product_name.contains(MARKER_OFF_SITE) {
        Some(price_from_brackets(BRACKETS_OFF_SITE, quantity))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_site_smallest_fitting_bracket() {
        assert_eq!(resolve_unit_price("Activities Group (On-site)", 12), Some(850.0));
        assert_eq!(resolve_unit_price("Activities Group (On-site)", 10), Some(900.0));
        assert_eq!(resolve_unit_price("Activities Group (On-site)", 16), Some(800.0));
    }

    #[test]
    fn test_on_site_overflow_uses_last_bracket() {
        assert_eq!(resolve_unit_price("Activities Group (On-site)", 999), Some(650.0));
        assert_eq!(resolve_unit_price("Activities Group (On-site)", 51), Some(650.0));
    }

    #[test]
    fn test_off_site_brackets() {
        assert_eq!(resolve_unit_price("Activities Group (Off-site)", 20), Some(1300.0));
        assert_eq!(resolve_unit_price("Activities Group (Off-site)", 21), Some(1100.0));
        assert_eq!(resolve_unit_price("Activities Group (Off-site)", 100), Some(850.0));
        assert_eq!(resolve_unit_price("Activities Group (Off-site)", 250), Some(850.0));
    }

    #[test]
    fn test_unmarked_product_is_not_priced_here() {
        assert_eq!(resolve_unit_price("1 Day Pass (Group)", 12), None);
    }
}

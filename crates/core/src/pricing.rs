//! Shipping cost policy, sale discounts, and currency formatting.
//!
//! All amounts are [`Decimal`] values in Egyptian pounds (L.E.). The policy
//! here is the single source of truth for totals: the cart summary and the
//! checkout summary both call [`compute_shipping`], so the two can never
//! diverge in rounding or threshold semantics.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Minimum subtotal (L.E.) for shipping to be free.
pub const FAST_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(3000, 0, 0, false, 0);

/// Per-unit shipping cost (L.E.) for products without their own override.
pub const DEFAULT_SHIPPING_COST: Decimal = Decimal::from_parts(299, 0, 0, false, 0);

/// Item count above which shipping is doubled (strictly greater; 6+ items = 2x).
pub const SHIPPING_DOUBLE_ITEMS_THRESHOLD: u32 = 5;

/// A cart line joined with live product pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub quantity: u32,
    /// Live product price per unit.
    pub unit_price: Decimal,
    /// Per-unit shipping override; `None` falls back to [`DEFAULT_SHIPPING_COST`].
    pub shipping_price: Option<Decimal>,
}

/// Result of the shipping policy for a given cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingQuote {
    pub cost: Decimal,
    /// True when the item-count surcharge doubled the base cost.
    pub is_doubled: bool,
}

impl ShippingQuote {
    /// Free shipping (subtotal reached the fast-shipping threshold).
    #[must_use]
    pub const fn free() -> Self {
        Self {
            cost: Decimal::ZERO,
            is_doubled: false,
        }
    }
}

/// Sum of `unit_price x quantity` over the given lines.
#[must_use]
pub fn subtotal(lines: &[PricedLine]) -> Decimal {
    lines
        .iter()
        .map(|line| line.unit_price * Decimal::from(line.quantity))
        .sum()
}

/// Compute the shipping cost for a cart.
///
/// Rules, in order of precedence:
///
/// 1. `subtotal >= FAST_SHIPPING_THRESHOLD`: free, never doubled.
/// 2. Base cost: the sum over lines of `quantity x` the line's shipping
///    price, falling back to [`DEFAULT_SHIPPING_COST`].
/// 3. Total item count strictly greater than
///    [`SHIPPING_DOUBLE_ITEMS_THRESHOLD`]: base cost doubled.
#[must_use]
pub fn compute_shipping(lines: &[PricedLine], subtotal: Decimal) -> ShippingQuote {
    if subtotal >= FAST_SHIPPING_THRESHOLD {
        return ShippingQuote::free();
    }

    let item_count: u32 = lines.iter().map(|line| line.quantity).sum();
    let base: Decimal = lines
        .iter()
        .map(|line| {
            Decimal::from(line.quantity) * line.shipping_price.unwrap_or(DEFAULT_SHIPPING_COST)
        })
        .sum();

    let is_doubled = item_count > SHIPPING_DOUBLE_ITEMS_THRESHOLD;
    ShippingQuote {
        cost: if is_doubled { base * Decimal::TWO } else { base },
        is_doubled,
    }
}

/// Percentage off shown for a product on sale.
///
/// Only defined when `compare_at_price > price`; equal or lower compare-at
/// prices mean the product is not on sale and no discount is shown.
#[must_use]
pub fn discount_percent(price: Decimal, compare_at_price: Option<Decimal>) -> Option<u32> {
    let compare = compare_at_price?;
    if compare <= price || compare <= Decimal::ZERO {
        return None;
    }
    ((compare - price) / compare * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
}

/// Format an amount in Egyptian pounds, e.g. `1,234.50 L.E.`.
#[must_use]
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let raw = format!("{rounded:.2}");
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));
    let (sign, digits) = int_part
        .strip_prefix('-')
        .map_or(("", int_part), |rest| ("-", rest));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{frac_part} L.E.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: u32, unit_price: i64, shipping_price: Option<i64>) -> PricedLine {
        PricedLine {
            quantity,
            unit_price: Decimal::new(unit_price, 0),
            shipping_price: shipping_price.map(|p| Decimal::new(p, 0)),
        }
    }

    #[test]
    fn subtotal_is_price_times_quantity() {
        let lines = [line(2, 500, None), line(1, 1000, None)];
        assert_eq!(subtotal(&lines), Decimal::new(2000, 0));
    }

    #[test]
    fn just_below_threshold_still_charges_shipping() {
        // 2999.99 with one default-shipping item
        let lines = [PricedLine {
            quantity: 1,
            unit_price: Decimal::new(299_999, 2),
            shipping_price: None,
        }];
        let quote = compute_shipping(&lines, Decimal::new(299_999, 2));
        assert_eq!(quote.cost, DEFAULT_SHIPPING_COST);
        assert!(!quote.is_doubled);
    }

    #[test]
    fn threshold_is_inclusive_and_dominates_item_count() {
        // 3000.00 exactly, with enough items to otherwise double
        let lines = [line(10, 300, None)];
        let quote = compute_shipping(&lines, Decimal::new(3000, 0));
        assert_eq!(quote, ShippingQuote::free());
    }

    #[test]
    fn six_items_double_the_base() {
        let lines = [line(6, 100, Some(100))];
        let quote = compute_shipping(&lines, subtotal(&lines));
        assert_eq!(quote.cost, Decimal::new(1200, 0));
        assert!(quote.is_doubled);
    }

    #[test]
    fn five_items_do_not_double() {
        // Doubling threshold is strict: exactly 5 items pays the base rate.
        let lines = [line(5, 100, Some(100))];
        let quote = compute_shipping(&lines, subtotal(&lines));
        assert_eq!(quote.cost, Decimal::new(500, 0));
        assert!(!quote.is_doubled);
    }

    #[test]
    fn per_product_override_mixes_with_default() {
        let lines = [line(1, 100, Some(50)), line(2, 100, None)];
        let quote = compute_shipping(&lines, subtotal(&lines));
        assert_eq!(quote.cost, Decimal::new(50, 0) + DEFAULT_SHIPPING_COST * Decimal::TWO);
        assert!(!quote.is_doubled);
    }

    #[test]
    fn discount_requires_higher_compare_at_price() {
        let price = Decimal::new(80, 0);
        let compare = Decimal::new(100, 0);
        assert_eq!(discount_percent(price, Some(compare)), Some(20));

        // Equal prices: not on sale
        assert_eq!(discount_percent(compare, Some(compare)), None);
        // Compare-at below price: not on sale
        assert_eq!(discount_percent(compare, Some(price)), None);
        assert_eq!(discount_percent(price, None), None);
    }

    #[test]
    fn discount_rounds_to_nearest_percent() {
        // (150 - 100) / 150 = 33.33..% -> 33
        assert_eq!(
            discount_percent(Decimal::new(100, 0), Some(Decimal::new(150, 0))),
            Some(33)
        );
        // (300 - 100) / 300 = 66.66..% -> 67
        assert_eq!(
            discount_percent(Decimal::new(100, 0), Some(Decimal::new(300, 0))),
            Some(67)
        );
    }

    #[test]
    fn formats_currency_with_grouping() {
        assert_eq!(format_currency(Decimal::new(0, 0)), "0.00 L.E.");
        assert_eq!(format_currency(Decimal::new(299, 0)), "299.00 L.E.");
        assert_eq!(format_currency(Decimal::new(123_450, 2)), "1,234.50 L.E.");
        assert_eq!(
            format_currency(Decimal::new(1_234_567_89, 2)),
            "1,234,567.89 L.E."
        );
    }
}

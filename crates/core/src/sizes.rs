//! Per-size inventory rules.
//!
//! A product either tracks stock per size (at least one enabled size row
//! exists) or falls back to a single flat stock count. The two modes are
//! mutually exclusive: once any size rows exist, the product-level stock is
//! ignored for purchase limits.
//!
//! Size rows are upserted by their `(product, size)` natural key and are
//! disabled rather than deleted, so a sold-out or retired size keeps its
//! history.

use serde::{Deserialize, Serialize};

/// Canonical display order for recognized size labels. Unrecognized labels
/// sort after these, lexically.
pub const SIZE_ORDER: [&str; 8] = ["XS", "S", "M", "L", "XL", "XXL", "2XL", "3XL"];

/// Sizes created for a product that is switched to size-based inventory.
pub const DEFAULT_SIZES: [&str; 5] = ["XS", "S", "M", "L", "XL"];

/// One size's inventory state for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRow {
    pub size: String,
    pub stock: i32,
    pub is_enabled: bool,
}

impl SizeRow {
    /// Whether this size can currently be purchased.
    #[must_use]
    pub const fn is_purchasable(&self) -> bool {
        self.is_enabled && self.stock > 0
    }
}

/// The default rows for a newly-sized product: `XS..XL`, zero stock, enabled.
#[must_use]
pub fn default_size_rows() -> Vec<SizeRow> {
    DEFAULT_SIZES
        .iter()
        .map(|&size| SizeRow {
            size: size.to_owned(),
            stock: 0,
            is_enabled: true,
        })
        .collect()
}

/// Rank of a size label in the canonical ordering.
///
/// Recognized labels sort by their [`SIZE_ORDER`] position; everything else
/// sorts after them, lexically by label.
fn size_rank(size: &str) -> (usize, &str) {
    let index = SIZE_ORDER
        .iter()
        .position(|&known| known == size)
        .unwrap_or(SIZE_ORDER.len());
    (index, size)
}

/// Compare two size labels by canonical display order.
#[must_use]
pub fn compare_sizes(a: &str, b: &str) -> std::cmp::Ordering {
    size_rank(a).cmp(&size_rank(b))
}

/// Sort size labels into canonical display order, in place.
///
/// Applied wherever sizes are listed, regardless of storage order.
pub fn sort_size_labels(labels: &mut [String]) {
    labels.sort_by(|a, b| compare_sizes(a, b));
}

/// Sort size rows into canonical display order, in place.
pub fn sort_size_rows(rows: &mut [SizeRow]) {
    rows.sort_by(|a, b| compare_sizes(&a.size, &b.size));
}

/// Whether the product uses size-based inventory.
///
/// True when at least one enabled size row exists; disabled rows alone do not
/// switch the product out of flat-stock mode.
#[must_use]
pub fn uses_size_inventory(rows: &[SizeRow]) -> bool {
    rows.iter().any(|row| row.is_enabled)
}

/// The size a product page selects by default.
///
/// The first enabled size with stock, falling back to the first enabled size
/// when everything is out of stock (shown, but not purchasable). `None` for
/// flat-stock products.
#[must_use]
pub fn default_selection(rows: &[SizeRow]) -> Option<&SizeRow> {
    rows.iter()
        .find(|row| row.is_purchasable())
        .or_else(|| rows.iter().find(|row| row.is_enabled))
}

/// Maximum quantity purchasable for the current selection.
///
/// In size-based mode this is the selected size's stock (0 when nothing is
/// selected); in flat mode it is the product-level stock.
#[must_use]
pub fn max_purchasable(rows: &[SizeRow], selected: Option<&str>, flat_stock: i32) -> i32 {
    if uses_size_inventory(rows) {
        selected
            .and_then(|size| rows.iter().find(|row| row.is_enabled && row.size == size))
            .map_or(0, |row| row.stock.max(0))
    } else {
        flat_stock.max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(size: &str, stock: i32, is_enabled: bool) -> SizeRow {
        SizeRow {
            size: size.to_owned(),
            stock,
            is_enabled,
        }
    }

    #[test]
    fn canonical_ordering_applies() {
        let mut labels: Vec<String> = ["3XL", "M", "XS"].iter().map(|s| (*s).to_owned()).collect();
        sort_size_labels(&mut labels);
        assert_eq!(labels, ["XS", "M", "3XL"]);
    }

    #[test]
    fn unrecognized_labels_sort_last_lexically() {
        let mut labels: Vec<String> = ["One Size", "XL", "Kids", "S"]
            .iter()
            .map(|s| (*s).to_owned())
            .collect();
        sort_size_labels(&mut labels);
        assert_eq!(labels, ["S", "XL", "Kids", "One Size"]);
    }

    #[test]
    fn default_rows_are_xs_through_xl_zero_stock_enabled() {
        let rows = default_size_rows();
        let labels: Vec<&str> = rows.iter().map(|r| r.size.as_str()).collect();
        assert_eq!(labels, ["XS", "S", "M", "L", "XL"]);
        assert!(rows.iter().all(|r| r.stock == 0 && r.is_enabled));
    }

    #[test]
    fn default_selection_prefers_in_stock() {
        let rows = vec![row("XS", 0, true), row("S", 3, true), row("M", 5, true)];
        assert_eq!(default_selection(&rows).map(|r| r.size.as_str()), Some("S"));
    }

    #[test]
    fn default_selection_falls_back_to_first_enabled() {
        let rows = vec![row("XS", 0, false), row("S", 0, true), row("M", 0, true)];
        assert_eq!(default_selection(&rows).map(|r| r.size.as_str()), Some("S"));
        assert!(default_selection(&[]).is_none());
    }

    #[test]
    fn sized_mode_needs_an_enabled_row() {
        assert!(!uses_size_inventory(&[]));
        assert!(!uses_size_inventory(&[row("M", 10, false)]));
        assert!(uses_size_inventory(&[row("M", 0, true)]));
    }

    #[test]
    fn max_purchasable_uses_selected_size_stock() {
        let rows = vec![row("S", 2, true), row("M", 0, true)];
        assert_eq!(max_purchasable(&rows, Some("S"), 99), 2);
        assert_eq!(max_purchasable(&rows, Some("M"), 99), 0);
        assert_eq!(max_purchasable(&rows, None, 99), 0);
        // All rows disabled: product is back in flat-stock mode
        let rows = vec![row("S", 2, false)];
        assert_eq!(max_purchasable(&rows, Some("S"), 99), 99);
    }

    #[test]
    fn flat_mode_uses_product_stock() {
        assert_eq!(max_purchasable(&[], None, 7), 7);
        assert_eq!(max_purchasable(&[], None, -1), 0);
    }
}

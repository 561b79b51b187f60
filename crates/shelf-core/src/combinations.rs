//! # Combination Finder
//!
//! Finds groups of 2 or 3 products whose prices fit a budget.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog (price ascending): [C 5.00] [A 10.00] [B 20.00]   budget 30.00 │
//! │                                                                         │
//! │  1. Pairs   (i < j)       C+A = 15.00 ✓   C+B = 25.00 ✓   A+B = 30.00 ✓ │
//! │  2. Triples (i < j < k)   C+A+B = 35.00 ✗                               │
//! │  3. Stable sort by total, descending                                    │
//! │  4. Keep the first 5                                                    │
//! │                                                                         │
//! │  Result: [A,B 30.00] [C,B 25.00] [C,A 15.00]                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Enumeration is O(n²) + O(n³). That is fine for catalogs of a few hundred
//! products; [`check_catalog_size`] lets callers refuse larger ones.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::{MAX_COMBINATIONS, MAX_COMBINATION_SIZE, MIN_COMBINATION_SIZE};

/// A group of distinct products and the sum of their prices.
///
/// Names are in catalog order (price ascending as supplied by storage).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Combination {
    pub product_names: Vec<String>,
    pub total: Money,
}

/// Returns up to [`MAX_COMBINATIONS`] product groups whose price sum is `<= max_sum`.
///
/// ## Contract
/// - `products` should be sorted by price ascending; the result *set* does
///   not depend on it, but name order and tie order do
/// - fewer than 2 products → empty result
/// - every pair, then every triple, is checked with exact cent arithmetic
/// - sorted by total descending; ties keep enumeration order
///
/// ## Errors
/// [`CoreError::AmountOverflow`] if a price sum leaves the `i64` range.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use shelf_core::{find_combinations, Money, Product};
///
/// let now = Utc::now();
/// let item = |name: &str, cents: i64| Product {
///     id: name.to_string(),
///     name: name.to_string(),
///     description: None,
///     price_cents: cents,
///     stock_quantity: 1,
///     created_at: now,
///     updated_at: now,
/// };
/// let catalog = [item("C", 500), item("A", 1000), item("B", 2000)];
///
/// let found = find_combinations(&catalog, Money::from_cents(3000)).unwrap();
/// assert_eq!(found[0].product_names, ["A", "B"]);
/// assert_eq!(found[0].total, Money::from_cents(3000));
/// assert_eq!(found.len(), 3);
/// ```
pub fn find_combinations(products: &[Product], max_sum: Money) -> CoreResult<Vec<Combination>> {
    let mut found = Vec::new();

    if products.len() < MIN_COMBINATION_SIZE {
        return Ok(found);
    }

    for size in MIN_COMBINATION_SIZE..=MAX_COMBINATION_SIZE {
        collect_groups(products, size, max_sum, &mut found)?;
    }

    // sort_by is stable: equal totals stay in enumeration order
    found.sort_by(|a, b| b.total.cmp(&a.total));
    found.truncate(MAX_COMBINATIONS);

    Ok(found)
}

/// Refuses catalogs larger than `limit` before a cubic search.
///
/// `None` means unbounded.
pub fn check_catalog_size(len: usize, limit: Option<usize>) -> CoreResult<()> {
    match limit {
        Some(max) if len > max => Err(CoreError::CatalogTooLarge { size: len, max }),
        _ => Ok(()),
    }
}

/// Appends every `size`-element index group (lexicographic order) within budget.
fn collect_groups(
    products: &[Product],
    size: usize,
    max_sum: Money,
    out: &mut Vec<Combination>,
) -> CoreResult<()> {
    let n = products.len();
    if size > n {
        return Ok(());
    }

    // indices[0] < indices[1] < ... < indices[size - 1]
    let mut indices: Vec<usize> = (0..size).collect();

    loop {
        let total = indices.iter().try_fold(Money::zero(), |acc, &i| {
            acc.checked_add(products[i].price())
                .ok_or_else(|| CoreError::overflow("combination total"))
        })?;

        if total <= max_sum {
            out.push(Combination {
                product_names: indices.iter().map(|&i| products[i].name.clone()).collect(),
                total,
            });
        }

        // Advance to the next group: bump the rightmost index that still has room.
        let Some(pos) = (0..size).rev().find(|&p| indices[p] < n - size + p) else {
            return Ok(());
        };
        indices[pos] += 1;
        for p in pos + 1..size {
            indices[p] = indices[p - 1] + 1;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

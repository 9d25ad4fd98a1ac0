//! # Universal Price Map & Statistics Engine
//!
//! A price map carries one price per metal context for a single item
//! (a mounting, a labor task, a finished design). Partial coverage is
//! normal and meaningful: a missing entry means "not offered in this
//! metal", not zero.
//!
//! ## Validity Filter
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  An entry participates in lookups and statistics iff                    │
//! │                                                                         │
//! │    1. its key parses as a supported metal context, AND                  │
//! │    2. its value is a finite, non-negative number                        │
//! │                                                                         │
//! │  Everything else is treated as ABSENT - not as zero. Lookup callers    │
//! │  cannot distinguish invalid / absent / non-numeric; that opacity is    │
//! │  deliberate ("not available" is one state).                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are stored as raw JSON because the maps come from loosely-typed
//! external documents; [`UniversalPriceMap::audit`] reports what the
//! validity filter would drop.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::metal::MetalKey;
use crate::money::{dollars_to_cents, Money};

// =============================================================================
// Universal Price Map
// =============================================================================

/// Mapping from serialized metal key to a price value.
///
/// Prices are stored in dollars (JSON numbers), the unit the surrounding
/// documents use; all reads coerce to integer-cent [`Money`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct UniversalPriceMap(#[ts(type = "Record<string, unknown>")] HashMap<String, Value>);

impl UniversalPriceMap {
    /// Creates an empty price map.
    pub fn new() -> Self {
        UniversalPriceMap(HashMap::new())
    }

    /// Sets the price for a metal context.
    pub fn set_price(&mut self, key: MetalKey, price: Money) {
        self.0
            .insert(key.key(), Value::from(price.cents() as f64 / 100.0));
    }

    /// Inserts a raw entry as it arrived from an external document.
    /// The validity filter decides later whether it is usable.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Removes the entry for a metal context, returning the raw value.
    pub fn remove(&mut self, key: &MetalKey) -> Option<Value> {
        self.0.remove(&key.key())
    }

    /// Number of raw entries (valid or not).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Price for a raw (metal, purity) pair.
    ///
    /// Returns `None` when the pair is invalid, the entry is absent, or
    /// the value is non-numeric - callers must not distinguish these
    /// cases. Never fails.
    pub fn price_for(&self, metal: &str, purity: &str) -> Option<Money> {
        let key = MetalKey::from_parts(metal, purity).ok()?;
        self.price_of(&key)
    }

    /// Price for an already-validated key. Same opacity as `price_for`.
    pub fn price_of(&self, key: &MetalKey) -> Option<Money> {
        numeric_price(self.0.get(&key.key())?).filter(|price| !price.is_negative())
    }

    /// Whether the item is offered (has a usable price) in this context.
    pub fn is_offered_in(&self, metal: &str, purity: &str) -> bool {
        self.price_for(metal, purity).is_some()
    }

    /// Derives statistics over the usable entries.
    ///
    /// Zero usable entries yields the all-zero statistics object with an
    /// empty breakdown - never an error. Recomputed on every call; nothing
    /// is cached across map mutations.
    pub fn statistics(&self) -> PricingStatistics {
        let mut valid: Vec<(MetalKey, Money)> = self
            .0
            .iter()
            .filter_map(|(raw_key, value)| {
                let key = MetalKey::parse(raw_key).ok()?;
                let price = numeric_price(value).filter(|p| !p.is_negative())?;
                Some((key, price))
            })
            .collect();

        if valid.is_empty() {
            return PricingStatistics::default();
        }

        valid.sort_by_key(|(key, _)| key.ordinal());

        let count = valid.len();
        let sum: i64 = valid.iter().map(|(_, price)| price.cents()).sum();
        let min = valid.iter().map(|(_, price)| price.cents()).min().unwrap_or(0);
        let max = valid.iter().map(|(_, price)| price.cents()).max().unwrap_or(0);

        PricingStatistics {
            min_cents: min,
            max_cents: max,
            average_cents: (sum + count as i64 / 2) / count as i64,
            count,
            breakdown: valid
                .into_iter()
                .map(|(key, price)| PriceEntry {
                    display_name: key.display_name(),
                    key,
                    price_cents: price.cents(),
                })
                .collect(),
        }
    }

    /// Checks every raw entry and reports errors and warnings.
    ///
    /// Unparseable keys and non-numeric or negative values are errors;
    /// zero prices are warnings (a process may legitimately be free, but
    /// zero usually means a half-filled form).
    pub fn audit(&self) -> PriceMapAudit {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for (raw_key, value) in &self.0 {
            if let Err(err) = MetalKey::parse(raw_key) {
                errors.push(format!("{raw_key}: {err}"));
            }

            match numeric_price(value) {
                None => errors.push(format!("{raw_key}: price must be a finite number")),
                Some(price) if price.is_negative() => {
                    errors.push(format!("{raw_key}: price cannot be negative"))
                }
                Some(price) if price.is_zero() => {
                    warnings.push(format!("{raw_key}: price is zero"))
                }
                Some(_) => {}
            }
        }

        // HashMap iteration order is arbitrary; reports are sorted so the
        // same map always produces the same audit.
        errors.sort();
        warnings.sort();

        PriceMapAudit {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Price gap between two metal contexts.
    ///
    /// `None` unless both contexts carry a usable price. The percentage is
    /// relative to the first context; a zero base reports 0.0 rather than
    /// an infinite percentage.
    pub fn difference_between(&self, a: &MetalKey, b: &MetalKey) -> Option<PriceDifference> {
        let base = self.price_of(a)?;
        let other = self.price_of(b)?;
        let difference = other - base;

        let percentage = if base.is_zero() {
            0.0
        } else {
            difference.cents() as f64 / base.cents() as f64 * 100.0
        };

        Some(PriceDifference {
            difference_cents: difference.cents(),
            percentage,
        })
    }
}

/// Coerces a raw JSON value to Money. Non-numeric and non-finite values
/// are `None`; sign is preserved so the audit can flag negatives.
fn numeric_price(value: &Value) -> Option<Money> {
    value
        .as_f64()
        .filter(|v| v.is_finite())
        .map(|v| Money::from_cents(dollars_to_cents(v)))
}

// =============================================================================
// Derived Snapshots
// =============================================================================

/// Read-only statistics snapshot of a price map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingStatistics {
    /// Lowest usable price in cents (0 when count is 0).
    pub min_cents: i64,

    /// Highest usable price in cents (0 when count is 0).
    pub max_cents: i64,

    /// Arithmetic mean in cents, rounded (0 when count is 0).
    pub average_cents: i64,

    /// Number of usable entries.
    pub count: usize,

    /// Usable (key, price) pairs in canonical enumeration order.
    pub breakdown: Vec<PriceEntry>,
}

/// One usable price map entry, UI-ready.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    /// The metal context (canonical key string in JSON).
    #[ts(as = "String")]
    pub key: MetalKey,

    /// Human label, e.g. "Gold 14K".
    pub display_name: String,

    /// Price in cents.
    pub price_cents: i64,
}

/// Price gap between two metal contexts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceDifference {
    /// Signed gap in cents (second context minus first).
    pub difference_cents: i64,

    /// Gap relative to the first context, as a percentage.
    pub percentage: f64,
}

/// Validation report over a price map's raw entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceMapAudit {
    /// True when no entry produced an error (warnings allowed).
    pub is_valid: bool,

    /// Blocking problems: unparseable keys, non-numeric or negative prices.
    pub errors: Vec<String>,

    /// Suspicious but legal: zero prices.
    pub warnings: Vec<String>,
}

// =============================================================================
// Multi-Item Totals
// =============================================================================

/// An item carrying universal prices, e.g. a labor task from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricedItem {
    /// Display label, e.g. "Stone setting".
    pub description: String,

    /// Per-context prices for this item.
    pub prices: UniversalPriceMap,
}

/// Sum of several priced items within one metal context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ContextTotal {
    /// Sum over items priced in this context, in cents.
    pub total_cents: i64,

    /// One row per input item, in input order.
    pub breakdown: Vec<ItemPrice>,
}

/// One item's contribution to a [`ContextTotal`].
///
/// `price_cents` is `None` when the item has no usable price in the
/// context - distinguishable from a true $0 price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemPrice {
    /// The item's display label.
    pub description: String,

    /// Price in cents, or `None` when not offered in this context.
    pub price_cents: Option<i64>,
}

/// Totals a list of priced items for one metal context.
///
/// Items without a usable price contribute 0 to the total but still
/// appear in the breakdown with a `None` price marker.
pub fn total_across(items: &[PricedItem], metal: &str, purity: &str) -> ContextTotal {
    let mut total = Money::zero();
    let mut breakdown = Vec::with_capacity(items.len());

    for item in items {
        let price = item.prices.price_for(metal, purity);
        if let Some(price) = price {
            total += price;
        }
        breakdown.push(ItemPrice {
            description: item.description.clone(),
            price_cents: price.map(|p| p.cents()),
        });
    }

    ContextTotal {
        total_cents: total.cents(),
        breakdown,
    }
}

// =============================================================================
// Preference Ordering
// =============================================================================

/// Reorders breakdown entries by an explicit preference list.
///
/// Keys named in `preference` come first, in list order; everything else
/// follows in canonical enumeration order. With an empty preference list
/// the result is simply the canonical order - deterministic either way.
pub fn sort_by_preference(entries: &mut [PriceEntry], preference: &[MetalKey]) {
    entries.sort_by_key(|entry| {
        match preference.iter().position(|preferred| *preferred == entry.key) {
            Some(rank) => (0, rank),
            None => (1, entry.key.ordinal()),
        }
    });
}

// =============================================================================
// Unit Tests
// =============================================================================

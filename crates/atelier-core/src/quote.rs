//! # Quote Line Groups
//!
//! The itemized state of one quote: stones, mounting, materials, labor,
//! shipping, and the rush / custom-design flags.
//!
//! ## Ownership
//! A `QuoteLines` is owned exclusively by one editing session and mutated
//! only through explicit field updates. Every cost parameter is free text
//! and coerces through [`to_money`](crate::money::to_money) - a malformed
//! amount becomes $0.00, never an error, so a half-typed form can always
//! be recomputed and displayed.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{to_money, Money};

// =============================================================================
// Line Types
// =============================================================================

/// A single-cost line (centerstone, mounting, shipping).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CostLine {
    /// Free-text description shown on the quote.
    pub description: String,

    /// Cost in cents.
    pub cost_cents: i64,
}

impl CostLine {
    /// Creates a line, coercing the raw cost text.
    pub fn new(description: impl Into<String>, raw_cost: &str) -> Self {
        CostLine {
            description: description.into(),
            cost_cents: to_money(raw_cost).cents(),
        }
    }

    /// Returns the cost as Money.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }

    /// Replaces the cost from raw text.
    pub fn set_cost(&mut self, raw_cost: &str) {
        self.cost_cents = to_money(raw_cost).cents();
    }
}

/// A cost × quantity line (accent stones, additional materials, labor).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuantityLine {
    /// Free-text description shown on the quote.
    pub description: String,

    /// Unit cost in cents.
    pub cost_cents: i64,

    /// Quantity of units.
    pub quantity: i64,
}

impl QuantityLine {
    /// Creates a line, coercing the raw cost text.
    pub fn new(description: impl Into<String>, raw_cost: &str, quantity: i64) -> Self {
        QuantityLine {
            description: description.into(),
            cost_cents: to_money(raw_cost).cents(),
            quantity,
        }
    }

    /// Returns the unit cost as Money.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }

    /// Line total (unit cost × quantity).
    pub fn line_total(&self) -> Money {
        self.cost().multiply_quantity(self.quantity)
    }

    /// Replaces the unit cost from raw text.
    pub fn set_cost(&mut self, raw_cost: &str) {
        self.cost_cents = to_money(raw_cost).cents();
    }
}

// =============================================================================
// Quote Lines
// =============================================================================

/// The full itemized quote state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLines {
    /// The centerstone (description + cost).
    pub centerstone: CostLine,

    /// The mounting (description + cost).
    pub mounting: CostLine,

    /// Accent stones (cost × quantity each).
    pub accent_stones: Vec<QuantityLine>,

    /// Additional materials (cost × quantity each).
    pub additional_materials: Vec<QuantityLine>,

    /// Labor tasks (cost × quantity each). Billed at cost.
    pub labor_tasks: Vec<QuantityLine>,

    /// Shipping lines (description + cost each).
    pub shipping_costs: Vec<CostLine>,

    /// Rush order flag.
    pub is_rush: bool,

    /// Whether CAD design work is included.
    pub include_custom_design: bool,
}

impl QuoteLines {
    /// Creates an empty quote.
    pub fn new() -> Self {
        QuoteLines::default()
    }

    /// Sets the centerstone line.
    pub fn set_centerstone(&mut self, description: impl Into<String>, raw_cost: &str) {
        self.centerstone = CostLine::new(description, raw_cost);
    }

    /// Sets the mounting line.
    pub fn set_mounting(&mut self, description: impl Into<String>, raw_cost: &str) {
        self.mounting = CostLine::new(description, raw_cost);
    }

    /// Appends an accent stone line.
    pub fn add_accent_stone(
        &mut self,
        description: impl Into<String>,
        raw_cost: &str,
        quantity: i64,
    ) {
        self.accent_stones
            .push(QuantityLine::new(description, raw_cost, quantity));
    }

    /// Appends an additional material line.
    pub fn add_additional_material(
        &mut self,
        description: impl Into<String>,
        raw_cost: &str,
        quantity: i64,
    ) {
        self.additional_materials
            .push(QuantityLine::new(description, raw_cost, quantity));
    }

    /// Appends a labor task line.
    pub fn add_labor_task(
        &mut self,
        description: impl Into<String>,
        raw_cost: &str,
        quantity: i64,
    ) {
        self.labor_tasks
            .push(QuantityLine::new(description, raw_cost, quantity));
    }

    /// Appends a shipping line.
    pub fn add_shipping(&mut self, description: impl Into<String>, raw_cost: &str) {
        self.shipping_costs.push(CostLine::new(description, raw_cost));
    }

    /// Removes an accent stone line by index.
    pub fn remove_accent_stone(&mut self, index: usize) -> Option<QuantityLine> {
        (index < self.accent_stones.len()).then(|| self.accent_stones.remove(index))
    }

    /// Removes an additional material line by index.
    pub fn remove_additional_material(&mut self, index: usize) -> Option<QuantityLine> {
        (index < self.additional_materials.len())
            .then(|| self.additional_materials.remove(index))
    }

    /// Removes a labor task line by index.
    pub fn remove_labor_task(&mut self, index: usize) -> Option<QuantityLine> {
        (index < self.labor_tasks.len()).then(|| self.labor_tasks.remove(index))
    }

    /// Removes a shipping line by index.
    pub fn remove_shipping(&mut self, index: usize) -> Option<CostLine> {
        (index < self.shipping_costs.len()).then(|| self.shipping_costs.remove(index))
    }

    /// Raw material cost: centerstone + mounting + accent stones +
    /// additional materials (each × quantity).
    pub fn materials_at_cost(&self) -> Money {
        let stones: Money = self
            .accent_stones
            .iter()
            .map(QuantityLine::line_total)
            .fold(Money::zero(), |acc, m| acc + m);
        let materials: Money = self
            .additional_materials
            .iter()
            .map(QuantityLine::line_total)
            .fold(Money::zero(), |acc, m| acc + m);

        self.centerstone.cost() + self.mounting.cost() + stones + materials
    }

    /// Total labor cost (each task × quantity).
    pub fn labor_cost(&self) -> Money {
        self.labor_tasks
            .iter()
            .map(QuantityLine::line_total)
            .fold(Money::zero(), |acc, m| acc + m)
    }

    /// Total shipping cost.
    pub fn shipping_total(&self) -> Money {
        self.shipping_costs
            .iter()
            .map(CostLine::cost)
            .fold(Money::zero(), |acc, m| acc + m)
    }

    /// Whether the quote has no line items at all.
    pub fn is_empty(&self) -> bool {
        self.centerstone.cost_cents == 0
            && self.mounting.cost_cents == 0
            && self.accent_stones.is_empty()
            && self.additional_materials.is_empty()
            && self.labor_tasks.is_empty()
            && self.shipping_costs.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

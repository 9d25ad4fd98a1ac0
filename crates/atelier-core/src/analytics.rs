//! # Quote Cost & Analytics Calculator
//!
//! Turns itemized quote lines plus financial settings into the full
//! revenue / cost-of-goods / profit / payout breakdown.
//!
//! ## Calculation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  materials at cost ──► × (1 + markup) ──► materials revenue            │
//! │  labor tasks ────────► billed at cost ──► labor revenue                │
//! │  design flag ────────► flat design fee                                 │
//! │  shipping lines ─────► shipping total                                  │
//! │  rush flag ──────────► (materials rev + labor rev) × (multiplier − 1)  │
//! │                                                                        │
//! │  total = materials rev + labor rev + design fee + shipping + rush     │
//! │  COG   = materials cost + labor + design fee + shipping               │
//! │          (markup and rush upcharge are pure margin, never COG)        │
//! │  commission = gross profit × rate (margin only, never cost recovery)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculator never rejects input: malformed costs were already
//! coerced to zero at entry, and a zero-value quote simply produces a
//! zero-value analytics object (margin 0%, not NaN). Whether such a quote
//! may be published is the editing surface's decision, not this module's.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::quote::QuoteLines;
use crate::settings::FinancialSettings;

// =============================================================================
// Quote Analytics
// =============================================================================

/// The derived financial picture of one quote.
///
/// Pure function of (lines, settings); recomputed whenever inputs change,
/// never patched. Carries every intermediate because display and
/// persistence consume the full breakdown, not just the total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteAnalytics {
    /// Raw material cost (centerstone + mounting + stones + materials).
    pub materials_at_cost_cents: i64,

    /// Material cost with markup applied.
    pub materials_revenue_cents: i64,

    /// Margin earned on materials (revenue − cost).
    pub material_profit_cents: i64,

    /// Total labor cost.
    pub labor_cost_cents: i64,

    /// Labor billed to the client (always equals labor cost).
    pub labor_revenue_cents: i64,

    /// Applied CAD design fee (0 when the quote has no design work).
    pub custom_design_fee_cents: i64,

    /// Sum of shipping lines.
    pub shipping_total_cents: i64,

    /// Rush surcharge on materials + labor revenue (0 when not rush).
    pub rush_upcharge_cents: i64,

    /// Client-facing quote total.
    pub total_cents: i64,

    /// Cost of goods: materials at cost + labor + design fee + shipping.
    pub cog_cents: i64,

    /// Material profit + rush upcharge.
    pub gross_profit_cents: i64,

    /// Paid to the bench jeweler (labor at cost).
    pub jeweler_payout_cents: i64,

    /// Paid to the CAD designer (the design fee).
    pub cad_designer_payout_cents: i64,

    /// Commission on gross profit.
    pub commission_payout_cents: i64,

    /// Total − COG − commission.
    pub net_profit_cents: i64,

    /// (total − COG) / total × 100; defined as 0 for a zero-total quote.
    pub gross_margin_percent: f64,
}

impl QuoteAnalytics {
    /// The client-facing total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Computes the full analytics breakdown for a quote.
///
/// Deterministic and side-effect-free: identical inputs always produce an
/// identical breakdown, which is what makes repeated saves idempotent.
///
/// ## Example
/// ```rust
/// use atelier_core::analytics::compute_analytics;
/// use atelier_core::quote::QuoteLines;
/// use atelier_core::settings::FinancialSettings;
///
/// let mut lines = QuoteLines::new();
/// lines.set_centerstone("1ct diamond", "1000");
/// lines.add_labor_task("Setting", "150", 1);
///
/// let analytics = compute_analytics(&lines, &FinancialSettings::default());
///
/// // $1,000 doubled by the default 100% markup, plus labor at cost.
/// assert_eq!(analytics.total_cents, 215_000);
/// assert_eq!(analytics.cog_cents, 115_000);
/// ```
pub fn compute_analytics(lines: &QuoteLines, settings: &FinancialSettings) -> QuoteAnalytics {
    let materials_at_cost = lines.materials_at_cost();
    let materials_revenue = materials_at_cost + materials_at_cost.apply_rate(settings.material_markup);
    let material_profit = materials_revenue - materials_at_cost;

    // Labor is billed at cost; the jeweler payout recovers it in full.
    let labor_cost = lines.labor_cost();
    let labor_revenue = labor_cost;

    let custom_design_fee = if lines.include_custom_design {
        settings.custom_design_fee()
    } else {
        Money::zero()
    };

    let shipping_total = lines.shipping_total();

    let rush_upcharge = if lines.is_rush {
        (materials_revenue + labor_revenue).apply_rate(settings.rush_multiplier.surcharge())
    } else {
        Money::zero()
    };

    let total =
        materials_revenue + labor_revenue + custom_design_fee + shipping_total + rush_upcharge;

    // COG excludes markup and the rush upcharge: both are pure margin.
    let cog = materials_at_cost + labor_cost + custom_design_fee + shipping_total;

    let gross_profit = material_profit + rush_upcharge;

    let jeweler_payout = labor_cost;
    let cad_designer_payout = custom_design_fee;
    // Commission is earned on margin only, never on cost-recovered labor
    // or the design fee.
    let commission_payout = gross_profit.apply_rate(settings.commission);

    let net_profit = total - cog - commission_payout;

    let gross_margin_percent = if total.is_positive() {
        (total - cog).cents() as f64 / total.cents() as f64 * 100.0
    } else {
        0.0
    };

    QuoteAnalytics {
        materials_at_cost_cents: materials_at_cost.cents(),
        materials_revenue_cents: materials_revenue.cents(),
        material_profit_cents: material_profit.cents(),
        labor_cost_cents: labor_cost.cents(),
        labor_revenue_cents: labor_revenue.cents(),
        custom_design_fee_cents: custom_design_fee.cents(),
        shipping_total_cents: shipping_total.cents(),
        rush_upcharge_cents: rush_upcharge.cents(),
        total_cents: total.cents(),
        cog_cents: cog.cents(),
        gross_profit_cents: gross_profit.cents(),
        jeweler_payout_cents: jeweler_payout.cents(),
        cad_designer_payout_cents: cad_designer_payout.cents(),
        commission_payout_cents: commission_payout.cents(),
        net_profit_cents: net_profit.cents(),
        gross_margin_percent,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

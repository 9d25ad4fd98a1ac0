//! # Persisted Quote Record
//!
//! The shape sent to (and read from) the quote store's update-by-id call.
//! Line groups, the applied design fee, the derived analytics snapshot,
//! and the publication flag travel together: the analytics stored here are
//! always the ones computed from the lines stored here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use atelier_core::analytics::QuoteAnalytics;
use atelier_core::quote::{CostLine, QuantityLine, QuoteLines};

/// One ticket's persisted quote state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    /// The centerstone line.
    pub centerstone: CostLine,

    /// The mounting line.
    pub mounting: CostLine,

    /// Accent stone lines.
    pub accent_stones: Vec<QuantityLine>,

    /// Additional material lines.
    pub additional_materials: Vec<QuantityLine>,

    /// Labor task lines.
    pub labor_tasks: Vec<QuantityLine>,

    /// Shipping lines.
    pub shipping_costs: Vec<CostLine>,

    /// Rush order flag.
    pub is_rush: bool,

    /// Whether CAD design work is included.
    pub include_custom_design: bool,

    /// The design fee applied by the analytics (0 when not included).
    pub custom_design_fee_cents: i64,

    /// Client-facing total, denormalized for list screens.
    pub quote_total_cents: i64,

    /// Full analytics snapshot computed from these lines.
    pub analytics: QuoteAnalytics,

    /// Whether the quote is visible to the client.
    pub quote_published: bool,

    /// When the quote was last published (None while unpublished).
    #[ts(as = "Option<String>")]
    pub published_at: Option<DateTime<Utc>>,
}

impl QuoteRecord {
    /// Assembles a record from session state.
    ///
    /// The analytics snapshot must have been computed from `lines`; the
    /// session guarantees this by computing it immediately before
    /// persisting.
    pub fn assemble(
        lines: &QuoteLines,
        analytics: QuoteAnalytics,
        quote_published: bool,
        published_at: Option<DateTime<Utc>>,
    ) -> Self {
        QuoteRecord {
            centerstone: lines.centerstone.clone(),
            mounting: lines.mounting.clone(),
            accent_stones: lines.accent_stones.clone(),
            additional_materials: lines.additional_materials.clone(),
            labor_tasks: lines.labor_tasks.clone(),
            shipping_costs: lines.shipping_costs.clone(),
            is_rush: lines.is_rush,
            include_custom_design: lines.include_custom_design,
            custom_design_fee_cents: analytics.custom_design_fee_cents,
            quote_total_cents: analytics.total_cents,
            analytics,
            quote_published,
            published_at,
        }
    }

    /// Reconstructs editable lines from the stored record.
    pub fn lines(&self) -> QuoteLines {
        QuoteLines {
            centerstone: self.centerstone.clone(),
            mounting: self.mounting.clone(),
            accent_stones: self.accent_stones.clone(),
            additional_materials: self.additional_materials.clone(),
            labor_tasks: self.labor_tasks.clone(),
            shipping_costs: self.shipping_costs.clone(),
            is_rush: self.is_rush,
            include_custom_design: self.include_custom_design,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::analytics::compute_analytics;
    use atelier_core::settings::FinancialSettings;

    fn sample_lines() -> QuoteLines {
        let mut lines = QuoteLines::new();
        lines.set_centerstone("1ct diamond", "1000");
        lines.add_labor_task("Setting", "150", 1);
        lines.include_custom_design = true;
        lines
    }

    #[test]
    fn test_assemble_and_reconstruct_round_trip() {
        let lines = sample_lines();
        let analytics = compute_analytics(&lines, &FinancialSettings::default());

        let record = QuoteRecord::assemble(&lines, analytics, false, None);
        assert_eq!(record.quote_total_cents, analytics.total_cents);
        assert_eq!(record.custom_design_fee_cents, 10_000);
        assert_eq!(record.lines(), lines);
    }

    #[test]
    fn test_serde_field_names() {
        let lines = sample_lines();
        let analytics = compute_analytics(&lines, &FinancialSettings::default());
        let record = QuoteRecord::assemble(&lines, analytics, true, Some(Utc::now()));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["quotePublished"], true);
        assert!(json.get("publishedAt").is_some());
        assert!(json.get("quoteTotalCents").is_some());
        assert!(json.get("laborTasks").is_some());
    }
}

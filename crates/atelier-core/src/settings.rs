//! # Financial Settings
//!
//! The financial configuration a quote is priced against.
//!
//! ## Settings Sources (Priority Order)
//! 1. `financial.*` fields of the admin settings document
//! 2. Legacy `pricing.*` fields (older tenants still carry these)
//! 3. Fixed defaults (this file, via crate constants)
//!
//! Each field falls back independently, so a partially-populated document
//! contributes the fields it has. The settings value is loaded once per
//! editing session and passed into the calculator explicitly - there is no
//! ambient settings state anywhere in this workspace.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::money::{dollars_to_cents, Money, Rate};
use crate::{
    DEFAULT_COMMISSION_BPS, DEFAULT_CUSTOM_DESIGN_FEE_CENTS, DEFAULT_MATERIAL_MARKUP_BPS,
    DEFAULT_RUSH_MULTIPLIER_BPS,
};

// =============================================================================
// Financial Settings
// =============================================================================

/// Financial configuration for quote analytics.
///
/// ## Fields
/// All rates are basis points; all amounts are cents. `hourly_wage_cents`
/// is carried for the wider back office (task time estimates) and is not
/// read by the quote calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSettings {
    /// Flat CAD design fee in cents, applied when a quote includes
    /// custom design work.
    pub custom_design_fee_cents: i64,

    /// Sales commission on gross profit.
    pub commission: Rate,

    /// Markup applied to material cost (10000 bps doubles it).
    pub material_markup: Rate,

    /// Rush order multiplier (15000 bps = ×1.5).
    pub rush_multiplier: Rate,

    /// Bench jeweler hourly wage in cents. Not used by the calculator.
    pub hourly_wage_cents: i64,
}

impl FinancialSettings {
    /// Builds settings from the admin settings document.
    ///
    /// Reads `financial.*` first, tolerates the legacy `pricing.*` fields
    /// as secondary sources, and falls back to the fixed defaults for
    /// anything missing or non-numeric.
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::settings::FinancialSettings;
    /// use serde_json::json;
    ///
    /// let doc = json!({ "financial": { "commissionPercentage": 0.15 } });
    /// let settings = FinancialSettings::from_document(&doc);
    ///
    /// assert_eq!(settings.commission.bps(), 1500);
    /// // Everything else keeps its default.
    /// assert_eq!(settings.material_markup.bps(), 10_000);
    /// ```
    pub fn from_document(doc: &Value) -> Self {
        let financial = doc.get("financial");
        let legacy = doc.get("pricing");

        let defaults = FinancialSettings::default();

        FinancialSettings {
            custom_design_fee_cents: field(financial, "customDesignFee")
                .map(dollars_to_cents)
                .unwrap_or(defaults.custom_design_fee_cents),
            commission: field(financial, "commissionPercentage")
                .map(Rate::from_fraction)
                .unwrap_or(defaults.commission),
            material_markup: field(financial, "materialMarkupPercentage")
                .or_else(|| field(legacy, "materialMarkup"))
                .map(Rate::from_fraction)
                .unwrap_or(defaults.material_markup),
            rush_multiplier: field(financial, "rushMultiplier")
                .or_else(|| field(legacy, "rushMultiplier"))
                .map(Rate::from_fraction)
                .unwrap_or(defaults.rush_multiplier),
            hourly_wage_cents: field(financial, "wage")
                .or_else(|| field(legacy, "wage"))
                .map(dollars_to_cents)
                .unwrap_or(defaults.hourly_wage_cents),
        }
    }

    /// The design fee as Money.
    #[inline]
    pub fn custom_design_fee(&self) -> Money {
        Money::from_cents(self.custom_design_fee_cents)
    }

    /// The hourly wage as Money.
    #[inline]
    pub fn hourly_wage(&self) -> Money {
        Money::from_cents(self.hourly_wage_cents)
    }
}

impl Default for FinancialSettings {
    /// The fixed defaults: $100.00 design fee, 10% commission, 100%
    /// material markup (doubling), ×1.5 rush multiplier.
    fn default() -> Self {
        FinancialSettings {
            custom_design_fee_cents: DEFAULT_CUSTOM_DESIGN_FEE_CENTS,
            commission: Rate::from_bps(DEFAULT_COMMISSION_BPS),
            material_markup: Rate::from_bps(DEFAULT_MATERIAL_MARKUP_BPS),
            rush_multiplier: Rate::from_bps(DEFAULT_RUSH_MULTIPLIER_BPS),
            hourly_wage_cents: 0,
        }
    }
}

/// Reads a finite, non-negative numeric field from an optional section.
fn field(section: Option<&Value>, name: &str) -> Option<f64> {
    section?
        .get(name)?
        .as_f64()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = FinancialSettings::default();
        assert_eq!(settings.custom_design_fee_cents, 10_000);
        assert_eq!(settings.commission.bps(), 1_000);
        assert_eq!(settings.material_markup.bps(), 10_000);
        assert_eq!(settings.rush_multiplier.bps(), 15_000);
        assert_eq!(settings.hourly_wage_cents, 0);
    }

    #[test]
    fn test_from_document_full() {
        let doc = json!({
            "financial": {
                "customDesignFee": 150.0,
                "commissionPercentage": 0.12,
                "materialMarkupPercentage": 0.30,
                "rushMultiplier": 2.0,
            }
        });

        let settings = FinancialSettings::from_document(&doc);
        assert_eq!(settings.custom_design_fee_cents, 15_000);
        assert_eq!(settings.commission.bps(), 1_200);
        assert_eq!(settings.material_markup.bps(), 3_000);
        assert_eq!(settings.rush_multiplier.bps(), 20_000);
    }

    #[test]
    fn test_from_document_partial_falls_back_per_field() {
        let doc = json!({ "financial": { "customDesignFee": 75.5 } });

        let settings = FinancialSettings::from_document(&doc);
        assert_eq!(settings.custom_design_fee_cents, 7_550);
        assert_eq!(settings.commission.bps(), 1_000);
        assert_eq!(settings.material_markup.bps(), 10_000);
        assert_eq!(settings.rush_multiplier.bps(), 15_000);
    }

    #[test]
    fn test_from_document_legacy_pricing_fields() {
        let doc = json!({
            "pricing": {
                "wage": 35.0,
                "materialMarkup": 0.40,
                "deliveryFee": 15.0,
                "rushMultiplier": 1.25,
            }
        });

        let settings = FinancialSettings::from_document(&doc);
        assert_eq!(settings.material_markup.bps(), 4_000);
        assert_eq!(settings.rush_multiplier.bps(), 12_500);
        assert_eq!(settings.hourly_wage_cents, 3_500);
        // Fields with no legacy counterpart keep their defaults.
        assert_eq!(settings.custom_design_fee_cents, 10_000);
        assert_eq!(settings.commission.bps(), 1_000);
    }

    #[test]
    fn test_financial_section_wins_over_legacy() {
        let doc = json!({
            "financial": { "materialMarkupPercentage": 0.30 },
            "pricing": { "materialMarkup": 0.90 },
        });

        let settings = FinancialSettings::from_document(&doc);
        assert_eq!(settings.material_markup.bps(), 3_000);
    }

    #[test]
    fn test_non_numeric_fields_fall_back() {
        let doc = json!({
            "financial": {
                "customDesignFee": "one hundred",
                "commissionPercentage": -0.5,
            }
        });

        let settings = FinancialSettings::from_document(&doc);
        assert_eq!(settings.custom_design_fee_cents, 10_000);
        assert_eq!(settings.commission.bps(), 1_000);
    }

    #[test]
    fn test_empty_document_is_all_defaults() {
        assert_eq!(
            FinancialSettings::from_document(&json!({})),
            FinancialSettings::default()
        );
    }
}

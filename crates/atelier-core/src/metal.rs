//! # Metal Context Model
//!
//! Enumerates the metal/purity combinations an item can be priced in.
//!
//! ## Key Space
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Supported Metal Contexts                            │
//! │                                                                         │
//! │  gold       → 10k, 14k, 18k, 22k        platinum  → 900, 950           │
//! │  silver     → sterling, fine            palladium → 500, 950           │
//! │  titanium   → grade1, grade2            stainless → 316l, 904l         │
//! │                                                                         │
//! │  Canonical key: lower-case "{metal}_{purity}", e.g. "gold_14k"         │
//! │  Parsing and comparison are case-insensitive.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A [`MetalKey`] is never partially valid: every constructor checks that
//! the purity belongs to the metal's set, all-or-nothing. Enumeration order
//! is declaration order (metal order, then purity order per metal) and is
//! the canonical ordering used by breakdown sorts.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::MetalError;

// =============================================================================
// Metal Type
// =============================================================================

/// The fixed enumeration of priceable metals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum MetalType {
    Gold,
    Silver,
    Platinum,
    Palladium,
    Titanium,
    Stainless,
}

impl MetalType {
    /// All metal types, in enumeration order.
    pub const ALL: [MetalType; 6] = [
        MetalType::Gold,
        MetalType::Silver,
        MetalType::Platinum,
        MetalType::Palladium,
        MetalType::Titanium,
        MetalType::Stainless,
    ];

    /// Canonical lower-case identifier, the left half of a metal key.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MetalType::Gold => "gold",
            MetalType::Silver => "silver",
            MetalType::Platinum => "platinum",
            MetalType::Palladium => "palladium",
            MetalType::Titanium => "titanium",
            MetalType::Stainless => "stainless",
        }
    }

    /// Human label, e.g. "Stainless Steel".
    pub const fn display_name(&self) -> &'static str {
        match self {
            MetalType::Gold => "Gold",
            MetalType::Silver => "Silver",
            MetalType::Platinum => "Platinum",
            MetalType::Palladium => "Palladium",
            MetalType::Titanium => "Titanium",
            MetalType::Stainless => "Stainless Steel",
        }
    }

    /// The purity set valid for this metal, in enumeration order.
    pub const fn purities(&self) -> &'static [Purity] {
        match self {
            MetalType::Gold => &[Purity::K10, Purity::K14, Purity::K18, Purity::K22],
            MetalType::Silver => &[Purity::Sterling, Purity::Fine],
            MetalType::Platinum => &[Purity::Pt900, Purity::Pt950],
            MetalType::Palladium => &[Purity::Pd500, Purity::Pd950],
            MetalType::Titanium => &[Purity::Grade1, Purity::Grade2],
            MetalType::Stainless => &[Purity::Ss316L, Purity::Ss904L],
        }
    }

    /// Parses a metal type, case-insensitive and trimmed.
    pub fn parse(raw: &str) -> Result<MetalType, MetalError> {
        let raw = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| MetalError::UnknownMetal(raw.to_string()))
    }
}

impl fmt::Display for MetalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Purity
// =============================================================================

/// Karat or fineness grade. One variant per (metal, grade) pair, so
/// platinum 950 and palladium 950 stay distinct values even though they
/// share the canonical string "950".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Purity {
    // Gold karats
    K10,
    K14,
    K18,
    K22,
    // Silver grades
    Sterling,
    Fine,
    // Platinum fineness
    Pt900,
    Pt950,
    // Palladium fineness
    Pd500,
    Pd950,
    // Titanium grades
    Grade1,
    Grade2,
    // Stainless alloys
    Ss316L,
    Ss904L,
}

impl Purity {
    /// Canonical lower-case identifier, the right half of a metal key.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Purity::K10 => "10k",
            Purity::K14 => "14k",
            Purity::K18 => "18k",
            Purity::K22 => "22k",
            Purity::Sterling => "sterling",
            Purity::Fine => "fine",
            Purity::Pt900 => "900",
            Purity::Pt950 => "950",
            Purity::Pd500 => "500",
            Purity::Pd950 => "950",
            Purity::Grade1 => "grade1",
            Purity::Grade2 => "grade2",
            Purity::Ss316L => "316l",
            Purity::Ss904L => "904l",
        }
    }

    /// Human label, e.g. "14K", "Sterling", "Grade 1", "316L".
    pub const fn label(&self) -> &'static str {
        match self {
            Purity::K10 => "10K",
            Purity::K14 => "14K",
            Purity::K18 => "18K",
            Purity::K22 => "22K",
            Purity::Sterling => "Sterling",
            Purity::Fine => "Fine",
            Purity::Pt900 => "900",
            Purity::Pt950 => "950",
            Purity::Pd500 => "500",
            Purity::Pd950 => "950",
            Purity::Grade1 => "Grade 1",
            Purity::Grade2 => "Grade 2",
            Purity::Ss316L => "316L",
            Purity::Ss904L => "904L",
        }
    }

    /// Finds this purity within a metal's set, case-insensitive.
    ///
    /// Resolution is always metal-scoped: "950" resolves to `Pt950` under
    /// platinum and `Pd950` under palladium.
    fn parse_for(metal: MetalType, raw: &str) -> Option<Purity> {
        let raw = raw.trim();
        metal
            .purities()
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for Purity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Metal Key
// =============================================================================

/// A validated (metal type, purity) pair - the identity of a priceable
/// metal variant.
///
/// Fields are private: the only way to obtain a `MetalKey` is through a
/// constructor that validated the pair. Serializes as the canonical
/// `"{metal}_{purity}"` string.
///
/// ## Example
/// ```rust
/// use atelier_core::metal::{MetalKey, MetalType, Purity};
///
/// let key = MetalKey::from_parts("Gold", "14K").unwrap();
/// assert_eq!(key.key(), "gold_14k");
/// assert_eq!(key.metal_type(), MetalType::Gold);
/// assert_eq!(key.purity(), Purity::K14);
/// assert_eq!(MetalKey::parse("gold_14k").unwrap(), key);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MetalKey {
    metal_type: MetalType,
    purity: Purity,
}

impl MetalKey {
    /// Creates a key from typed parts, validating purity membership.
    pub fn new(metal_type: MetalType, purity: Purity) -> Result<MetalKey, MetalError> {
        if metal_type.purities().contains(&purity) {
            Ok(MetalKey { metal_type, purity })
        } else {
            Err(MetalError::UnsupportedPurity {
                metal: metal_type,
                purity: purity.as_str().to_string(),
            })
        }
    }

    /// Creates a key from raw strings, e.g. `("gold", "14k")`.
    ///
    /// Lower-cases both inputs and validates the purity against the
    /// metal's set.
    pub fn from_parts(metal: &str, purity: &str) -> Result<MetalKey, MetalError> {
        let metal_type = MetalType::parse(metal)?;
        let parsed =
            Purity::parse_for(metal_type, purity).ok_or_else(|| MetalError::UnsupportedPurity {
                metal: metal_type,
                purity: purity.trim().to_lowercase(),
            })?;
        Ok(MetalKey {
            metal_type,
            purity: parsed,
        })
    }

    /// Parses a canonical `"{metal}_{purity}"` key.
    ///
    /// The key must split on `_` into exactly two non-empty segments;
    /// anything else is [`MetalError::MalformedKey`]. The segments then
    /// follow the [`MetalKey::from_parts`] rules.
    pub fn parse(key: &str) -> Result<MetalKey, MetalError> {
        let trimmed = key.trim();
        let segments: Vec<&str> = trimmed.split('_').collect();
        match segments.as_slice() {
            [metal, purity] if !metal.is_empty() && !purity.is_empty() => {
                MetalKey::from_parts(metal, purity)
            }
            _ => Err(MetalError::MalformedKey(trimmed.to_string())),
        }
    }

    /// The metal type half of the key.
    #[inline]
    pub const fn metal_type(&self) -> MetalType {
        self.metal_type
    }

    /// The purity half of the key.
    #[inline]
    pub const fn purity(&self) -> Purity {
        self.purity
    }

    /// Canonical serialized form, e.g. `"gold_14k"`.
    pub fn key(&self) -> String {
        format!("{}_{}", self.metal_type.as_str(), self.purity.as_str())
    }

    /// Human label, e.g. "Gold 14K".
    pub fn display_name(&self) -> String {
        format!("{} {}", self.metal_type.display_name(), self.purity.label())
    }

    /// Position within the canonical enumeration (metal order, then purity
    /// order per metal). Used for deterministic breakdown ordering.
    pub(crate) fn ordinal(&self) -> usize {
        let mut index = 0;
        for metal in MetalType::ALL {
            for purity in metal.purities() {
                if metal == self.metal_type && *purity == self.purity {
                    return index;
                }
                index += 1;
            }
        }
        index
    }
}

impl fmt::Display for MetalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.metal_type.as_str(), self.purity.as_str())
    }
}

impl From<MetalKey> for String {
    fn from(key: MetalKey) -> String {
        key.key()
    }
}

impl TryFrom<String> for MetalKey {
    type Error = MetalError;

    fn try_from(raw: String) -> Result<MetalKey, MetalError> {
        MetalKey::parse(&raw)
    }
}

// =============================================================================
// Enumeration Helpers
// =============================================================================

/// One row of the supported-metals cross-product, UI-ready.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SupportedMetal {
    /// Metal type identifier.
    pub metal_type: MetalType,

    /// Canonical purity string, e.g. "14k".
    pub purity: String,

    /// Canonical key, e.g. "gold_14k".
    pub key: String,

    /// Human label, e.g. "Gold 14K".
    pub display_name: String,
}

/// The full cross-product of supported (metal, purity) pairs, in
/// enumeration order.
pub fn all_supported() -> Vec<SupportedMetal> {
    MetalType::ALL
        .iter()
        .flat_map(|metal| {
            metal.purities().iter().map(|purity| {
                let key = MetalKey {
                    metal_type: *metal,
                    purity: *purity,
                };
                SupportedMetal {
                    metal_type: *metal,
                    purity: purity.as_str().to_string(),
                    key: key.key(),
                    display_name: key.display_name(),
                }
            })
        })
        .collect()
}

/// The purity set for a metal, in enumeration order.
pub fn supported_purities(metal_type: MetalType) -> &'static [Purity] {
    metal_type.purities()
}

/// Whether a raw (metal, purity) pair names a supported context.
///
/// Never fails - validation errors collapse to `false`.
pub fn is_supported(metal: &str, purity: &str) -> bool {
    MetalKey::from_parts(metal, purity).is_ok()
}

/// Human label for a raw (metal, purity) pair.
///
/// Unknown pairs fall back to the title-cased raw strings rather than
/// failing, so display code never has to handle an error.
///
/// ## Example
/// ```rust
/// use atelier_core::metal::display_label;
///
/// assert_eq!(display_label("gold", "14k"), "Gold 14K");
/// assert_eq!(display_label("osmium", "9k"), "Osmium 9k");
/// ```
pub fn display_label(metal: &str, purity: &str) -> String {
    match MetalKey::from_parts(metal, purity) {
        Ok(key) => key.display_name(),
        Err(_) => format!("{} {}", title_case(metal), purity.trim()),
    }
}

/// Upper-cases the first character, leaving the rest untouched.
fn title_case(raw: &str) -> String {
    let raw = raw.trim();
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_full_cross_product() {
        for supported in all_supported() {
            let parsed = MetalKey::parse(&supported.key).unwrap();
            assert_eq!(parsed.metal_type(), supported.metal_type);
            assert_eq!(parsed.purity().as_str(), supported.purity);
            assert_eq!(parsed.key(), supported.key);
        }
    }

    #[test]
    fn test_cross_product_size_and_order() {
        let all = all_supported();
        assert_eq!(all.len(), 14);

        // Declaration order: metal order, then purity order per metal.
        assert_eq!(all[0].key, "gold_10k");
        assert_eq!(all[3].key, "gold_22k");
        assert_eq!(all[4].key, "silver_sterling");
        assert_eq!(all[13].key, "stainless_904l");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let key = MetalKey::parse("GOLD_14K").unwrap();
        assert_eq!(key.key(), "gold_14k");

        assert!(is_supported("Platinum", "950"));
        assert!(is_supported("  silver ", "STERLING"));
    }

    #[test]
    fn test_parse_malformed_keys() {
        for bad in ["", "gold", "gold_", "_14k", "gold_14k_extra", "gold-14k"] {
            assert!(
                matches!(MetalKey::parse(bad), Err(MetalError::MalformedKey(_))),
                "expected MalformedKey for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_parse_unknown_metal_and_purity() {
        assert!(matches!(
            MetalKey::parse("osmium_950"),
            Err(MetalError::UnknownMetal(_))
        ));
        assert!(matches!(
            MetalKey::parse("gold_950"),
            Err(MetalError::UnsupportedPurity { .. })
        ));
        // 950 belongs to platinum and palladium, not silver.
        assert!(matches!(
            MetalKey::from_parts("silver", "950"),
            Err(MetalError::UnsupportedPurity { .. })
        ));
    }

    #[test]
    fn test_shared_fineness_stays_metal_scoped() {
        let platinum = MetalKey::from_parts("platinum", "950").unwrap();
        let palladium = MetalKey::from_parts("palladium", "950").unwrap();

        assert_eq!(platinum.purity(), Purity::Pt950);
        assert_eq!(palladium.purity(), Purity::Pd950);
        assert_ne!(platinum, palladium);
    }

    #[test]
    fn test_supported_purities_per_metal() {
        assert_eq!(
            supported_purities(MetalType::Gold),
            &[Purity::K10, Purity::K14, Purity::K18, Purity::K22]
        );
        assert_eq!(
            supported_purities(MetalType::Palladium),
            &[Purity::Pd500, Purity::Pd950]
        );
    }

    #[test]
    fn test_is_supported_never_panics() {
        assert!(is_supported("gold", "14k"));
        assert!(!is_supported("gold", "950"));
        assert!(!is_supported("osmium", "950"));
        assert!(!is_supported("", ""));
        assert!(!is_supported("gold_14k", ""));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(
            MetalKey::parse("gold_14k").unwrap().display_name(),
            "Gold 14K"
        );
        assert_eq!(
            MetalKey::parse("stainless_316l").unwrap().display_name(),
            "Stainless Steel 316L"
        );
        assert_eq!(
            MetalKey::parse("titanium_grade2").unwrap().display_name(),
            "Titanium Grade 2"
        );
    }

    #[test]
    fn test_display_label_fallback() {
        assert_eq!(display_label("silver", "fine"), "Silver Fine");
        // Unknown inputs fall back to the raw strings.
        assert_eq!(display_label("osmium", "9k"), "Osmium 9k");
        assert_eq!(display_label("gold", "9k"), "Gold 9k");
    }

    #[test]
    fn test_serde_string_form() {
        let key = MetalKey::parse("palladium_500").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"palladium_500\"");

        let back: MetalKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);

        assert!(serde_json::from_str::<MetalKey>("\"gold_950\"").is_err());
    }

    #[test]
    fn test_ordinal_matches_enumeration_order() {
        let all = all_supported();
        for (index, supported) in all.iter().enumerate() {
            let key = MetalKey::parse(&supported.key).unwrap();
            assert_eq!(key.ordinal(), index);
        }
    }
}

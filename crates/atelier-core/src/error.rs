//! # Error Types
//!
//! Domain-specific error types for atelier-core.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MetalError (this file)                                                 │
//! │       │                                                                 │
//! │       ├── Caught at the pricing boundary → None / "N/A" for display    │
//! │       │   (price_for, is_supported never propagate it)                 │
//! │       │                                                                 │
//! │       └── Propagated only where the caller asked for a specific key    │
//! │           (MetalKey::parse, MetalKey::from_parts)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Numeric coercion never produces an error anywhere in this crate:
//! malformed cost input becomes zero (see [`crate::money::to_money`]).

use thiserror::Error;

use crate::metal::MetalType;

// =============================================================================
// Metal Context Errors
// =============================================================================

/// Failures when naming a metal/purity combination.
///
/// `UnknownMetal` and `UnsupportedPurity` cover invalid metal contexts;
/// `MalformedKey` covers strings that are not even shaped like a key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetalError {
    /// Metal type is not part of the supported enumeration.
    #[error("Unknown metal type: {0}")]
    UnknownMetal(String),

    /// Purity exists as a string but is not valid for this metal type.
    ///
    /// ## When This Occurs
    /// - "gold_950" (950 is a platinum/palladium fineness)
    /// - "silver_14k" (karats are gold-only)
    #[error("Purity '{purity}' is not offered for {metal}")]
    UnsupportedPurity { metal: MetalType, purity: String },

    /// Key does not split into exactly two non-empty `_` segments.
    #[error("Malformed metal key: '{0}'")]
    MalformedKey(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with MetalError.
pub type CoreResult<T> = Result<T, MetalError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MetalError::UnknownMetal("osmium".to_string());
        assert_eq!(err.to_string(), "Unknown metal type: osmium");

        let err = MetalError::UnsupportedPurity {
            metal: MetalType::Silver,
            purity: "14k".to_string(),
        };
        assert_eq!(err.to_string(), "Purity '14k' is not offered for silver");

        let err = MetalError::MalformedKey("gold-14k".to_string());
        assert_eq!(err.to_string(), "Malformed metal key: 'gold-14k'");
    }
}

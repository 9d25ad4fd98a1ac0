//! # Collaborator Seams
//!
//! The three external interfaces the workflow depends on, as traits. The
//! host application implements them against its remote store; tests use
//! in-memory implementations.
//!
//! ## Failure Posture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SettingsSource   fetch fails → warn! + fixed defaults (non-fatal)      │
//! │  QuoteStore       update fails → surfaced to the caller (no retry)      │
//! │  PublishNotifier  notify fails → warn! only (fire-and-forget)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! At most one attempt is made per call; whether to retry a failed save
//! is the caller's decision.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use ts_rs::TS;

use atelier_core::money::Money;
use atelier_core::settings::FinancialSettings;

use crate::error::CollaboratorError;
use crate::record::QuoteRecord;

// =============================================================================
// Settings Source
// =============================================================================

/// Read-only access to the admin settings document.
pub trait SettingsSource {
    /// Fetches the raw settings document.
    async fn fetch_settings(&self) -> Result<Value, CollaboratorError>;
}

/// Loads financial settings for an editing session.
///
/// Called once on session start. A fetch failure is non-fatal: the fixed
/// defaults are used and the failure is logged.
pub async fn load_financial_settings<S: SettingsSource>(source: &S) -> FinancialSettings {
    match source.fetch_settings().await {
        Ok(doc) => {
            debug!("Financial settings loaded");
            FinancialSettings::from_document(&doc)
        }
        Err(err) => {
            warn!(error = %err, "Settings fetch failed, falling back to defaults");
            FinancialSettings::default()
        }
    }
}

// =============================================================================
// Quote Store
// =============================================================================

/// Acknowledgement from an update-by-id call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    /// Whether the store applied the update.
    pub success: bool,
}

/// Read/update-by-id access to persisted quote records.
pub trait QuoteStore {
    /// Fetches the stored quote for a ticket, if any.
    async fn fetch_quote(&self, ticket_id: &str) -> Result<Option<QuoteRecord>, CollaboratorError>;

    /// Replaces the stored quote for a ticket.
    async fn update_quote(
        &self,
        ticket_id: &str,
        record: &QuoteRecord,
    ) -> Result<UpdateAck, CollaboratorError>;
}

// =============================================================================
// Publish Notifier
// =============================================================================

/// Outbound notification that a quote went live.
///
/// Fire-and-forget: the workflow logs a failure and moves on. Publication
/// is the source of truth; the notification is a courtesy.
pub trait PublishNotifier {
    /// Announces the newly published total for a ticket.
    async fn quote_published(
        &self,
        ticket_id: &str,
        quote_total: Money,
    ) -> Result<(), CollaboratorError>;
}

/// No-op notifier for tests and headless tooling.
pub struct NoOpNotifier;

impl PublishNotifier for NoOpNotifier {
    async fn quote_published(
        &self,
        _ticket_id: &str,
        _quote_total: Money,
    ) -> Result<(), CollaboratorError> {
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StaticSettings(Value);

    impl SettingsSource for StaticSettings {
        async fn fetch_settings(&self) -> Result<Value, CollaboratorError> {
            Ok(self.0.clone())
        }
    }

    struct UnreachableSettings;

    impl SettingsSource for UnreachableSettings {
        async fn fetch_settings(&self) -> Result<Value, CollaboratorError> {
            Err(CollaboratorError::RequestFailed("503".to_string()))
        }
    }

    #[tokio::test]
    async fn test_load_settings_from_document() {
        let source = StaticSettings(json!({
            "financial": { "commissionPercentage": 0.2, "customDesignFee": 250.0 }
        }));

        let settings = load_financial_settings(&source).await;
        assert_eq!(settings.commission.bps(), 2_000);
        assert_eq!(settings.custom_design_fee_cents, 25_000);
        // Unlisted fields keep their defaults.
        assert_eq!(settings.rush_multiplier.bps(), 15_000);
    }

    #[tokio::test]
    async fn test_load_settings_falls_back_on_failure() {
        let settings = load_financial_settings(&UnreachableSettings).await;
        assert_eq!(settings, FinancialSettings::default());
    }

    #[tokio::test]
    async fn test_noop_notifier_accepts_everything() {
        let result = NoOpNotifier
            .quote_published("TCK-1", Money::from_cents(113_500))
            .await;
        assert!(result.is_ok());
    }
}

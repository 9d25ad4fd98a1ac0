//! # Quote Editing Session
//!
//! One session owns one ticket's quote lines exclusively (single-writer by
//! design - there is no optimistic-concurrency check against the store).
//! Analytics are recomputed from the current lines at every save, never
//! cached or patched.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use atelier_core::analytics::{compute_analytics, QuoteAnalytics};
use atelier_core::quote::QuoteLines;
use atelier_core::settings::FinancialSettings;

use crate::collaborators::{PublishNotifier, QuoteStore};
use crate::error::{WorkflowError, WorkflowResult};
use crate::record::QuoteRecord;

// =============================================================================
// Quote Session
// =============================================================================

/// An editing session for one ticket's quote.
///
/// Generic over the store and notifier so hosts and tests plug in their
/// own collaborators.
pub struct QuoteSession<S: QuoteStore, N: PublishNotifier> {
    ticket_id: String,

    /// The itemized quote state. Mutate through [`QuoteLines`]'s explicit
    /// update methods, then `save`.
    pub lines: QuoteLines,

    settings: FinancialSettings,
    published: bool,
    published_at: Option<DateTime<Utc>>,
    store: S,
    notifier: N,
}

impl<S: QuoteStore, N: PublishNotifier> QuoteSession<S, N> {
    /// Starts a fresh session with empty lines.
    pub fn new(
        ticket_id: impl Into<String>,
        settings: FinancialSettings,
        store: S,
        notifier: N,
    ) -> Self {
        QuoteSession {
            ticket_id: ticket_id.into(),
            lines: QuoteLines::new(),
            settings,
            published: false,
            published_at: None,
            store,
            notifier,
        }
    }

    /// Opens a session, resuming the stored quote when one exists.
    pub async fn open(
        ticket_id: impl Into<String>,
        settings: FinancialSettings,
        store: S,
        notifier: N,
    ) -> WorkflowResult<Self> {
        let ticket_id = ticket_id.into();
        let stored = store.fetch_quote(&ticket_id).await?;

        let mut session = QuoteSession::new(ticket_id, settings, store, notifier);
        if let Some(record) = stored {
            debug!(ticket_id = %session.ticket_id, "Resuming stored quote");
            session.lines = record.lines();
            session.published = record.quote_published;
            session.published_at = record.published_at;
        }
        Ok(session)
    }

    /// The ticket this session edits.
    pub fn ticket_id(&self) -> &str {
        &self.ticket_id
    }

    /// The settings the session was opened with.
    pub fn settings(&self) -> &FinancialSettings {
        &self.settings
    }

    /// Whether the quote is currently visible to the client.
    pub fn is_published(&self) -> bool {
        self.published
    }

    /// When the quote was last published.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    /// Analytics for the lines as they stand right now.
    ///
    /// Recomputed on every call; the figures always reflect the most
    /// recently entered values.
    pub fn analytics(&self) -> QuoteAnalytics {
        compute_analytics(&self.lines, &self.settings)
    }

    /// Persists the current lines and their analytics.
    ///
    /// Always legal; the publication flag is not altered. Saving twice
    /// with identical lines persists identical analytics.
    pub async fn save(&self) -> WorkflowResult<QuoteAnalytics> {
        let analytics = self.persist().await?;
        debug!(ticket_id = %self.ticket_id, total = %analytics.total(), "Quote saved");
        Ok(analytics)
    }

    /// Publishes the quote: persists it with `quote_published = true` and
    /// a fresh `published_at`, then notifies the collaborator.
    ///
    /// Refused outright when the total is not positive - a zero-value
    /// quote must not reach the client. A store failure restores the
    /// prior publication state; a notification failure is only logged.
    pub async fn publish(&mut self) -> WorkflowResult<QuoteAnalytics> {
        if !self.analytics().total().is_positive() {
            return Err(WorkflowError::NothingToPublish);
        }

        let previous = (self.published, self.published_at);
        self.published = true;
        self.published_at = Some(Utc::now());

        let analytics = match self.persist().await {
            Ok(analytics) => analytics,
            Err(err) => {
                (self.published, self.published_at) = previous;
                return Err(err);
            }
        };

        info!(ticket_id = %self.ticket_id, total = %analytics.total(), "Quote published");

        if let Err(err) = self
            .notifier
            .quote_published(&self.ticket_id, analytics.total())
            .await
        {
            // Publication already happened; the notification is courtesy.
            warn!(ticket_id = %self.ticket_id, error = %err, "Publish notification failed");
        }

        Ok(analytics)
    }

    /// Withdraws the quote: persists it with the flag cleared and the
    /// timestamp dropped. Quote content is untouched.
    pub async fn unpublish(&mut self) -> WorkflowResult<QuoteAnalytics> {
        let previous = (self.published, self.published_at);
        self.published = false;
        self.published_at = None;

        match self.persist().await {
            Ok(analytics) => {
                info!(ticket_id = %self.ticket_id, "Quote unpublished");
                Ok(analytics)
            }
            Err(err) => {
                (self.published, self.published_at) = previous;
                Err(err)
            }
        }
    }

    /// Computes analytics from the current lines and writes the assembled
    /// record through the store. One attempt, no retry.
    async fn persist(&self) -> WorkflowResult<QuoteAnalytics> {
        let analytics = self.analytics();
        let record =
            QuoteRecord::assemble(&self.lines, analytics, self.published, self.published_at);

        let ack = self.store.update_quote(&self.ticket_id, &record).await?;
        if !ack.success {
            return Err(WorkflowError::UpdateRejected(self.ticket_id.clone()));
        }

        Ok(analytics)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use atelier_core::money::Money;

    use crate::collaborators::{NoOpNotifier, UpdateAck};
    use crate::error::CollaboratorError;

    /// In-memory store shared between a session and its test.
    #[derive(Clone, Default)]
    struct MemoryStore {
        records: Arc<Mutex<HashMap<String, QuoteRecord>>>,
        update_count: Arc<Mutex<usize>>,
    }

    impl MemoryStore {
        fn stored(&self, ticket_id: &str) -> Option<QuoteRecord> {
            self.records.lock().unwrap().get(ticket_id).cloned()
        }

        fn updates(&self) -> usize {
            *self.update_count.lock().unwrap()
        }
    }

    impl QuoteStore for MemoryStore {
        async fn fetch_quote(
            &self,
            ticket_id: &str,
        ) -> Result<Option<QuoteRecord>, CollaboratorError> {
            Ok(self.records.lock().unwrap().get(ticket_id).cloned())
        }

        async fn update_quote(
            &self,
            ticket_id: &str,
            record: &QuoteRecord,
        ) -> Result<UpdateAck, CollaboratorError> {
            *self.update_count.lock().unwrap() += 1;
            self.records
                .lock()
                .unwrap()
                .insert(ticket_id.to_string(), record.clone());
            Ok(UpdateAck { success: true })
        }
    }

    /// Store whose update call always fails at the transport level.
    #[derive(Clone, Default)]
    struct UnreachableStore;

    impl QuoteStore for UnreachableStore {
        async fn fetch_quote(
            &self,
            _ticket_id: &str,
        ) -> Result<Option<QuoteRecord>, CollaboratorError> {
            Ok(None)
        }

        async fn update_quote(
            &self,
            _ticket_id: &str,
            _record: &QuoteRecord,
        ) -> Result<UpdateAck, CollaboratorError> {
            Err(CollaboratorError::RequestFailed("timeout".to_string()))
        }
    }

    /// Store that answers but refuses the update.
    #[derive(Clone, Default)]
    struct RejectingStore;

    impl QuoteStore for RejectingStore {
        async fn fetch_quote(
            &self,
            _ticket_id: &str,
        ) -> Result<Option<QuoteRecord>, CollaboratorError> {
            Ok(None)
        }

        async fn update_quote(
            &self,
            _ticket_id: &str,
            _record: &QuoteRecord,
        ) -> Result<UpdateAck, CollaboratorError> {
            Ok(UpdateAck { success: false })
        }
    }

    /// Notifier that records calls and optionally fails.
    #[derive(Clone)]
    struct RecordingNotifier {
        calls: Arc<Mutex<Vec<(String, i64)>>>,
        fail: bool,
    }

    impl RecordingNotifier {
        fn new(fail: bool) -> Self {
            RecordingNotifier {
                calls: Arc::new(Mutex::new(Vec::new())),
                fail,
            }
        }

        fn calls(&self) -> Vec<(String, i64)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl PublishNotifier for RecordingNotifier {
        async fn quote_published(
            &self,
            ticket_id: &str,
            quote_total: Money,
        ) -> Result<(), CollaboratorError> {
            self.calls
                .lock()
                .unwrap()
                .push((ticket_id.to_string(), quote_total.cents()));
            if self.fail {
                Err(CollaboratorError::RequestFailed("502".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn priced_session<S: QuoteStore, N: PublishNotifier>(
        store: S,
        notifier: N,
    ) -> QuoteSession<S, N> {
        let mut session = QuoteSession::new(
            "TCK-104",
            FinancialSettings::default(),
            store,
            notifier,
        );
        session.lines.set_centerstone("1ct diamond", "1000");
        session.lines.add_labor_task("Setting", "150", 1);
        session
    }

    #[tokio::test]
    async fn test_save_persists_lines_and_analytics() {
        let store = MemoryStore::default();
        let session = priced_session(store.clone(), NoOpNotifier);

        let analytics = session.save().await.unwrap();

        let record = store.stored("TCK-104").unwrap();
        assert_eq!(record.quote_total_cents, analytics.total_cents);
        assert_eq!(record.analytics, analytics);
        assert_eq!(record.lines(), session.lines);
        assert!(!record.quote_published);
        assert!(record.published_at.is_none());
    }

    #[tokio::test]
    async fn test_save_is_idempotent_for_identical_lines() {
        let store = MemoryStore::default();
        let session = priced_session(store.clone(), NoOpNotifier);

        session.save().await.unwrap();
        let first = store.stored("TCK-104").unwrap();

        session.save().await.unwrap();
        let second = store.stored("TCK-104").unwrap();

        assert_eq!(first, second);
        assert_eq!(store.updates(), 2);
    }

    #[tokio::test]
    async fn test_publish_sets_flag_timestamp_and_notifies() {
        let store = MemoryStore::default();
        let notifier = RecordingNotifier::new(false);
        let mut session = priced_session(store.clone(), notifier.clone());

        let analytics = session.publish().await.unwrap();

        assert!(session.is_published());
        assert!(session.published_at().is_some());

        let record = store.stored("TCK-104").unwrap();
        assert!(record.quote_published);
        assert!(record.published_at.is_some());

        assert_eq!(
            notifier.calls(),
            vec![("TCK-104".to_string(), analytics.total_cents)]
        );
    }

    #[tokio::test]
    async fn test_publish_zero_total_is_refused() {
        let store = MemoryStore::default();
        let mut session = QuoteSession::new(
            "TCK-104",
            FinancialSettings::default(),
            store.clone(),
            NoOpNotifier,
        );

        let err = session.publish().await.unwrap_err();
        assert!(matches!(err, WorkflowError::NothingToPublish));

        // Nothing was persisted and the flag never moved.
        assert!(store.stored("TCK-104").is_none());
        assert!(!session.is_published());
    }

    #[tokio::test]
    async fn test_publish_survives_notification_failure() {
        let store = MemoryStore::default();
        let notifier = RecordingNotifier::new(true);
        let mut session = priced_session(store.clone(), notifier.clone());

        // The failed notification is logged, never surfaced.
        session.publish().await.unwrap();

        assert!(session.is_published());
        assert!(store.stored("TCK-104").unwrap().quote_published);
        assert_eq!(notifier.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_publish_store_failure_restores_state() {
        let mut session = priced_session(UnreachableStore, NoOpNotifier);

        let err = session.publish().await.unwrap_err();
        assert!(matches!(err, WorkflowError::Store(_)));

        assert!(!session.is_published());
        assert!(session.published_at().is_none());
    }

    #[tokio::test]
    async fn test_rejected_update_surfaces_error() {
        let session = priced_session(RejectingStore, NoOpNotifier);

        let err = session.save().await.unwrap_err();
        assert!(matches!(err, WorkflowError::UpdateRejected(_)));
    }

    #[tokio::test]
    async fn test_unpublish_clears_flag_and_keeps_content() {
        let store = MemoryStore::default();
        let mut session = priced_session(store.clone(), NoOpNotifier);

        let published = session.publish().await.unwrap();
        session.unpublish().await.unwrap();

        assert!(!session.is_published());
        assert!(session.published_at().is_none());

        // Publication flag is orthogonal to quote content: totals and
        // analytics are whatever the last save computed.
        let record = store.stored("TCK-104").unwrap();
        assert!(!record.quote_published);
        assert!(record.published_at.is_none());
        assert_eq!(record.quote_total_cents, published.total_cents);
        assert_eq!(record.analytics, published);
    }

    #[tokio::test]
    async fn test_open_resumes_stored_quote() {
        let store = MemoryStore::default();
        {
            let mut session = priced_session(store.clone(), NoOpNotifier);
            session.publish().await.unwrap();
        }

        let resumed = QuoteSession::open(
            "TCK-104",
            FinancialSettings::default(),
            store.clone(),
            NoOpNotifier,
        )
        .await
        .unwrap();

        assert!(resumed.is_published());
        assert!(resumed.published_at().is_some());
        assert_eq!(resumed.lines.centerstone.cost_cents, 100_000);
        assert_eq!(resumed.lines.labor_tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_open_fresh_ticket_starts_empty() {
        let session = QuoteSession::open(
            "TCK-900",
            FinancialSettings::default(),
            MemoryStore::default(),
            NoOpNotifier,
        )
        .await
        .unwrap();

        assert!(session.lines.is_empty());
        assert!(!session.is_published());
    }

    #[tokio::test]
    async fn test_analytics_track_latest_edits() {
        let mut session = priced_session(MemoryStore::default(), NoOpNotifier);
        let before = session.analytics();

        session.lines.set_centerstone("1ct diamond", "2000");
        let after = session.analytics();

        assert_ne!(before.total_cents, after.total_cents);
        assert_eq!(after.materials_at_cost_cents, 200_000);
    }
}

//! # atelier-workflow: Quote Sessions for the Atelier Back Office
//!
//! Owns the quote editing session and the publication workflow on top of
//! [`atelier_core`]'s pure pricing logic.
//!
//! ## Publication State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Quote Publication Lifecycle                         │
//! │                                                                         │
//! │              save()                    save()                           │
//! │             ┌──────┐                  ┌──────┐                          │
//! │             ▼      │                  ▼      │                          │
//! │        ┌─────────────┐   publish()  ┌─────────────┐                    │
//! │        │ UNPUBLISHED │─────────────►│  PUBLISHED  │                    │
//! │        │ (draft)     │◄─────────────│ publishedAt │                    │
//! │        └─────────────┘  unpublish() └─────────────┘                    │
//! │                                                                         │
//! │  publish() requires total > 0 and fires a best-effort notification.    │
//! │  save() never touches the flag. There is no locked/approved state -    │
//! │  approval belongs to the surrounding ticket workflow.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Collaborators
//! The settings service, the quote store, and the publish notifier are
//! traits ([`SettingsSource`], [`QuoteStore`], [`PublishNotifier`]); the
//! host application supplies the remote implementations. Sessions are
//! generic over them - no trait objects, no boxed futures.

// Collaborator traits use `async fn`; sessions take them as generic
// parameters, never as trait objects, so callers keep concrete futures.
#![allow(async_fn_in_trait)]

pub mod collaborators;
pub mod error;
pub mod record;
pub mod session;

pub use collaborators::{
    load_financial_settings, PublishNotifier, QuoteStore, SettingsSource, UpdateAck,
};
pub use error::{CollaboratorError, WorkflowError, WorkflowResult};
pub use record::QuoteRecord;
pub use session::QuoteSession;

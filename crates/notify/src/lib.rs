//! Subscriber matching and channel-routing engine for docket
//! publications.
//!
//! When a court/tribunal publication (an artefact) is created,
//! republished, or withdrawn, this crate determines who gets told and
//! how:
//!
//! - [`ArtefactBus`]: fire-and-forget ingestion boundary.
//! - [`SubscriptionMatcher`]: fans an artefact out over the stored
//!   subscription criteria (location, list type, case number, case URN).
//! - [`PermissionFilter`]: sensitivity gate for classified artefacts.
//! - [`dedup`]: subscriber-level grouping and the create-time
//!   supersede rule.
//! - [`channel`]: email vs. partner-API partition.
//! - [`RecipientResolver`]: subscriber ids to email addresses,
//!   partner channels to configured destination endpoints.
//! - [`DeliveryDispatcher`]: the seam to the external publication
//!   service, with [`HttpDispatcher`] as the production impl.
//! - [`NotificationService`]: the per-artefact pipeline orchestration.
//! - [`SubscriptionManager`]: subscribe/unsubscribe lifecycle over the
//!   store seam.
//!
//! Persistence, authorization decisions, and the actual transport of
//! emails and partner pushes are external collaborators behind traits.

pub mod accounts;
pub mod bus;
pub mod channel;
pub mod config;
pub mod dedup;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod manager;
pub mod matcher;
pub mod resolve;
pub mod service;
pub mod store;

pub use accounts::{
    AccountDirectory, AuthorizationService, OauthConfiguration, OauthRecipient,
    ThirdPartyAccount, ThirdPartyStatus,
};
pub use bus::{ArtefactBus, ArtefactEvent};
pub use config::{DispatcherConfig, PartnerTable, ThirdPartyMode};
pub use dispatch::{DeliveryDispatcher, DispatchError, HttpDispatcher, PublicationAction};
pub use error::{CollaboratorError, NotifyError};
pub use filter::PermissionFilter;
pub use manager::SubscriptionManager;
pub use matcher::SubscriptionMatcher;
pub use resolve::RecipientResolver;
pub use service::NotificationService;
pub use store::SubscriptionStore;

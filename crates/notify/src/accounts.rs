//! Account, authorization, and third-party directory seams.

use std::collections::HashMap;

use async_trait::async_trait;
use docket_core::types::SubscriberId;
use docket_core::Sensitivity;
use serde::{Deserialize, Serialize};

use crate::error::CollaboratorError;

// ---------------------------------------------------------------------------
// Third-party account records
// ---------------------------------------------------------------------------

/// Lifecycle status of a third-party (partner) account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThirdPartyStatus {
    Active,
    Suspended,
    Deleted,
}

/// A third-party account record; only [`ThirdPartyStatus::Active`]
/// accounts receive OAuth-mode notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThirdPartyAccount {
    pub status: ThirdPartyStatus,
}

/// OAuth configuration for one third-party subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OauthConfiguration {
    pub token_endpoint: String,
    pub client_id: String,
    /// Never forwarded downstream; the publication service fetches
    /// credentials itself.
    #[serde(skip_serializing)]
    pub client_secret: String,
    /// Destination the publication service pushes artefacts to.
    pub destination: String,
}

/// Accumulated per-subscriber OAuth descriptor handed to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OauthRecipient {
    pub subscriber_id: SubscriberId,
    pub oauth: OauthConfiguration,
}

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// Read-only lookup surface over the external account service.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Bulk-resolve subscriber ids to email addresses.
    ///
    /// Ids with no resolvable address map to `None` or are omitted
    /// from the result entirely; both readings mean "drop".
    async fn resolve_emails(
        &self,
        subscriber_ids: &[SubscriberId],
    ) -> Result<HashMap<SubscriberId, Option<String>>, CollaboratorError>;

    /// The subscriber's third-party account record, if any.
    async fn find_third_party_account(
        &self,
        subscriber_id: SubscriberId,
    ) -> Result<Option<ThirdPartyAccount>, CollaboratorError>;

    /// The subscriber's OAuth configuration, if any.
    async fn find_oauth_configuration(
        &self,
        subscriber_id: SubscriberId,
    ) -> Result<Option<OauthConfiguration>, CollaboratorError>;
}

/// External role/permission engine.
#[async_trait]
pub trait AuthorizationService: Send + Sync {
    /// Whether the subscriber may view publications of this list type
    /// at this sensitivity. A missing subscriber account must report
    /// `Ok(false)`, never an error.
    async fn is_authorized(
        &self,
        subscriber_id: SubscriberId,
        list_type: &str,
        sensitivity: Sensitivity,
    ) -> Result<bool, CollaboratorError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

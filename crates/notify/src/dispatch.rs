//! Delivery dispatch seam and its HTTP implementation.
//!
//! The engine never sends emails or partner pushes itself; it hands
//! resolved recipient maps to the external publication service.
//! [`HttpDispatcher`] is the production implementation, posting JSON
//! to that service. Calls are single-attempt — retry policy belongs to
//! the publication service, not this layer.

use std::collections::HashMap;

use async_trait::async_trait;
use docket_core::types::ArtefactId;
use docket_core::{Artefact, Subscription};
use serde::{Deserialize, Serialize};

use crate::accounts::OauthRecipient;
use crate::config::DispatcherConfig;
use crate::error::CollaboratorError;

// ---------------------------------------------------------------------------
// PublicationAction
// ---------------------------------------------------------------------------

/// Action tag sent with OAuth-mode notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublicationAction {
    NewPublication,
    UpdatePublication,
    DeletePublication,
}

impl PublicationAction {
    /// Action for a published artefact: a supersede counter above zero
    /// marks a republish.
    pub fn for_publication(artefact: &Artefact) -> Self {
        if artefact.is_republish() {
            Self::UpdatePublication
        } else {
            Self::NewPublication
        }
    }
}

// ---------------------------------------------------------------------------
// DeliveryDispatcher
// ---------------------------------------------------------------------------

/// Downstream dispatch surface.
///
/// All methods are fire-and-forget from the engine's perspective: a
/// returned error is logged by the caller and the affected branch is
/// skipped, never retried.
#[async_trait]
pub trait DeliveryDispatcher: Send + Sync {
    /// Hand the email digest map (address → matched subscriptions) to
    /// the publication service.
    async fn send_email_digest(
        &self,
        artefact_id: ArtefactId,
        recipients: &HashMap<String, Vec<Subscription>>,
    ) -> Result<(), CollaboratorError>;

    /// Push an artefact reference to one partner endpoint (legacy mode).
    async fn send_api_push(
        &self,
        endpoint: &str,
        artefact_id: ArtefactId,
    ) -> Result<(), CollaboratorError>;

    /// Signal withdrawal of an artefact to one partner endpoint.
    async fn send_empty_artefact(
        &self,
        endpoint: &str,
        artefact: &Artefact,
    ) -> Result<(), CollaboratorError>;

    /// Hand the accumulated OAuth descriptors to the publication
    /// service together with the action tag.
    async fn send_oauth_subscription(
        &self,
        recipients: &[OauthRecipient],
        artefact_id: ArtefactId,
        action: PublicationAction,
    ) -> Result<(), CollaboratorError>;
}

// ---------------------------------------------------------------------------
// HttpDispatcher
// ---------------------------------------------------------------------------

/// Error type for dispatch failures.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The publication service returned a non-2xx status code.
    #[error("Publication service returned HTTP {0}")]
    HttpStatus(u16),
}

/// Dispatches notification batches to the publication service over HTTP.
pub struct HttpDispatcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDispatcher {
    /// Create a dispatcher with a pre-configured HTTP client.
    pub fn new(config: DispatcherConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Execute a single POST to `base_url` + `path` and check the status.
    async fn post(&self, path: &str, payload: &serde_json::Value) -> Result<(), DispatchError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.client.post(&url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(DispatchError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }

    /// Execute a single POST to an absolute partner URL.
    async fn post_to(&self, url: &str, payload: &serde_json::Value) -> Result<(), DispatchError> {
        let response = self.client.post(url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(DispatchError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl DeliveryDispatcher for HttpDispatcher {
    async fn send_email_digest(
        &self,
        artefact_id: ArtefactId,
        recipients: &HashMap<String, Vec<Subscription>>,
    ) -> Result<(), CollaboratorError> {
        let payload = serde_json::json!({
            "artefactId": artefact_id,
            "recipients": recipients,
        });
        self.post("/notify/subscription", &payload).await?;
        tracing::info!(
            artefact_id = %artefact_id,
            recipients = recipients.len(),
            "Email digest handed to publication service"
        );
        Ok(())
    }

    async fn send_api_push(
        &self,
        endpoint: &str,
        artefact_id: ArtefactId,
    ) -> Result<(), CollaboratorError> {
        let payload = serde_json::json!({ "artefactId": artefact_id });
        self.post_to(endpoint, &payload).await?;
        tracing::info!(endpoint, artefact_id = %artefact_id, "Artefact pushed to partner API");
        Ok(())
    }

    async fn send_empty_artefact(
        &self,
        endpoint: &str,
        artefact: &Artefact,
    ) -> Result<(), CollaboratorError> {
        // Withdrawal is signalled by an artefact envelope with no content.
        let payload = serde_json::json!({
            "artefactId": artefact.id,
            "listType": artefact.list_type,
            "deleted": true,
        });
        self.post_to(endpoint, &payload).await?;
        tracing::info!(endpoint, artefact_id = %artefact.id, "Withdrawal signalled to partner API");
        Ok(())
    }

    async fn send_oauth_subscription(
        &self,
        recipients: &[OauthRecipient],
        artefact_id: ArtefactId,
        action: PublicationAction,
    ) -> Result<(), CollaboratorError> {
        let payload = serde_json::json!({
            "artefactId": artefact_id,
            "action": action,
            "recipients": recipients,
        });
        self.post("/notify/api/v2", &payload).await?;
        tracing::info!(
            artefact_id = %artefact_id,
            recipients = recipients.len(),
            ?action,
            "OAuth subscription batch handed to publication service"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

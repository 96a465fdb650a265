//! Artefact-to-subscriber notification orchestration.
//!
//! [`NotificationService`] consumes [`ArtefactEvent`]s from the bus
//! and drives the pipeline for each one: match → permission filter →
//! group by subscriber → channel split → recipient resolution →
//! dispatch. Every event is processed in its own spawned task so a
//! slow collaborator call blocks only that artefact's unit of work.

use std::sync::Arc;

use docket_core::{Artefact, Subscription};
use tokio::sync::broadcast;

use crate::accounts::{AccountDirectory, AuthorizationService, OauthRecipient, ThirdPartyStatus};
use crate::bus::ArtefactEvent;
use crate::channel;
use crate::config::{PartnerTable, ThirdPartyMode};
use crate::dedup;
use crate::dispatch::{DeliveryDispatcher, PublicationAction};
use crate::error::NotifyError;
use crate::filter::PermissionFilter;
use crate::matcher::SubscriptionMatcher;
use crate::resolve::RecipientResolver;
use crate::store::SubscriptionStore;

/// Routes artefact events to subscribers across delivery channels.
pub struct NotificationService {
    matcher: SubscriptionMatcher,
    filter: PermissionFilter,
    resolver: RecipientResolver,
    accounts: Arc<dyn AccountDirectory>,
    dispatcher: Arc<dyn DeliveryDispatcher>,
    mode: ThirdPartyMode,
}

impl NotificationService {
    /// Wire the pipeline over its collaborators and configuration.
    pub fn new(
        store: Arc<dyn SubscriptionStore>,
        authz: Arc<dyn AuthorizationService>,
        accounts: Arc<dyn AccountDirectory>,
        dispatcher: Arc<dyn DeliveryDispatcher>,
        partners: PartnerTable,
        mode: ThirdPartyMode,
    ) -> Self {
        Self {
            matcher: SubscriptionMatcher::new(store),
            filter: PermissionFilter::new(authz),
            resolver: RecipientResolver::new(Arc::clone(&accounts), partners),
            accounts,
            dispatcher,
            mode,
        }
    }

    /// Run the main processing loop.
    ///
    /// Subscribes to the bus via `receiver`; each received event is
    /// spawned onto its own task so events never block one another.
    /// The loop exits when the channel is closed (i.e. the
    /// [`ArtefactBus`](crate::bus::ArtefactBus) is dropped).
    pub async fn run(self: Arc<Self>, mut receiver: broadcast::Receiver<ArtefactEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let service = Arc::clone(&self);
                    tokio::spawn(async move {
                        service.process(event).await;
                    });
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification service lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Artefact bus closed, notification service shutting down");
                    break;
                }
            }
        }
    }

    /// Process one event, logging any failure. Never panics or
    /// propagates — a failed artefact must not affect its siblings.
    pub async fn process(&self, event: ArtefactEvent) {
        let result = match &event {
            ArtefactEvent::Published(artefact) => self.handle_publication(artefact).await,
            ArtefactEvent::Withdrawn(artefact) => self.handle_withdrawal(artefact).await,
        };
        if let Err(e) = result {
            tracing::error!(
                artefact_id = %event.artefact().id,
                error = %e,
                "Failed to process artefact notification"
            );
        }
    }

    /// Full pipeline for a created or republished artefact.
    pub async fn handle_publication(&self, artefact: &Artefact) -> Result<(), NotifyError> {
        let candidates = self.matcher.matching(artefact).await?;
        if candidates.is_empty() {
            tracing::info!(artefact_id = %artefact.id, "No matching subscriptions");
            return Ok(());
        }

        let permitted = self.filter.filter(candidates, artefact).await;
        let (email, api) = channel::split(permitted);
        tracing::info!(
            artefact_id = %artefact.id,
            email = email.len(),
            api = api.len(),
            "Routing publication to channels"
        );

        // The two branches are independent; a failure in one must never
        // abort the other.
        let (email_result, api_result) = tokio::join!(
            self.notify_email(artefact, email),
            self.notify_api(artefact, api, PublicationAction::for_publication(artefact)),
        );
        if let Err(e) = email_result {
            tracing::error!(artefact_id = %artefact.id, error = %e, "Email branch failed");
        }
        if let Err(e) = api_result {
            tracing::error!(artefact_id = %artefact.id, error = %e, "API branch failed");
        }
        Ok(())
    }

    /// Withdrawal pipeline: list-type match only, API channel only.
    ///
    /// Email subscribers are not notified of deletions; partner APIs
    /// receive an empty-artefact payload (legacy) or a
    /// `DELETE_PUBLICATION` action (OAuth mode).
    pub async fn handle_withdrawal(&self, artefact: &Artefact) -> Result<(), NotifyError> {
        let candidates = self.matcher.matching_for_withdrawal(artefact).await?;
        let permitted = self.filter.filter(candidates, artefact).await;
        let (_, api) = channel::split(permitted);
        if api.is_empty() {
            tracing::info!(artefact_id = %artefact.id, "No API subscriptions for withdrawal");
            return Ok(());
        }

        match self.mode {
            ThirdPartyMode::Legacy => {
                let endpoints = self.resolver.resolve_api_endpoints(api);
                for endpoint in endpoints.keys() {
                    // One endpoint failing must not starve the others.
                    if let Err(e) = self.dispatcher.send_empty_artefact(endpoint, artefact).await
                    {
                        tracing::error!(
                            endpoint = %endpoint,
                            artefact_id = %artefact.id,
                            error = %e,
                            "Failed to signal withdrawal to partner endpoint"
                        );
                    }
                }
                Ok(())
            }
            ThirdPartyMode::Oauth => {
                self.notify_api(artefact, api, PublicationAction::DeletePublication)
                    .await
            }
        }
    }

    /// Email branch: group by subscriber, resolve addresses, dispatch
    /// one digest call. An empty resolution skips dispatch entirely.
    async fn notify_email(
        &self,
        artefact: &Artefact,
        subscriptions: Vec<Subscription>,
    ) -> Result<(), NotifyError> {
        if subscriptions.is_empty() {
            return Ok(());
        }

        let groups = dedup::group_by_subscriber(subscriptions);
        let recipients = self.resolver.resolve_emails(groups).await;
        if recipients.is_empty() {
            tracing::info!(
                artefact_id = %artefact.id,
                "No email recipients resolved, skipping email dispatch"
            );
            return Ok(());
        }

        self.dispatcher
            .send_email_digest(artefact.id, &recipients)
            .await
            .map_err(NotifyError::Dispatch)
    }

    /// API branch, in the configured third-party mode.
    async fn notify_api(
        &self,
        artefact: &Artefact,
        subscriptions: Vec<Subscription>,
        action: PublicationAction,
    ) -> Result<(), NotifyError> {
        if subscriptions.is_empty() {
            return Ok(());
        }

        match self.mode {
            ThirdPartyMode::Legacy => {
                let endpoints = self.resolver.resolve_api_endpoints(subscriptions);
                for endpoint in endpoints.keys() {
                    // One endpoint failing must not starve the others.
                    if let Err(e) = self.dispatcher.send_api_push(endpoint, artefact.id).await {
                        tracing::error!(
                            endpoint = %endpoint,
                            artefact_id = %artefact.id,
                            error = %e,
                            "Failed to push artefact to partner endpoint"
                        );
                    }
                }
                Ok(())
            }
            ThirdPartyMode::Oauth => {
                let recipients = self.oauth_recipients(subscriptions).await;
                if recipients.is_empty() {
                    tracing::info!(
                        artefact_id = %artefact.id,
                        "No OAuth recipients accumulated, skipping third-party dispatch"
                    );
                    return Ok(());
                }
                self.dispatcher
                    .send_oauth_subscription(&recipients, artefact.id, action)
                    .await
                    .map_err(NotifyError::Dispatch)
            }
        }
    }

    /// Accumulate one OAuth descriptor per API subscriber.
    ///
    /// Subscribers without an `ACTIVE` third-party account or without
    /// an OAuth configuration are skipped with a warning; a failed
    /// lookup likewise only skips that subscriber.
    async fn oauth_recipients(
        &self,
        subscriptions: Vec<Subscription>,
    ) -> Vec<OauthRecipient> {
        let groups = dedup::group_by_subscriber(subscriptions);
        let mut recipients = Vec::with_capacity(groups.len());

        for subscriber_id in groups.into_keys() {
            let account = match self.accounts.find_third_party_account(subscriber_id).await {
                Ok(Some(account)) => account,
                Ok(None) => {
                    tracing::warn!(
                        subscriber_id = %subscriber_id,
                        "No third-party account for API subscriber, skipping"
                    );
                    continue;
                }
                Err(e) => {
                    tracing::warn!(
                        subscriber_id = %subscriber_id,
                        error = %e,
                        "Third-party account lookup failed, skipping subscriber"
                    );
                    continue;
                }
            };

            if account.status != ThirdPartyStatus::Active {
                tracing::warn!(
                    subscriber_id = %subscriber_id,
                    status = ?account.status,
                    "Third-party account not active, skipping"
                );
                continue;
            }

            let oauth = match self.accounts.find_oauth_configuration(subscriber_id).await {
                Ok(Some(config)) => config,
                Ok(None) => {
                    tracing::warn!(
                        subscriber_id = %subscriber_id,
                        "No OAuth configuration for API subscriber, skipping"
                    );
                    continue;
                }
                Err(e) => {
                    tracing::warn!(
                        subscriber_id = %subscriber_id,
                        error = %e,
                        "OAuth configuration lookup failed, skipping subscriber"
                    );
                    continue;
                }
            };

            recipients.push(OauthRecipient {
                subscriber_id,
                oauth,
            });
        }

        recipients
    }
}

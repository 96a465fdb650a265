//! Subscription lifecycle operations over the store seam.

use std::sync::Arc;

use docket_core::types::{SubscriberId, SubscriptionId};
use docket_core::Subscription;

use crate::dedup;
use crate::error::NotifyError;
use crate::store::SubscriptionStore;

/// Create / remove / list surface for subscriptions.
///
/// Creation enforces the supersede rule: a subscriber creating a
/// subscription with the same (kind, value) criterion as an existing
/// one replaces it — the old record is deleted first, so at most one
/// subscription per criterion is stored per subscriber.
pub struct SubscriptionManager {
    store: Arc<dyn SubscriptionStore>,
}

impl SubscriptionManager {
    /// Create a manager over the given store.
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        Self { store }
    }

    /// Store a new subscription, superseding identical-criteria ones.
    pub async fn create(&self, subscription: Subscription) -> Result<(), NotifyError> {
        let existing = self
            .store
            .find_by_subscriber(subscription.subscriber_id)
            .await
            .map_err(NotifyError::Store)?;

        for superseded in dedup::superseded_by(&existing, &subscription) {
            tracing::info!(
                subscription_id = %superseded,
                subscriber_id = %subscription.subscriber_id,
                "Superseding subscription with identical criteria"
            );
            self.store
                .delete(superseded)
                .await
                .map_err(NotifyError::Store)?;
        }

        self.store
            .create(subscription)
            .await
            .map_err(NotifyError::Store)
    }

    /// Delete a subscription on unsubscribe.
    pub async fn remove(&self, subscription_id: SubscriptionId) -> Result<(), NotifyError> {
        self.store
            .delete(subscription_id)
            .await
            .map_err(NotifyError::Store)
    }

    /// All subscriptions owned by a subscriber.
    pub async fn find_for_subscriber(
        &self,
        subscriber_id: SubscriberId,
    ) -> Result<Vec<Subscription>, NotifyError> {
        self.store
            .find_by_subscriber(subscriber_id)
            .await
            .map_err(NotifyError::Store)
    }
}

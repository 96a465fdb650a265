//! Subscription store collaborator seam.
//!
//! Persistence lives in a separate service; this engine only consumes
//! the query surface below. Implementations must be safe for
//! concurrent read access — every artefact task queries the store
//! independently.

use async_trait::async_trait;
use docket_core::types::{SubscriberId, SubscriptionId};
use docket_core::{Language, SearchKind, Subscription};

use crate::error::CollaboratorError;

/// Query and mutation surface over stored subscriptions.
///
/// The read methods feed the matcher; `create`/`delete` exist for the
/// subscribe flow, where a new subscription supersedes any existing
/// one with identical criteria (see
/// [`SubscriptionManager`](crate::manager::SubscriptionManager)).
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Subscriptions watching this exact (location, list type, language)
    /// combination.
    async fn find_by_location(
        &self,
        location_id: &str,
        list_type: &str,
        language: Language,
    ) -> Result<Vec<Subscription>, CollaboratorError>;

    /// Subscriptions with the given search kind and value.
    async fn find_by_search(
        &self,
        kind: SearchKind,
        value: &str,
    ) -> Result<Vec<Subscription>, CollaboratorError>;

    /// All subscriptions owned by one subscriber.
    async fn find_by_subscriber(
        &self,
        subscriber_id: SubscriberId,
    ) -> Result<Vec<Subscription>, CollaboratorError>;

    /// Store a new subscription.
    async fn create(&self, subscription: Subscription) -> Result<(), CollaboratorError>;

    /// Delete a subscription by id. Deleting an unknown id is not an error.
    async fn delete(&self, subscription_id: SubscriptionId) -> Result<(), CollaboratorError>;
}

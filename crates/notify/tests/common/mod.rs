//! Shared fakes and builders for the pipeline integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use docket_core::types::{ArtefactId, SubscriberId, SubscriptionId};
use docket_core::{
    Artefact, Channel, Language, SearchKind, SearchPayload, Sensitivity, Subscription,
};
use docket_notify::error::CollaboratorError;
use docket_notify::{
    AccountDirectory, AuthorizationService, DeliveryDispatcher, OauthConfiguration,
    OauthRecipient, PublicationAction, SubscriptionStore, ThirdPartyAccount,
};

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// A subscription with the given criterion and channel.
pub fn subscription(
    subscriber_id: SubscriberId,
    kind: SearchKind,
    value: &str,
    channel: Channel,
) -> Subscription {
    Subscription {
        id: Uuid::new_v4(),
        subscriber_id,
        kind,
        value: value.to_string(),
        channel,
        location_name: Some("Oxford Combined Court Centre".to_string()),
        created_at: chrono::Utc::now(),
    }
}

/// A public English artefact for the given location and list type.
pub fn artefact(location_id: &str, list_type: &str) -> Artefact {
    Artefact {
        id: Uuid::new_v4(),
        location_id: location_id.to_string(),
        list_type: list_type.to_string(),
        language: Language::English,
        sensitivity: Sensitivity::Public,
        search: SearchPayload::default(),
        supersede_count: 0,
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// One stored subscription, with the optional (list type, language)
/// narrowing a location subscription carries alongside its criterion.
struct StoredSubscription {
    subscription: Subscription,
    list_type: Option<String>,
    language: Option<Language>,
}

impl StoredSubscription {
    fn unconstrained(subscription: Subscription) -> Self {
        Self {
            subscription,
            list_type: None,
            language: None,
        }
    }
}

/// In-memory subscription store.
#[derive(Default)]
pub struct MemoryStore {
    subscriptions: Mutex<Vec<StoredSubscription>>,
}

impl MemoryStore {
    pub fn with(subscriptions: Vec<Subscription>) -> Arc<Self> {
        Arc::new(Self {
            subscriptions: Mutex::new(
                subscriptions
                    .into_iter()
                    .map(StoredSubscription::unconstrained)
                    .collect(),
            ),
        })
    }

    /// Narrow an already-stored location subscription to one list type
    /// and language.
    pub fn constrain(&self, subscription_id: SubscriptionId, list_type: &str, language: Language) {
        let mut stored = self.subscriptions.lock().unwrap();
        let entry = stored
            .iter_mut()
            .find(|s| s.subscription.id == subscription_id)
            .expect("constrain: unknown subscription id");
        entry.list_type = Some(list_type.to_string());
        entry.language = Some(language);
    }

    pub fn all(&self) -> Vec<Subscription> {
        self.subscriptions
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.subscription.clone())
            .collect()
    }
}

#[async_trait]
impl SubscriptionStore for MemoryStore {
    async fn find_by_location(
        &self,
        location_id: &str,
        list_type: &str,
        language: Language,
    ) -> Result<Vec<Subscription>, CollaboratorError> {
        // The combined criterion: the location id is the subscription
        // value, and a stored list type / language (when present) must
        // match the artefact's.
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| {
                s.subscription.kind == SearchKind::Location
                    && s.subscription.value == location_id
                    && s.list_type.as_deref().map_or(true, |lt| lt == list_type)
                    && s.language.map_or(true, |l| l == language)
            })
            .map(|s| s.subscription.clone())
            .collect())
    }

    async fn find_by_search(
        &self,
        kind: SearchKind,
        value: &str,
    ) -> Result<Vec<Subscription>, CollaboratorError> {
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.subscription.kind == kind && s.subscription.value == value)
            .map(|s| s.subscription.clone())
            .collect())
    }

    async fn find_by_subscriber(
        &self,
        subscriber_id: SubscriberId,
    ) -> Result<Vec<Subscription>, CollaboratorError> {
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.subscription.subscriber_id == subscriber_id)
            .map(|s| s.subscription.clone())
            .collect())
    }

    async fn create(&self, subscription: Subscription) -> Result<(), CollaboratorError> {
        self.subscriptions
            .lock()
            .unwrap()
            .push(StoredSubscription::unconstrained(subscription));
        Ok(())
    }

    async fn delete(&self, subscription_id: SubscriptionId) -> Result<(), CollaboratorError> {
        self.subscriptions
            .lock()
            .unwrap()
            .retain(|s| s.subscription.id != subscription_id);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FakeDirectory
// ---------------------------------------------------------------------------

/// Scripted account directory.
#[derive(Default)]
pub struct FakeDirectory {
    pub emails: HashMap<SubscriberId, Option<String>>,
    pub third_party: HashMap<SubscriberId, ThirdPartyAccount>,
    pub oauth: HashMap<SubscriberId, OauthConfiguration>,
}

impl FakeDirectory {
    pub fn with_email(mut self, subscriber_id: SubscriberId, email: &str) -> Self {
        self.emails.insert(subscriber_id, Some(email.to_string()));
        self
    }
}

#[async_trait]
impl AccountDirectory for FakeDirectory {
    async fn resolve_emails(
        &self,
        subscriber_ids: &[SubscriberId],
    ) -> Result<HashMap<SubscriberId, Option<String>>, CollaboratorError> {
        Ok(subscriber_ids
            .iter()
            .filter_map(|id| self.emails.get(id).map(|e| (*id, e.clone())))
            .collect())
    }

    async fn find_third_party_account(
        &self,
        subscriber_id: SubscriberId,
    ) -> Result<Option<ThirdPartyAccount>, CollaboratorError> {
        Ok(self.third_party.get(&subscriber_id).cloned())
    }

    async fn find_oauth_configuration(
        &self,
        subscriber_id: SubscriberId,
    ) -> Result<Option<OauthConfiguration>, CollaboratorError> {
        Ok(self.oauth.get(&subscriber_id).cloned())
    }
}

// ---------------------------------------------------------------------------
// FakeAuthorizer
// ---------------------------------------------------------------------------

/// Authorizer permitting an explicit set of subscribers.
#[derive(Default)]
pub struct FakeAuthorizer {
    pub permitted: Vec<SubscriberId>,
}

#[async_trait]
impl AuthorizationService for FakeAuthorizer {
    async fn is_authorized(
        &self,
        subscriber_id: SubscriberId,
        _list_type: &str,
        _sensitivity: Sensitivity,
    ) -> Result<bool, CollaboratorError> {
        Ok(self.permitted.contains(&subscriber_id))
    }
}

// ---------------------------------------------------------------------------
// RecordingDispatcher
// ---------------------------------------------------------------------------

/// One observed dispatch call.
#[derive(Debug, Clone)]
pub enum DispatchCall {
    EmailDigest {
        artefact_id: ArtefactId,
        recipients: HashMap<String, Vec<Subscription>>,
    },
    ApiPush {
        endpoint: String,
        artefact_id: ArtefactId,
    },
    EmptyArtefact {
        endpoint: String,
        artefact_id: ArtefactId,
    },
    OauthSubscription {
        recipients: Vec<OauthRecipient>,
        artefact_id: ArtefactId,
        action: PublicationAction,
    },
}

/// Dispatcher that records every call instead of sending anything.
#[derive(Default)]
pub struct RecordingDispatcher {
    calls: Mutex<Vec<DispatchCall>>,
}

impl RecordingDispatcher {
    pub fn calls(&self) -> Vec<DispatchCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeliveryDispatcher for RecordingDispatcher {
    async fn send_email_digest(
        &self,
        artefact_id: ArtefactId,
        recipients: &HashMap<String, Vec<Subscription>>,
    ) -> Result<(), CollaboratorError> {
        self.calls.lock().unwrap().push(DispatchCall::EmailDigest {
            artefact_id,
            recipients: recipients.clone(),
        });
        Ok(())
    }

    async fn send_api_push(
        &self,
        endpoint: &str,
        artefact_id: ArtefactId,
    ) -> Result<(), CollaboratorError> {
        self.calls.lock().unwrap().push(DispatchCall::ApiPush {
            endpoint: endpoint.to_string(),
            artefact_id,
        });
        Ok(())
    }

    async fn send_empty_artefact(
        &self,
        endpoint: &str,
        artefact: &Artefact,
    ) -> Result<(), CollaboratorError> {
        self.calls.lock().unwrap().push(DispatchCall::EmptyArtefact {
            endpoint: endpoint.to_string(),
            artefact_id: artefact.id,
        });
        Ok(())
    }

    async fn send_oauth_subscription(
        &self,
        recipients: &[OauthRecipient],
        artefact_id: ArtefactId,
        action: PublicationAction,
    ) -> Result<(), CollaboratorError> {
        self.calls
            .lock()
            .unwrap()
            .push(DispatchCall::OauthSubscription {
                recipients: recipients.to_vec(),
                artefact_id,
                action,
            });
        Ok(())
    }
}

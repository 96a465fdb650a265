//! Recipient resolution: subscriber groups to dispatchable maps.
//!
//! Two independent paths, both tolerant of partial data:
//!
//! - the email path rewrites a subscriber-id-keyed group map into an
//!   address-keyed map via a bulk account lookup;
//! - the API path maps partner channels to statically configured
//!   destination URLs, failing the whole batch closed on any unknown
//!   channel.

use std::collections::HashMap;
use std::sync::Arc;

use docket_core::types::SubscriberId;
use docket_core::Subscription;

use crate::accounts::AccountDirectory;
use crate::config::PartnerTable;

/// Resolves channel buckets into recipient-keyed maps.
pub struct RecipientResolver {
    accounts: Arc<dyn AccountDirectory>,
    partners: PartnerTable,
}

impl RecipientResolver {
    /// Create a resolver over the account directory and partner table.
    pub fn new(accounts: Arc<dyn AccountDirectory>, partners: PartnerTable) -> Self {
        Self { accounts, partners }
    }

    /// Rewrite subscriber-id-keyed groups into an email-keyed map.
    ///
    /// Builds a new map rather than mutating the input: each group's
    /// key is replaced by the subscriber's resolved address; groups
    /// whose subscriber has no resolvable email are dropped with a
    /// warning. A failed or wholly-empty bulk lookup yields an empty
    /// map (logged) — email dispatch is simply skipped for this
    /// artefact, never failed.
    pub async fn resolve_emails(
        &self,
        groups: HashMap<SubscriberId, Vec<Subscription>>,
    ) -> HashMap<String, Vec<Subscription>> {
        if groups.is_empty() {
            return HashMap::new();
        }

        let subscriber_ids: Vec<SubscriberId> = groups.keys().copied().collect();
        let resolved = match self.accounts.resolve_emails(&subscriber_ids).await {
            Ok(map) => map,
            Err(e) => {
                tracing::error!(error = %e, "Bulk email resolution failed, skipping email channel");
                return HashMap::new();
            }
        };

        if resolved.is_empty() {
            tracing::warn!(
                subscribers = subscriber_ids.len(),
                "No email mappings returned for any subscriber"
            );
            return HashMap::new();
        }

        let mut by_address: HashMap<String, Vec<Subscription>> = HashMap::new();
        for (subscriber_id, subscriptions) in groups {
            match resolved.get(&subscriber_id) {
                Some(Some(address)) => {
                    // Two subscribers sharing an address collapse into one
                    // digest entry.
                    by_address
                        .entry(address.clone())
                        .or_default()
                        .extend(subscriptions);
                }
                _ => {
                    tracing::warn!(
                        subscriber_id = %subscriber_id,
                        "No resolvable email for subscriber, dropping from digest"
                    );
                }
            }
        }
        by_address
    }

    /// Map API-channel subscriptions to destination URLs.
    ///
    /// Fail-closed: if any subscription carries the email channel or a
    /// partner absent from the configuration table, the entire batch
    /// resolves to an empty map rather than dispatching partially.
    pub fn resolve_api_endpoints(
        &self,
        subscriptions: Vec<Subscription>,
    ) -> HashMap<String, Vec<Subscription>> {
        let mut by_endpoint: HashMap<String, Vec<Subscription>> = HashMap::new();
        for subscription in subscriptions {
            let Some(partner) = subscription.channel.partner() else {
                tracing::error!(
                    subscription_id = %subscription.id,
                    "Non-API subscription in API batch, failing resolution closed"
                );
                return HashMap::new();
            };
            let Some(url) = self.partners.endpoint(partner) else {
                tracing::error!(
                    partner,
                    subscription_id = %subscription.id,
                    "No configured endpoint for partner channel, failing resolution closed"
                );
                return HashMap::new();
            };
            let url = url.to_string();
            by_endpoint.entry(url).or_default().push(subscription);
        }
        by_endpoint
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

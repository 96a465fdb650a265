//! Subscriber-level grouping and the create-time supersede rule.
//!
//! Two related but distinct rules live here:
//!
//! - [`group_by_subscriber`] collapses a candidate list so each
//!   subscriber contributes exactly one map entry. Subscriptions are
//!   concatenated, never merged — each keeps its own channel and
//!   search metadata.
//! - [`superseded_by`] finds the existing subscriptions a newly
//!   created one replaces: those of the same subscriber with an
//!   identical (kind, value) criterion.

use std::collections::HashMap;

use docket_core::types::{SubscriberId, SubscriptionId};
use docket_core::Subscription;

/// Group candidates by owning subscriber.
///
/// The union of all values is the input multiset; no subscriber is
/// dropped and none appears as a key twice.
pub fn group_by_subscriber(
    candidates: Vec<Subscription>,
) -> HashMap<SubscriberId, Vec<Subscription>> {
    let mut groups: HashMap<SubscriberId, Vec<Subscription>> = HashMap::new();
    for candidate in candidates {
        groups.entry(candidate.subscriber_id).or_default().push(candidate);
    }
    groups
}

/// Ids of existing subscriptions replaced by `new`.
///
/// A subscription is superseded when it belongs to the same subscriber
/// and watches the same (kind, value) criterion.
pub fn superseded_by(existing: &[Subscription], new: &Subscription) -> Vec<SubscriptionId> {
    existing
        .iter()
        .filter(|s| s.subscriber_id == new.subscriber_id && s.same_criteria(new))
        .map(|s| s.id)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

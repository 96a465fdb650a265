//! Subscription records and their search / channel dimensions.

use serde::{Deserialize, Serialize};

use crate::types::{SubscriberId, SubscriptionId, Timestamp};

// ---------------------------------------------------------------------------
// SearchKind
// ---------------------------------------------------------------------------

/// The dimension a subscription matches publications on.
///
/// Together with [`Subscription::value`] this defines exactly which
/// publication events the subscription is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchKind {
    /// Matches on the publishing court/tribunal location id.
    Location,
    /// Matches on the list-type classification, across all locations.
    ListType,
    /// Matches on a case number carried in the publication's search payload.
    CaseNumber,
    /// Matches on a case unique reference number (URN).
    CaseUrn,
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// The delivery channel a subscription is notified through.
///
/// A subscription carries exactly one channel, fixed at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    /// Direct email digest to the subscriber's own address.
    Email,
    /// Push to a named partner's API; the destination endpoint comes
    /// from static per-partner configuration, not from the subscription.
    Api(String),
}

impl Channel {
    /// `true` for the direct email digest channel.
    pub fn is_email(&self) -> bool {
        matches!(self, Channel::Email)
    }

    /// The partner name for API channels, `None` for email.
    pub fn partner(&self) -> Option<&str> {
        match self {
            Channel::Email => None,
            Channel::Api(name) => Some(name),
        }
    }
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// A stored interest in a class of publications, owned by one subscriber.
///
/// Created on subscribe, updated only via full replace, deleted on
/// unsubscribe or bulk cleanup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub subscriber_id: SubscriberId,
    pub kind: SearchKind,
    /// The value matched against the artefact dimension selected by `kind`.
    pub value: String,
    pub channel: Channel,
    /// Human-readable location name, kept for email rendering downstream.
    pub location_name: Option<String>,
    pub created_at: Timestamp,
}

impl Subscription {
    /// `true` when `other` watches the same (kind, value) criterion.
    ///
    /// Used by the create-time supersede rule: a subscriber creating a
    /// subscription with identical criteria replaces the existing one.
    pub fn same_criteria(&self, other: &Subscription) -> bool {
        self.kind == other.kind && self.value == other.value
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

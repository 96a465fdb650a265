//! Channel routing: partition candidates by delivery channel.
//!
//! Routing is a stable partition, never a transformation — a
//! subscription carries exactly one channel and ends up in exactly
//! one bucket.

use docket_core::{Channel, Subscription};

/// Subscriptions whose channel equals `channel` exactly.
pub fn with_channel(subscriptions: &[Subscription], channel: &Channel) -> Vec<Subscription> {
    subscriptions
        .iter()
        .filter(|s| s.channel == *channel)
        .cloned()
        .collect()
}

/// Split candidates into the email bucket and the partner-API bucket.
///
/// The union of the two buckets is the input and they are disjoint;
/// relative order within each bucket is preserved.
pub fn split(subscriptions: Vec<Subscription>) -> (Vec<Subscription>, Vec<Subscription>) {
    subscriptions.into_iter().partition(|s| s.channel.is_email())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use docket_core::SearchKind;
    use uuid::Uuid;

    fn subscription(channel: Channel) -> Subscription {
        Subscription {
            id: Uuid::new_v4(),
            subscriber_id: Uuid::new_v4(),
            kind: SearchKind::Location,
            value: "193254".to_string(),
            channel,
            location_name: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn split_is_a_complete_disjoint_partition() {
        let input = vec![
            subscription(Channel::Email),
            subscription(Channel::Api("courtel".to_string())),
            subscription(Channel::Email),
            subscription(Channel::Api("lexport".to_string())),
        ];
        let input_ids: Vec<_> = input.iter().map(|s| s.id).collect();

        let (email, api) = split(input);

        assert_eq!(email.len(), 2);
        assert_eq!(api.len(), 2);
        assert!(email.iter().all(|s| s.channel.is_email()));
        assert!(api.iter().all(|s| !s.channel.is_email()));

        let mut union: Vec<_> = email.iter().chain(api.iter()).map(|s| s.id).collect();
        union.sort();
        let mut expected = input_ids;
        expected.sort();
        assert_eq!(union, expected);
    }

    #[test]
    fn with_channel_matches_exact_partner() {
        let courtel = Channel::Api("courtel".to_string());
        let input = vec![
            subscription(courtel.clone()),
            subscription(Channel::Api("lexport".to_string())),
            subscription(Channel::Email),
        ];

        let routed = with_channel(&input, &courtel);
        assert_eq!(routed.len(), 1);
        assert_eq!(routed[0].channel, courtel);
    }

    #[test]
    fn split_of_empty_input_is_empty() {
        let (email, api) = split(Vec::new());
        assert!(email.is_empty());
        assert!(api.is_empty());
    }
}

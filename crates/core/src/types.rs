//! Shared identifier and timestamp aliases.

/// Subscribers are identified by the opaque UUID minted by the
/// upstream account service.
pub type SubscriberId = uuid::Uuid;

/// Subscription record identifier.
pub type SubscriptionId = uuid::Uuid;

/// Artefact (publication) identifier, minted by the ingestion service.
pub type ArtefactId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

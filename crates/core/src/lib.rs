//! Domain model for the docket publication-notification platform.
//!
//! This crate holds the pure data types shared by the matching and
//! routing engine:
//!
//! - [`Artefact`] — a published court/tribunal list, as handed to the
//!   notification subsystem by the upstream ingestion service.
//! - [`Subscription`] — a stored interest in a class of publications,
//!   owned by a subscriber and bound to one delivery [`Channel`].
//! - Supporting enums: [`SearchKind`], [`Sensitivity`], [`Language`].

pub mod artefact;
pub mod subscription;
pub mod types;

pub use artefact::{Artefact, CaseDescriptor, Language, SearchPayload, Sensitivity};
pub use subscription::{Channel, SearchKind, Subscription};

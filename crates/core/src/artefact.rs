//! Published artefacts (court/tribunal lists) and their search payload.
//!
//! An [`Artefact`] is handed to the notification subsystem by the
//! upstream ingestion service and is immutable from this point on;
//! its lifecycle (versioning, withdrawal) is owned entirely upstream.

use serde::{Deserialize, Serialize};

use crate::types::ArtefactId;

// ---------------------------------------------------------------------------
// Sensitivity / Language
// ---------------------------------------------------------------------------

/// Who may see a publication.
///
/// Only [`Sensitivity::Classified`] triggers the per-subscriber
/// permission check; the other levels pass notification candidates
/// through unfiltered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sensitivity {
    Public,
    Private,
    Classified,
    Internal,
}

/// Publication language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    English,
    Welsh,
    Bilingual,
}

// ---------------------------------------------------------------------------
// Search payload
// ---------------------------------------------------------------------------

/// One case referenced by a publication.
///
/// Either field may be absent; a descriptor carrying neither is a
/// data-quality problem the matcher logs and skips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_urn: Option<String>,
}

impl CaseDescriptor {
    /// `true` when the descriptor carries neither a number nor a URN.
    pub fn is_empty(&self) -> bool {
        self.case_number.is_none() && self.case_urn.is_none()
    }
}

/// The structured search payload extracted from a publication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPayload {
    #[serde(default)]
    pub cases: Vec<CaseDescriptor>,
}

// ---------------------------------------------------------------------------
// Artefact
// ---------------------------------------------------------------------------

/// A published court/tribunal list as emitted to this subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artefact {
    pub id: ArtefactId,
    /// Publishing location id, as stored on location subscriptions.
    pub location_id: String,
    /// List-type classification, e.g. `CIVIL_DAILY_CAUSE_LIST`.
    pub list_type: String,
    pub language: Language,
    pub sensitivity: Sensitivity,
    #[serde(default)]
    pub search: SearchPayload,
    /// Number of earlier versions this publication supersedes.
    /// Greater than zero means this is a republish.
    #[serde(default)]
    pub supersede_count: u32,
}

impl Artefact {
    /// `true` when this publication replaces an earlier version.
    pub fn is_republish(&self) -> bool {
        self.supersede_count > 0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Sensitivity-based permission filtering.

use std::sync::Arc;

use docket_core::{Artefact, Sensitivity, Subscription};

use crate::accounts::AuthorizationService;

/// Filters notification candidates through the external authorization
/// engine when the artefact's sensitivity requires it.
pub struct PermissionFilter {
    authz: Arc<dyn AuthorizationService>,
}

impl PermissionFilter {
    /// Create a filter over the given authorization service.
    pub fn new(authz: Arc<dyn AuthorizationService>) -> Self {
        Self { authz }
    }

    /// Retain only the candidates permitted to see the artefact.
    ///
    /// Policy: only `CLASSIFIED` artefacts are checked. `PUBLIC`,
    /// `PRIVATE`, and `INTERNAL` bypass the authorization engine
    /// entirely and pass through unchanged.
    ///
    /// A failed or missing-account check excludes the candidate; this
    /// method never errors.
    pub async fn filter(
        &self,
        candidates: Vec<Subscription>,
        artefact: &Artefact,
    ) -> Vec<Subscription> {
        if artefact.sensitivity != Sensitivity::Classified {
            return candidates;
        }

        let mut permitted = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match self
                .authz
                .is_authorized(candidate.subscriber_id, &artefact.list_type, artefact.sensitivity)
                .await
            {
                Ok(true) => permitted.push(candidate),
                Ok(false) => {
                    tracing::debug!(
                        subscriber_id = %candidate.subscriber_id,
                        list_type = %artefact.list_type,
                        "Subscriber not authorized for classified publication, excluding"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        subscriber_id = %candidate.subscriber_id,
                        error = %e,
                        "Authorization check failed, excluding candidate"
                    );
                }
            }
        }
        permitted
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

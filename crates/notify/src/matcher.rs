//! Candidate subscription matching.
//!
//! [`SubscriptionMatcher`] turns one artefact into the full candidate
//! list by fanning out over the store's query surface. The result may
//! contain the same subscriber several times; grouping happens later
//! in [`dedup`](crate::dedup). No ordering is guaranteed and nothing
//! downstream may depend on one.

use std::sync::Arc;

use docket_core::{Artefact, SearchKind, Subscription};

use crate::error::NotifyError;
use crate::store::SubscriptionStore;

/// Matches an artefact against stored subscriptions.
pub struct SubscriptionMatcher {
    store: Arc<dyn SubscriptionStore>,
}

impl SubscriptionMatcher {
    /// Create a matcher over the given store.
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        Self { store }
    }

    /// All subscriptions matching a published artefact.
    ///
    /// Always queries the combined (location, list type, language)
    /// criterion and the list-type-only criterion; additionally queries
    /// case number / case URN for every case descriptor carrying one.
    /// A descriptor with neither field is a data-quality warning, not
    /// an error.
    pub async fn matching(&self, artefact: &Artefact) -> Result<Vec<Subscription>, NotifyError> {
        let mut candidates = self
            .store
            .find_by_location(&artefact.location_id, &artefact.list_type, artefact.language)
            .await
            .map_err(NotifyError::Store)?;

        candidates.extend(
            self.store
                .find_by_search(SearchKind::ListType, &artefact.list_type)
                .await
                .map_err(NotifyError::Store)?,
        );

        for descriptor in &artefact.search.cases {
            if descriptor.is_empty() {
                tracing::warn!(
                    artefact_id = %artefact.id,
                    "Case descriptor carries neither case number nor URN, skipping"
                );
                continue;
            }

            if let Some(number) = &descriptor.case_number {
                candidates.extend(
                    self.store
                        .find_by_search(SearchKind::CaseNumber, number)
                        .await
                        .map_err(NotifyError::Store)?,
                );
            }

            if let Some(urn) = &descriptor.case_urn {
                candidates.extend(
                    self.store
                        .find_by_search(SearchKind::CaseUrn, urn)
                        .await
                        .map_err(NotifyError::Store)?,
                );
            }
        }

        Ok(candidates)
    }

    /// Subscriptions notified when an artefact is withdrawn.
    ///
    /// Withdrawal matches on list type only; location and case
    /// criteria are not consulted.
    pub async fn matching_for_withdrawal(
        &self,
        artefact: &Artefact,
    ) -> Result<Vec<Subscription>, NotifyError> {
        self.store
            .find_by_search(SearchKind::ListType, &artefact.list_type)
            .await
            .map_err(NotifyError::Store)
    }
}

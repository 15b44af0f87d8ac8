use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use bazar_logging::{bazar_info, bazar_warn};
use listing_core::{ListingId, ListingRequest};

use crate::{ListingCreationEndpoint, SubmissionError};

#[derive(Debug, Clone, Default)]
pub struct SubmissionSettings {
    /// Upper bound on one endpoint call. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

/// Mediates between a validated listing and the creation endpoint.
/// At most one call is in flight per owner; owners do not block each other.
pub struct SubmissionPipeline {
    endpoint: Arc<dyn ListingCreationEndpoint>,
    settings: SubmissionSettings,
    in_flight: Mutex<HashSet<u64>>,
}

struct InFlightGuard<'a> {
    owners: &'a Mutex<HashSet<u64>>,
    owner: u64,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.owner);
    }
}

impl SubmissionPipeline {
    pub fn new(endpoint: Arc<dyn ListingCreationEndpoint>, settings: SubmissionSettings) -> Self {
        Self {
            endpoint,
            settings,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn is_in_flight(&self, owner: u64) -> bool {
        self.owners().contains(&owner)
    }

    pub async fn submit(
        &self,
        owner: u64,
        request: &ListingRequest,
    ) -> Result<ListingId, SubmissionError> {
        if !self.owners().insert(owner) {
            bazar_warn!("Submission refused: owner {} already has one in flight", owner);
            return Err(SubmissionError::AlreadyInFlight);
        }
        let _guard = InFlightGuard {
            owners: &self.in_flight,
            owner,
        };

        let call = self.endpoint.create_listing(request);
        let outcome = match self.settings.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    bazar_warn!("Submission timed out after {:?}", limit);
                    return Err(SubmissionError::TimedOut);
                }
            },
            None => call.await,
        };

        match outcome {
            Ok(created) => {
                bazar_info!(
                    "Listing {} accepted, status {}",
                    created.listing_id,
                    created.status
                );
                Ok(created.listing_id)
            }
            Err(err) => Err(SubmissionError::Rejected(err.to_string())),
        }
    }

    fn owners(&self) -> std::sync::MutexGuard<'_, HashSet<u64>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

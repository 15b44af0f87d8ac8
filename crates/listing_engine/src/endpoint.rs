use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bazar_logging::{bazar_info, bazar_warn};
use listing_core::{ListingId, ListingRequest};
use sha2::{Digest, Sha256};

use crate::{CreatedListing, EndpointError, ListingStatus};

const LISTING_ID_PREFIX: &str = "item-";
const LISTING_ID_LEN: usize = 9;
const EPOCH_UTC: &str = "1970-01-01T00:00:00Z";

/// External acceptance call for new listings.
#[async_trait::async_trait]
pub trait ListingCreationEndpoint: Send + Sync {
    async fn create_listing(
        &self,
        request: &ListingRequest,
    ) -> Result<CreatedListing, EndpointError>;
}

#[derive(Debug, Clone)]
pub struct MockEndpointSettings {
    /// Simulated round trip before the endpoint answers.
    pub latency: Duration,
    /// When set, every call is rejected with this reason.
    pub reject_with: Option<String>,
}

impl Default for MockEndpointSettings {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(1500),
            reject_with: None,
        }
    }
}

/// A listing accepted by the in-memory endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredListing {
    pub id: ListingId,
    pub request: ListingRequest,
    pub posted_date: String,
    pub status: ListingStatus,
}

/// In-memory stand-in for the marketplace backend.
pub struct MockListingEndpoint {
    settings: MockEndpointSettings,
    posted_utc: Arc<dyn Fn() -> String + Send + Sync>,
    sequence: AtomicU64,
    listings: Mutex<Vec<StoredListing>>,
}

impl MockListingEndpoint {
    pub fn new(settings: MockEndpointSettings) -> Self {
        Self {
            settings,
            posted_utc: Arc::new(|| EPOCH_UTC.to_string()),
            sequence: AtomicU64::new(0),
            listings: Mutex::new(Vec::new()),
        }
    }

    /// Replaces the clock used to stamp `posted_date`.
    pub fn with_clock(mut self, posted_utc: Arc<dyn Fn() -> String + Send + Sync>) -> Self {
        self.posted_utc = posted_utc;
        self
    }

    /// Number of calls that reached the endpoint, accepted or not.
    pub fn call_count(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    pub fn listings(&self) -> Vec<StoredListing> {
        match self.listings.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait::async_trait]
impl ListingCreationEndpoint for MockListingEndpoint {
    async fn create_listing(
        &self,
        request: &ListingRequest,
    ) -> Result<CreatedListing, EndpointError> {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.settings.latency.is_zero() {
            tokio::time::sleep(self.settings.latency).await;
        }

        if let Some(reason) = &self.settings.reject_with {
            bazar_warn!("Mock endpoint rejecting listing: {}", reason);
            return Err(EndpointError::Rejected(reason.clone()));
        }

        let encoded = serde_json::to_string(request)
            .map_err(|err| EndpointError::Malformed(err.to_string()))?;
        let listing_id = generate_listing_id(&encoded, sequence);
        let posted_date = (self.posted_utc)();

        let stored = StoredListing {
            id: listing_id.clone(),
            request: request.clone(),
            posted_date: posted_date.clone(),
            status: ListingStatus::Active,
        };
        match self.listings.lock() {
            Ok(mut guard) => guard.push(stored),
            Err(poisoned) => poisoned.into_inner().push(stored),
        }
        bazar_info!(
            "Mock endpoint created {} ({} bytes of payload)",
            listing_id,
            encoded.len()
        );

        Ok(CreatedListing {
            listing_id,
            posted_date,
            status: ListingStatus::Active,
        })
    }
}

/// `item-` followed by nine lowercase base-36 characters taken from a
/// SHA-256 of the encoded request and its sequence number.
pub fn generate_listing_id(encoded_request: &str, sequence: u64) -> ListingId {
    let mut hasher = Sha256::new();
    hasher.update(encoded_request.as_bytes());
    hasher.update(sequence.to_le_bytes());
    let digest = hasher.finalize();
    let mut value = digest
        .iter()
        .take(8)
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte));

    let mut id = String::with_capacity(LISTING_ID_PREFIX.len() + LISTING_ID_LEN);
    id.push_str(LISTING_ID_PREFIX);
    for _ in 0..LISTING_ID_LEN {
        let digit = (value % 36) as u32;
        value /= 36;
        id.push(char::from_digit(digit, 36).unwrap_or('0'));
    }
    ListingId::new(id)
}

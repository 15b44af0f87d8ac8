use std::fmt;

use listing_core::{ListingId, SubmissionId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Active,
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingStatus::Active => write!(f, "active"),
        }
    }
}

/// Endpoint acknowledgement for an accepted listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedListing {
    pub listing_id: ListingId,
    pub posted_date: String,
    pub status: ListingStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("listing rejected: {0}")]
    Rejected(String),
    #[error("request could not be encoded: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("endpoint failed: {0}")]
    Rejected(String),
    #[error("endpoint did not answer in time")]
    TimedOut,
    #[error("a submission is already in flight")]
    AlreadyInFlight,
    #[error("submission engine is not running")]
    EngineUnavailable,
}

/// Tags one endpoint call: `owner` scopes the in-flight limit (one wizard
/// session), `submission` is the id the session is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket {
    pub owner: u64,
    pub submission: SubmissionId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SubmissionCompleted {
        ticket: SubmissionTicket,
        result: Result<ListingId, SubmissionError>,
    },
}

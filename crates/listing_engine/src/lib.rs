//! Listing engine: effect execution for the wizard (previews, submission, files).
mod endpoint;
mod engine;
mod persist;
mod pipeline;
mod preview;
mod types;

pub use endpoint::{
    generate_listing_id, ListingCreationEndpoint, MockEndpointSettings, MockListingEndpoint,
    StoredListing,
};
pub use engine::SubmissionEngine;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use pipeline::{SubmissionPipeline, SubmissionSettings};
pub use preview::{PreviewError, PreviewRegistry};
pub use types::{
    CreatedListing, EndpointError, EngineEvent, ListingStatus, SubmissionError, SubmissionTicket,
};

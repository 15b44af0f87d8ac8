use crate::{ListingId, ListingRequest, PreviewHandle, SourceHandle, SubmissionId};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Bind a freshly minted preview handle to the picked file.
    AcquirePreview {
        handle: PreviewHandle,
        source: SourceHandle,
    },
    /// Free a preview handle that is no longer referenced by the draft.
    ReleasePreview { handle: PreviewHandle },
    /// Hand the packaged listing to the creation endpoint. The result must
    /// come back tagged with the same `submission`.
    SubmitListing {
        submission: SubmissionId,
        request: ListingRequest,
    },
    /// Show the newly created listing.
    NavigateToListing { listing_id: ListingId },
}

//! Listing core: pure wizard state machine and view-model helpers.
mod draft;
mod effect;
mod images;
mod msg;
mod request;
mod state;
mod update;
mod validation;
mod view_model;

pub use draft::{
    AuthCollaborator, Category, Condition, ContactMethod, CurrentUser, FieldEdit, FieldEditError,
    ListingDraft,
};
pub use effect::Effect;
pub use images::{
    ImageAttachment, ImageAttachmentManager, ImageError, PreviewHandle, PreviewId, SourceHandle,
    MAX_IMAGES, PREVIEW_URI_PREFIX,
};
pub use msg::Msg;
pub use request::{ListingId, ListingRequest};
pub use state::{Step, SubmissionId, SubmissionState, WizardError, WizardSession, WIZARD_STEPS};
pub use update::update;
pub use validation::{
    validate_contact, validate_details, validate_listing, validate_photos, ValidationError,
    MIN_DESCRIPTION_CHARS,
};
pub use view_model::{ImageTileView, ReviewSummary, StepIndicator, WizardViewModel};

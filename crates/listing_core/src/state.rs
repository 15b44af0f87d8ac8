use thiserror::Error;

use crate::images::ImageError;
use crate::validation::ValidationError;
use crate::view_model::WizardViewModel;
use crate::{AuthCollaborator, CurrentUser, ListingDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Step {
    #[default]
    Details,
    Photos,
    Contact,
    Review,
    /// Terminal: the listing was created.
    Submitted,
}

/// The four steps shown in the stepper, in order.
pub const WIZARD_STEPS: [Step; 4] = [Step::Details, Step::Photos, Step::Contact, Step::Review];

impl Step {
    /// 1-based position in the stepper; `Submitted` sits past the last step.
    pub fn number(self) -> u8 {
        match self {
            Step::Details => 1,
            Step::Photos => 2,
            Step::Contact => 3,
            Step::Review => 4,
            Step::Submitted => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::Details => "Details",
            Step::Photos => "Photos",
            Step::Contact => "Contact",
            Step::Review => "Review",
            Step::Submitted => "Submitted",
        }
    }

    pub fn next(self) -> Option<Step> {
        match self {
            Step::Details => Some(Step::Photos),
            Step::Photos => Some(Step::Contact),
            Step::Contact => Some(Step::Review),
            Step::Review | Step::Submitted => None,
        }
    }

    pub fn previous(self) -> Option<Step> {
        match self {
            Step::Photos => Some(Step::Details),
            Step::Contact => Some(Step::Photos),
            Step::Review => Some(Step::Contact),
            Step::Details | Step::Submitted => None,
        }
    }
}

/// Identifies one endpoint call made by a session. Results carrying any other id are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubmissionId(pub u64);

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error("Failed to create listing. Please try again.")]
    SubmissionFailed,
}

/// One run of the create-listing wizard, owned by a single UI composition.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardSession {
    step: Step,
    draft: ListingDraft,
    last_error: Option<WizardError>,
    submission: SubmissionState,
    in_flight: Option<SubmissionId>,
    next_submission: u64,
    seller: CurrentUser,
    closed: bool,
    dirty: bool,
}

impl WizardSession {
    pub fn new(seller: CurrentUser) -> Self {
        Self {
            step: Step::Details,
            draft: ListingDraft::new(seller.university.clone()),
            last_error: None,
            submission: SubmissionState::Idle,
            in_flight: None,
            next_submission: 1,
            seller,
            closed: false,
            dirty: true,
        }
    }

    /// Opens a wizard for the signed-in user, or `None` when nobody is signed in.
    pub fn open(auth: &impl AuthCollaborator) -> Option<Self> {
        auth.current_user().map(Self::new)
    }

    pub fn view(&self) -> WizardViewModel {
        WizardViewModel::from_session(self)
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &ListingDraft {
        &self.draft
    }

    pub fn last_error(&self) -> Option<&WizardError> {
        self.last_error.as_ref()
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.submission
    }

    /// The endpoint call this session is waiting on, if any.
    pub fn pending_submission(&self) -> Option<SubmissionId> {
        self.in_flight
    }

    pub fn seller(&self) -> &CurrentUser {
        &self.seller
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_pending(&self) -> bool {
        self.submission == SubmissionState::Pending
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn draft_mut(&mut self) -> &mut ListingDraft {
        &mut self.draft
    }

    pub(crate) fn go_to(&mut self, step: Step) {
        self.step = step;
        self.mark_dirty();
    }

    pub(crate) fn set_error(&mut self, error: impl Into<WizardError>) {
        self.last_error = Some(error.into());
        self.mark_dirty();
    }

    pub(crate) fn clear_error(&mut self) {
        if self.last_error.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_submission(&mut self, submission: SubmissionState) {
        self.submission = submission;
        if submission != SubmissionState::Pending {
            self.in_flight = None;
        }
        self.mark_dirty();
    }

    /// Moves to `Pending` under a fresh id.
    pub(crate) fn begin_submission(&mut self) -> SubmissionId {
        let id = SubmissionId(self.next_submission);
        self.next_submission += 1;
        self.submission = SubmissionState::Pending;
        self.in_flight = Some(id);
        self.mark_dirty();
        id
    }

    pub(crate) fn close(&mut self) {
        self.closed = true;
        self.mark_dirty();
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User changed one form field.
    EditField(crate::FieldEdit),
    /// User picked one or more files in the photo step.
    AddImages(Vec<crate::SourceHandle>),
    /// User clicked the remove button on a photo tile.
    RemoveImage(usize),
    /// User clicked Next (Publish on the review step).
    Next,
    /// User clicked Back.
    Back,
    /// User clicked Publish.
    Submit,
    /// The creation endpoint accepted the listing.
    SubmissionSucceeded {
        submission: crate::SubmissionId,
        listing_id: crate::ListingId,
    },
    /// The creation endpoint failed; the reason is only logged.
    SubmissionFailed {
        submission: crate::SubmissionId,
        reason: String,
    },
    /// The wizard was navigated away from or torn down.
    Dismissed,
}

impl Msg {
    /// The submission a completion message answers, if it is one.
    pub fn submission(&self) -> Option<crate::SubmissionId> {
        match self {
            Msg::SubmissionSucceeded { submission, .. }
            | Msg::SubmissionFailed { submission, .. } => Some(*submission),
            _ => None,
        }
    }

    /// Messages that originate from user interaction with the form.
    pub fn is_user_action(&self) -> bool {
        matches!(
            self,
            Msg::EditField(_)
                | Msg::AddImages(_)
                | Msg::RemoveImage(_)
                | Msg::Next
                | Msg::Back
                | Msg::Submit
        )
    }
}

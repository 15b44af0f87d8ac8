use crate::{ContactMethod, Step, SubmissionState, WizardSession, WIZARD_STEPS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepIndicator {
    pub number: u8,
    pub label: &'static str,
    pub active: bool,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTileView {
    pub uri: String,
    pub is_main: bool,
}

/// Everything the review step shows before publishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSummary {
    pub title: String,
    pub price: String,
    pub condition: String,
    pub category: String,
    pub location: String,
    pub contact: String,
    pub description: String,
    pub photo_count: String,
    pub main_image: Option<String>,
    pub seller_initial: char,
    pub seller_name: String,
    pub seller_university: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardViewModel {
    pub step: Step,
    pub steps: Vec<StepIndicator>,
    pub error_message: Option<String>,
    pub submission: SubmissionState,
    pub busy: bool,
    pub can_go_back: bool,
    pub primary_action: String,
    pub images: Vec<ImageTileView>,
    pub can_add_more: bool,
    pub review: Option<ReviewSummary>,
    pub closed: bool,
}

impl WizardViewModel {
    pub(crate) fn from_session(session: &WizardSession) -> Self {
        let step = session.step();
        let busy = session.is_pending();
        let images = session.draft().images();

        let steps = WIZARD_STEPS
            .iter()
            .map(|candidate| StepIndicator {
                number: candidate.number(),
                label: candidate.label(),
                active: *candidate == step,
                completed: step > *candidate,
            })
            .collect();

        let primary_action = match step {
            Step::Review if busy => "Publishing...".to_string(),
            Step::Review => "Publish Listing".to_string(),
            Step::Submitted => "Published".to_string(),
            other => match other.next() {
                Some(next) => format!("Next: {}", next.label()),
                None => String::new(),
            },
        };

        let tiles = images
            .attachments()
            .iter()
            .enumerate()
            .map(|(index, attachment)| ImageTileView {
                uri: attachment.preview().uri().to_string(),
                is_main: index == 0,
            })
            .collect();

        let review = (step == Step::Review).then(|| review_summary(session));

        Self {
            step,
            steps,
            error_message: session.last_error().map(ToString::to_string),
            submission: session.submission_state(),
            busy,
            can_go_back: step.previous().is_some() && !busy,
            primary_action,
            images: tiles,
            can_add_more: images.can_add_more(),
            review,
            closed: session.is_closed(),
        }
    }
}

fn review_summary(session: &WizardSession) -> ReviewSummary {
    let draft = session.draft();
    let seller = session.seller();
    let count = draft.images().len();

    let price = match draft.price_value() {
        Some(value) => format!("${value:.2}"),
        None => "$--".to_string(),
    };
    let contact = match draft.contact_method {
        ContactMethod::Phone => format!("Phone: {}", draft.phone.trim()),
        ContactMethod::InApp => "In-app messaging".to_string(),
    };
    let description = if draft.description.trim().is_empty() {
        "No description provided.".to_string()
    } else {
        draft.description.clone()
    };
    let photo_count = if count == 1 {
        "1 photo".to_string()
    } else {
        format!("{count} photos")
    };

    ReviewSummary {
        title: draft.title.clone(),
        price,
        condition: draft.condition.to_string(),
        category: draft.category.to_string(),
        location: draft.location.clone(),
        contact,
        description,
        photo_count,
        main_image: draft
            .images()
            .main_image()
            .map(|attachment| attachment.preview().uri().to_string()),
        seller_initial: seller.name.chars().next().unwrap_or('U'),
        seller_name: seller.name.clone(),
        seller_university: seller.university.clone(),
    }
}

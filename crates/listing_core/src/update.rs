use bazar_logging::{bazar_debug, bazar_info, bazar_warn};

use crate::validation::{validate_contact, validate_details, validate_photos};
use crate::{
    Effect, ListingId, ListingRequest, Msg, PreviewHandle, SourceHandle, Step, SubmissionState,
    WizardError, WizardSession,
};

/// Pure update function: applies a message to the session and returns any effects.
pub fn update(mut session: WizardSession, msg: Msg) -> (WizardSession, Vec<Effect>) {
    if let Some(reason) = ignore_reason(&session, &msg) {
        bazar_debug!("Ignoring {:?}: {}", msg, reason);
        return (session, Vec::new());
    }

    let effects = match msg {
        Msg::EditField(edit) => {
            session.draft_mut().apply(edit);
            session.mark_dirty();
            Vec::new()
        }
        Msg::AddImages(sources) => add_images(&mut session, sources),
        Msg::RemoveImage(index) => match session.draft_mut().images.remove_image(index) {
            Ok(handle) => {
                session.clear_error();
                session.mark_dirty();
                vec![Effect::ReleasePreview { handle }]
            }
            Err(err) => {
                session.set_error(err);
                Vec::new()
            }
        },
        Msg::Next => advance(&mut session),
        Msg::Back => {
            if let Some(previous) = session.step().previous() {
                session.clear_error();
                session.go_to(previous);
            }
            Vec::new()
        }
        Msg::Submit => submit(&mut session),
        Msg::SubmissionSucceeded { listing_id, .. } => complete(&mut session, listing_id),
        Msg::SubmissionFailed { reason, .. } => {
            bazar_warn!("Listing submission failed: {}", reason);
            session.set_submission(SubmissionState::Failed);
            session.set_error(WizardError::SubmissionFailed);
            Vec::new()
        }
        Msg::Dismissed => {
            let effects = release_all(&mut session);
            session.close();
            effects
        }
    };

    (session, effects)
}

fn ignore_reason(session: &WizardSession, msg: &Msg) -> Option<&'static str> {
    if session.is_closed() {
        return Some("wizard closed");
    }
    if let Some(submission) = msg.submission() {
        if !session.is_pending() {
            return Some("no submission in flight");
        }
        if session.pending_submission() != Some(submission) {
            return Some("result for another submission");
        }
    }
    if msg.is_user_action() {
        if session.is_pending() {
            return Some("submission in flight");
        }
        if session.step() == Step::Submitted {
            return Some("listing already submitted");
        }
    }
    None
}

fn add_images(session: &mut WizardSession, sources: Vec<SourceHandle>) -> Vec<Effect> {
    if sources.is_empty() {
        return Vec::new();
    }
    let added = session
        .draft_mut()
        .images
        .add_images(sources)
        .map(|added| {
            added
                .iter()
                .map(|attachment| Effect::AcquirePreview {
                    handle: attachment.preview().clone(),
                    source: attachment.source().clone(),
                })
                .collect::<Vec<_>>()
        });
    let effects = match added {
        Ok(effects) => effects,
        Err(err) => {
            session.set_error(err);
            return Vec::new();
        }
    };
    session.clear_error();
    session.mark_dirty();
    effects
}

fn advance(session: &mut WizardSession) -> Vec<Effect> {
    let checked = match session.step() {
        Step::Details => validate_details(session.draft()),
        Step::Photos => validate_photos(session.draft()),
        Step::Contact => validate_contact(session.draft()),
        Step::Review => return submit(session),
        Step::Submitted => return Vec::new(),
    };
    match checked {
        Ok(()) => {
            if let Some(next) = session.step().next() {
                session.clear_error();
                session.go_to(next);
            }
        }
        Err(err) => session.set_error(err),
    }
    Vec::new()
}

fn submit(session: &mut WizardSession) -> Vec<Effect> {
    match ListingRequest::from_draft(session.draft(), session.seller()) {
        Ok(request) => {
            bazar_info!(
                "Submitting listing title_len={} images={}",
                request.title.len(),
                request.images.len()
            );
            session.clear_error();
            let submission = session.begin_submission();
            vec![Effect::SubmitListing {
                submission,
                request,
            }]
        }
        Err(err) => {
            bazar_debug!("Submission blocked by {:?}", err);
            session.go_to(err.step());
            session.set_error(err);
            Vec::new()
        }
    }
}

fn complete(session: &mut WizardSession, listing_id: ListingId) -> Vec<Effect> {
    bazar_info!("Listing created listing_id={}", listing_id);
    session.set_submission(SubmissionState::Succeeded);
    session.clear_error();
    session.go_to(Step::Submitted);
    let mut effects = release_all(session);
    effects.push(Effect::NavigateToListing { listing_id });
    effects
}

fn release_all(session: &mut WizardSession) -> Vec<Effect> {
    let handles: Vec<PreviewHandle> = session.draft_mut().images.dispose_all();
    if !handles.is_empty() {
        session.mark_dirty();
    }
    handles
        .into_iter()
        .map(|handle| Effect::ReleasePreview { handle })
        .collect()
}

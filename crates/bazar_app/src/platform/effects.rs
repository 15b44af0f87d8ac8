use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bazar_logging::{bazar_debug, bazar_error, bazar_info, bazar_warn};
use chrono::Utc;
use listing_core::{Effect, ListingId, Msg};
use listing_engine::{
    EngineEvent, MockListingEndpoint, PreviewRegistry, SubmissionEngine, SubmissionPipeline,
    SubmissionTicket,
};

use super::config::AppConfig;

/// Executes wizard effects against the engine and turns engine events back into messages.
///
/// Submissions are tagged with the current session number. Once a session is
/// retired its late completions are dropped here and never reach the next wizard.
pub struct EffectRunner {
    engine: SubmissionEngine,
    previews: PreviewRegistry,
    session: u64,
    deferred: VecDeque<EngineEvent>,
}

impl EffectRunner {
    pub fn new(config: &AppConfig) -> io::Result<Self> {
        let endpoint = MockListingEndpoint::new(config.endpoint_settings())
            .with_clock(Arc::new(|| Utc::now().to_rfc3339()));
        let pipeline = SubmissionPipeline::new(Arc::new(endpoint), config.submission_settings());
        let engine = SubmissionEngine::new(Arc::new(pipeline))?;
        Ok(Self {
            engine,
            previews: PreviewRegistry::new(),
            session: 0,
            deferred: VecDeque::new(),
        })
    }

    /// Ends the current wizard session. Its pending results are discarded.
    pub fn retire_session(&mut self) {
        bazar_debug!("Retiring wizard session {}", self.session);
        self.session += 1;
    }

    /// Runs effects in order. Returns the listings the UI should navigate to.
    pub fn enqueue(&mut self, effects: Vec<Effect>) -> Vec<ListingId> {
        let mut navigations = Vec::new();
        for effect in effects {
            match effect {
                Effect::AcquirePreview { handle, source } => {
                    if let Err(err) = self.previews.acquire(&handle, &source) {
                        bazar_error!("AcquirePreview failed: {}", err);
                    }
                }
                Effect::ReleasePreview { handle } => {
                    if let Err(err) = self.previews.release(&handle) {
                        bazar_error!("ReleasePreview failed: {}", err);
                    }
                }
                Effect::SubmitListing {
                    submission,
                    request,
                } => {
                    bazar_info!(
                        "SubmitListing session={} submission={} title_len={} images={}",
                        self.session,
                        submission,
                        request.title.len(),
                        request.images.len()
                    );
                    let ticket = SubmissionTicket {
                        owner: self.session,
                        submission,
                    };
                    if let Err(err) = self.engine.submit(ticket, request) {
                        bazar_error!("SubmitListing could not reach the engine: {}", err);
                        self.deferred.push_back(EngineEvent::SubmissionCompleted {
                            ticket,
                            result: Err(err),
                        });
                    }
                }
                Effect::NavigateToListing { listing_id } => navigations.push(listing_id),
            }
        }
        navigations
    }

    pub fn poll_events(&mut self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.deferred.pop_front() {
            inbox.extend(self.accept(event));
        }
        while let Some(event) = self.engine.try_recv() {
            inbox.extend(self.accept(event));
        }
        inbox
    }

    /// Blocks until a result for the current session arrives or `timeout` passes.
    pub fn wait_event(&mut self, timeout: Duration) -> Option<Msg> {
        while let Some(event) = self.deferred.pop_front() {
            if let Some(msg) = self.accept(event) {
                return Some(msg);
            }
        }
        let deadline = Instant::now() + timeout;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                return None;
            }
            let event = self.engine.recv_timeout(left)?;
            if let Some(msg) = self.accept(event) {
                return Some(msg);
            }
        }
    }

    pub fn live_previews(&self) -> usize {
        self.previews.live_count()
    }

    fn accept(&self, event: EngineEvent) -> Option<Msg> {
        let EngineEvent::SubmissionCompleted { ticket, .. } = &event;
        if ticket.owner != self.session {
            bazar_debug!(
                "Dropping result of submission {} from retired session {}",
                ticket.submission,
                ticket.owner
            );
            return None;
        }
        Some(map_event(event))
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SubmissionCompleted { ticket, result } => match result {
            Ok(listing_id) => Msg::SubmissionSucceeded {
                submission: ticket.submission,
                listing_id,
            },
            Err(err) => {
                bazar_warn!("Submission {} failed: {}", ticket.submission, err);
                Msg::SubmissionFailed {
                    submission: ticket.submission,
                    reason: err.to_string(),
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listing_core::{
        update, CurrentUser, FieldEdit, SourceHandle, SubmissionId, SubmissionState, WizardSession,
    };
    use listing_engine::SubmissionError;

    fn seller() -> CurrentUser {
        CurrentUser {
            id: "u".to_string(),
            name: "Ada".to_string(),
            email: None,
            university: "State".to_string(),
        }
    }

    /// Drives a fresh session up to `Submit`, running its effects.
    fn submit_new_session(runner: &mut EffectRunner, title: &str) -> WizardSession {
        let msgs = [
            Msg::EditField(FieldEdit::Title(title.to_string())),
            Msg::EditField(FieldEdit::Price("12".to_string())),
            Msg::EditField(FieldEdit::Description("Barely used, pickup on campus".to_string())),
            Msg::Next,
            Msg::AddImages(vec![SourceHandle::from("photo.jpg")]),
            Msg::Next,
            Msg::Next,
            Msg::Submit,
        ];
        let mut session = WizardSession::new(seller());
        for msg in msgs {
            let (next, effects) = update(session, msg);
            runner.enqueue(effects);
            session = next;
        }
        assert_eq!(session.submission_state(), SubmissionState::Pending);
        session
    }

    #[test]
    fn engine_results_become_wizard_messages() {
        let ticket = SubmissionTicket {
            owner: 0,
            submission: SubmissionId(3),
        };
        let ok = map_event(EngineEvent::SubmissionCompleted {
            ticket,
            result: Ok(ListingId::new("item-abc123")),
        });
        assert_eq!(
            ok,
            Msg::SubmissionSucceeded {
                submission: SubmissionId(3),
                listing_id: ListingId::new("item-abc123")
            }
        );

        let failed = map_event(EngineEvent::SubmissionCompleted {
            ticket,
            result: Err(SubmissionError::TimedOut),
        });
        assert!(matches!(
            failed,
            Msg::SubmissionFailed {
                submission: SubmissionId(3),
                ..
            }
        ));
    }

    #[test]
    fn preview_effects_keep_registry_in_step_with_the_draft() {
        let config = AppConfig {
            mock_latency_ms: 0,
            ..AppConfig::default()
        };
        let mut runner = EffectRunner::new(&config).expect("runtime");

        let msgs = [
            Msg::AddImages(vec![SourceHandle::from("a.jpg"), SourceHandle::from("b.jpg")]),
            Msg::RemoveImage(0),
            Msg::AddImages(vec![SourceHandle::from("c.jpg")]),
            Msg::Dismissed,
        ];
        let mut session = WizardSession::new(seller());
        for msg in msgs {
            let (next, effects) = update(session, msg);
            assert!(runner.enqueue(effects).is_empty());
            assert_eq!(runner.live_previews(), next.draft().images().len());
            session = next;
        }
        assert_eq!(runner.live_previews(), 0);
    }

    #[test]
    fn dismissed_session_result_does_not_reach_the_next_session() {
        bazar_logging::initialize_for_tests();
        let config = AppConfig {
            mock_latency_ms: 300,
            ..AppConfig::default()
        };
        let mut runner = EffectRunner::new(&config).expect("runtime");

        let first = submit_new_session(&mut runner, "Desk lamp");
        let (first, effects) = update(first, Msg::Dismissed);
        runner.enqueue(effects);
        assert!(first.is_closed());
        runner.retire_session();

        let second = submit_new_session(&mut runner, "Bike lock");
        let submission = second.pending_submission().expect("pending id");

        let msg = runner
            .wait_event(Duration::from_secs(5))
            .expect("result for the open session");
        assert!(
            matches!(msg, Msg::SubmissionSucceeded { submission: s, .. } if s == submission),
            "unexpected {msg:?}"
        );
        let (second, effects) = update(second, msg);
        assert_eq!(second.submission_state(), SubmissionState::Succeeded);
        let navigations = runner.enqueue(effects);
        assert_eq!(navigations.len(), 1);

        std::thread::sleep(Duration::from_millis(400));
        assert!(runner.poll_events().is_empty());
        assert_eq!(runner.live_previews(), 0);
    }

    #[test]
    fn undeliverable_submission_comes_back_as_failure() {
        let config = AppConfig {
            mock_latency_ms: 0,
            ..AppConfig::default()
        };
        let mut runner = EffectRunner::new(&config).expect("runtime");
        let session = submit_new_session(&mut runner, "Desk lamp");
        let submission = session.pending_submission().expect("pending id");
        // Drain the real completion so only the injected one remains.
        assert!(runner.wait_event(Duration::from_secs(5)).is_some());

        runner.deferred.push_back(EngineEvent::SubmissionCompleted {
            ticket: SubmissionTicket {
                owner: 0,
                submission,
            },
            result: Err(SubmissionError::EngineUnavailable),
        });
        let inbox = runner.poll_events();
        assert_eq!(inbox.len(), 1);
        let (session, _) = update(session, inbox.into_iter().next().expect("failure"));
        assert_eq!(session.submission_state(), SubmissionState::Failed);
        assert!(!session.is_pending());
    }
}

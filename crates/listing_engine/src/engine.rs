use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use bazar_logging::bazar_debug;
use listing_core::ListingRequest;

use crate::{EngineEvent, SubmissionError, SubmissionPipeline, SubmissionTicket};

enum EngineCommand {
    Submit {
        ticket: SubmissionTicket,
        request: ListingRequest,
    },
}

/// Runs submissions on a background runtime and reports completions over a
/// channel that the UI loop drains between input events.
pub struct SubmissionEngine {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl SubmissionEngine {
    pub fn new(pipeline: Arc<SubmissionPipeline>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_time()
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let pipeline = pipeline.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(&pipeline, command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    /// Queues a submission. Fails only when the engine thread has stopped.
    pub fn submit(
        &self,
        ticket: SubmissionTicket,
        request: ListingRequest,
    ) -> Result<(), SubmissionError> {
        self.cmd_tx
            .send(EngineCommand::Submit { ticket, request })
            .map_err(|_| SubmissionError::EngineUnavailable)
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    pipeline: &SubmissionPipeline,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit { ticket, request } => {
            bazar_debug!(
                "Engine submitting {:?} owner={} submission={}",
                request.title,
                ticket.owner,
                ticket.submission
            );
            let result = pipeline.submit(ticket.owner, &request).await;
            let _ = event_tx.send(EngineEvent::SubmissionCompleted { ticket, result });
        }
    }
}

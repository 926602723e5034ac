use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use thcunews_models::{ModelKind, NewsAnalyzer, PredictResponse};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::handle::{ShellHandle, ShellRequest};
use crate::intake;
use crate::state::{AnalysisOutcome, ShellState};
use crate::ShellError;

/// Sent back into the loop by a task the loop spawned.
enum Settled {
    Analysis {
        generation: u64,
        result: Result<PredictResponse>,
        reply: oneshot::Sender<Result<AnalysisOutcome>>,
    },
    FileRead {
        path: PathBuf,
        read: Result<String, ShellError>,
        reply: oneshot::Sender<Result<()>>,
    },
}

/// Starts the service loop on the current runtime.
pub fn spawn(analyzer: Arc<dyn NewsAnalyzer>, model: ModelKind) -> (ShellHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run(rx, analyzer, ShellState::new(model)));
    (ShellHandle::new(tx), task)
}

pub async fn run(
    mut rx: mpsc::UnboundedReceiver<ShellRequest>,
    analyzer: Arc<dyn NewsAnalyzer>,
    mut state: ShellState,
) {
    tracing::info!(target: "thcunews_shell", analyzer = analyzer.name(), "service loop started");
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Settled>();

    loop {
        tokio::select! {
            request = rx.recv() => {
                let Some(request) = request else {
                    tracing::info!(target: "thcunews_shell", "all handles dropped");
                    break;
                };
                if !handle_request(request, &mut state, &analyzer, &done_tx) {
                    break;
                }
            }
            Some(done) = done_rx.recv() => settle(done, &mut state),
        }
    }

    tracing::info!(target: "thcunews_shell", "service loop exited");
}

fn settle(done: Settled, state: &mut ShellState) {
    match done {
        Settled::Analysis {
            generation,
            result,
            reply,
        } => {
            let outcome = state.finish_analysis(generation, result);
            match &outcome {
                Ok(AnalysisOutcome::Completed(response)) => tracing::info!(
                    target: "thcunews_shell",
                    generation,
                    category = %response.category,
                    confidence = response.confidence,
                    "analysis completed"
                ),
                Ok(AnalysisOutcome::Discarded) => tracing::info!(
                    target: "thcunews_shell",
                    generation,
                    "stale analysis discarded"
                ),
                Err(error) => tracing::warn!(
                    target: "thcunews_shell",
                    generation,
                    error = %error,
                    "analysis failed"
                ),
            }
            let _ = reply.send(outcome.map_err(Into::into));
        }
        Settled::FileRead { path, read, reply } => {
            // An analysis may have started while the file was being read.
            let result = state.apply_file(read);
            match &result {
                Ok(()) => tracing::debug!(
                    target: "thcunews_shell",
                    path = %path.display(),
                    "file loaded"
                ),
                Err(error) => tracing::warn!(
                    target: "thcunews_shell",
                    error = %error,
                    "file rejected"
                ),
            }
            let _ = reply.send(result.map_err(Into::into));
        }
    }
}

/// Returns `false` once the loop should stop. Slow work (analysis and file
/// reads) is spawned and reported back as [`Settled`].
fn handle_request(
    request: ShellRequest,
    state: &mut ShellState,
    analyzer: &Arc<dyn NewsAnalyzer>,
    done_tx: &mpsc::UnboundedSender<Settled>,
) -> bool {
    match request {
        ShellRequest::SetText { text, reply } => {
            tracing::debug!(target: "thcunews_shell", text_len = text.len(), "SetText");
            let _ = reply.send(state.set_text(text).map_err(Into::into));
        }
        ShellRequest::LoadFile { path, reply } => {
            tracing::info!(target: "thcunews_shell", path = %path.display(), "LoadFile");
            if state.is_loading() {
                tracing::debug!(target: "thcunews_shell", "LoadFile refused while loading");
                let _ = reply.send(Err(ShellError::Busy.into()));
                return true;
            }
            let done_tx = done_tx.clone();
            tokio::spawn(async move {
                let read = intake::read_text_file(&path).await;
                let _ = done_tx.send(Settled::FileRead { path, read, reply });
            });
        }
        ShellRequest::SelectModel { model, reply } => {
            tracing::info!(target: "thcunews_shell", model = %model, "SelectModel");
            state.select_model(model);
            let _ = reply.send(Ok(()));
        }
        ShellRequest::FillSample { reply } => {
            tracing::debug!(target: "thcunews_shell", "FillSample");
            let _ = reply.send(state.fill_sample().map_err(Into::into));
        }
        ShellRequest::Clear { reply } => {
            tracing::info!(target: "thcunews_shell", "Clear");
            state.clear();
            let _ = reply.send(Ok(()));
        }
        ShellRequest::Analyze { reply } => match state.begin_analysis() {
            Ok(ticket) => {
                tracing::info!(
                    target: "thcunews_shell",
                    generation = ticket.generation,
                    model = %ticket.model,
                    text_len = ticket.text.chars().count(),
                    "Analyze"
                );
                let analyzer = Arc::clone(analyzer);
                let done_tx = done_tx.clone();
                tokio::spawn(async move {
                    let result = analyzer.analyze(&ticket.text, ticket.model).await;
                    let _ = done_tx.send(Settled::Analysis {
                        generation: ticket.generation,
                        result,
                        reply,
                    });
                });
            }
            Err(error) => {
                tracing::debug!(target: "thcunews_shell", error = %error, "Analyze refused");
                let _ = reply.send(Err(error.into()));
            }
        },
        ShellRequest::Snapshot { reply } => {
            let _ = reply.send(Ok(state.snapshot()));
        }
        ShellRequest::Shutdown { reply } => {
            tracing::info!(target: "thcunews_shell", "Shutdown - exiting service loop");
            let _ = reply.send(Ok(()));
            return false;
        }
    }
    true
}

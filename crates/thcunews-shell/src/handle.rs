use std::path::PathBuf;

use anyhow::{anyhow, Result};
use thcunews_models::ModelKind;
use tokio::sync::{mpsc, oneshot};

use crate::state::{AnalysisOutcome, ShellSnapshot};

#[derive(Debug)]
pub enum ShellRequest {
    SetText {
        text: String,
        reply: oneshot::Sender<Result<()>>,
    },
    LoadFile {
        path: PathBuf,
        reply: oneshot::Sender<Result<()>>,
    },
    SelectModel {
        model: ModelKind,
        reply: oneshot::Sender<Result<()>>,
    },
    FillSample {
        reply: oneshot::Sender<Result<()>>,
    },
    Clear {
        reply: oneshot::Sender<Result<()>>,
    },
    /// Replied to when the analysis settles, not when it is accepted.
    Analyze {
        reply: oneshot::Sender<Result<AnalysisOutcome>>,
    },
    Snapshot {
        reply: oneshot::Sender<Result<ShellSnapshot>>,
    },
    Shutdown {
        reply: oneshot::Sender<Result<()>>,
    },
}

#[derive(Clone, Debug)]
pub struct ShellHandle {
    tx: mpsc::UnboundedSender<ShellRequest>,
}

impl ShellHandle {
    pub fn new(tx: mpsc::UnboundedSender<ShellRequest>) -> Self {
        Self { tx }
    }

    async fn round_trip<T, F>(&self, build_request: F) -> Result<T>
    where
        F: FnOnce(oneshot::Sender<Result<T>>) -> ShellRequest,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(build_request(reply_tx))
            .map_err(|_| anyhow!("shell request channel closed"))?;
        reply_rx
            .await
            .map_err(|_| anyhow!("shell reply channel closed"))?
    }

    pub async fn set_text(&self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        self.round_trip(|reply| ShellRequest::SetText { text, reply })
            .await
    }

    pub async fn load_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        self.round_trip(|reply| ShellRequest::LoadFile { path, reply })
            .await
    }

    pub async fn select_model(&self, model: ModelKind) -> Result<()> {
        self.round_trip(|reply| ShellRequest::SelectModel { model, reply })
            .await
    }

    pub async fn fill_sample(&self) -> Result<()> {
        self.round_trip(|reply| ShellRequest::FillSample { reply })
            .await
    }

    pub async fn clear(&self) -> Result<()> {
        self.round_trip(|reply| ShellRequest::Clear { reply }).await
    }

    pub async fn analyze(&self) -> Result<AnalysisOutcome> {
        self.round_trip(|reply| ShellRequest::Analyze { reply }).await
    }

    pub async fn snapshot(&self) -> Result<ShellSnapshot> {
        self.round_trip(|reply| ShellRequest::Snapshot { reply })
            .await
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.round_trip(|reply| ShellRequest::Shutdown { reply })
            .await
    }
}

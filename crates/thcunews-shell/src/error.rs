use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("input text is empty")]
    EmptyInput,
    #[error("an analysis is already in flight")]
    Busy,
    #[error("unsupported file type `{mime}` for {}; only .txt files are accepted", .path.display())]
    UnsupportedFile { path: PathBuf, mime: String },
    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("analysis failed: {0}")]
    AnalysisFailed(String),
}

use serde::Serialize;
use thcunews_models::{ModelKind, PredictResponse, SAMPLE_TEXT};

use crate::ShellError;

pub const UNSUPPORTED_FILE_NOTICE: &str = "仅支持 .txt 文本文件";
pub const READ_FAILED_NOTICE: &str = "文件读取失败";
pub const ANALYSIS_FAILED_NOTICE: &str = "分析过程中发生错误，请重试。";

/// Everything the shell owns. Only the service loop mutates it.
#[derive(Debug, Default)]
pub struct ShellState {
    text: String,
    model: ModelKind,
    loading: bool,
    result: Option<PredictResponse>,
    notice: Option<String>,
    /// Bumped by every accepted analysis and by `clear`; a completion
    /// carrying an older value is stale.
    generation: u64,
}

/// Read-only copy handed out to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShellSnapshot {
    pub text: String,
    pub model: ModelKind,
    pub loading: bool,
    pub result: Option<PredictResponse>,
    pub notice: Option<String>,
}

/// Work order for one analyzer call.
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    pub generation: u64,
    pub text: String,
    pub model: ModelKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Completed(PredictResponse),
    /// The input was cleared while the request was pending.
    Discarded,
}

impl ShellState {
    pub fn new(model: ModelKind) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        ShellSnapshot {
            text: self.text.clone(),
            model: self.model,
            loading: self.loading,
            result: self.result.clone(),
            notice: self.notice.clone(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Input is locked while a request is pending.
    pub fn set_text(&mut self, text: String) -> Result<(), ShellError> {
        if self.loading {
            return Err(ShellError::Busy);
        }
        self.text = text;
        self.notice = None;
        Ok(())
    }

    pub fn fill_sample(&mut self) -> Result<(), ShellError> {
        self.set_text(SAMPLE_TEXT.to_string())
    }

    pub fn select_model(&mut self, model: ModelKind) {
        self.model = model;
    }

    /// Applies the outcome of a file read. Text is only replaced on success.
    pub fn apply_file(&mut self, read: Result<String, ShellError>) -> Result<(), ShellError> {
        if self.loading {
            return Err(ShellError::Busy);
        }
        match read {
            Ok(content) => self.set_text(content),
            Err(err) => {
                let notice = match err {
                    ShellError::UnsupportedFile { .. } => UNSUPPORTED_FILE_NOTICE,
                    _ => READ_FAILED_NOTICE,
                };
                self.notice = Some(notice.to_string());
                Err(err)
            }
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.result = None;
        self.notice = None;
        if self.loading {
            self.loading = false;
            self.generation += 1;
        }
    }

    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket, ShellError> {
        if self.text.trim().is_empty() {
            return Err(ShellError::EmptyInput);
        }
        if self.loading {
            return Err(ShellError::Busy);
        }
        self.loading = true;
        self.notice = None;
        self.generation += 1;
        Ok(AnalysisTicket {
            generation: self.generation,
            text: self.text.clone(),
            model: self.model,
        })
    }

    /// A failure keeps whatever result was already on display.
    pub fn finish_analysis(
        &mut self,
        generation: u64,
        result: anyhow::Result<PredictResponse>,
    ) -> Result<AnalysisOutcome, ShellError> {
        if !self.loading || generation != self.generation {
            return Ok(AnalysisOutcome::Discarded);
        }
        self.loading = false;
        match result {
            Ok(response) => {
                self.result = Some(response.clone());
                Ok(AnalysisOutcome::Completed(response))
            }
            Err(err) => {
                self.notice = Some(ANALYSIS_FAILED_NOTICE.to_string());
                Err(ShellError::AnalysisFailed(format!("{err:#}")))
            }
        }
    }
}

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ModelKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulatorConfigError {
    #[error("confidence range [{min}, {max}) must satisfy 0.5 < min < max <= 1.0")]
    ConfidenceRange { min: f64, max: f64 },
    #[error("latency base span must be greater than 0")]
    EmptyLatencySpan,
    #[error("{model} latency offset plus base span overflows u64")]
    LatencyOverflow { model: ModelKind },
    #[error("RoBERTa latency offset ({roberta} ms) must exceed the BERT offset ({bert} ms)")]
    LatencyOrder { bert: u64, roberta: u64 },
}

/// Tunables for the mock analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Artificial delay before a result is produced.
    pub delay_ms: u64,
    /// Reported latency is drawn from `0..latency_base_span` plus the model offset.
    pub latency_base_span: u64,
    pub bert_latency_offset_ms: u64,
    pub roberta_latency_offset_ms: u64,
    pub confidence_min: f64,
    pub confidence_max: f64,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            delay_ms: 800,
            latency_base_span: 200,
            bert_latency_offset_ms: 600,
            roberta_latency_offset_ms: 750,
            confidence_min: 0.70,
            confidence_max: 0.95,
            seed: None,
        }
    }
}

impl SimulatorConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn latency_offset(&self, model: ModelKind) -> u64 {
        match model {
            ModelKind::Bert => self.bert_latency_offset_ms,
            ModelKind::Roberta => self.roberta_latency_offset_ms,
        }
    }

    /// Inclusive bounds of the latency a model can report.
    pub fn latency_bounds(&self, model: ModelKind) -> (u64, u64) {
        let offset = self.latency_offset(model);
        let top = offset.saturating_add(self.latency_base_span.saturating_sub(1));
        (offset, top)
    }

    /// The winning score must exceed half the mass so that it always stays
    /// on top of the remaining four entries. RoBERTa must report a higher
    /// floor than BERT, and no model's latency may leave `u64`.
    pub fn validate(&self) -> Result<(), SimulatorConfigError> {
        let (min, max) = (self.confidence_min, self.confidence_max);
        if !(min > 0.5 && min < max && max <= 1.0) {
            return Err(SimulatorConfigError::ConfidenceRange { min, max });
        }
        if self.latency_base_span == 0 {
            return Err(SimulatorConfigError::EmptyLatencySpan);
        }
        for model in ModelKind::ALL {
            if self.latency_offset(model).checked_add(self.latency_base_span).is_none() {
                return Err(SimulatorConfigError::LatencyOverflow { model });
            }
        }
        if self.roberta_latency_offset_ms <= self.bert_latency_offset_ms {
            return Err(SimulatorConfigError::LatencyOrder {
                bert: self.bert_latency_offset_ms,
                roberta: self.roberta_latency_offset_ms,
            });
        }
        Ok(())
    }
}

use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::PredictResponse;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    #[default]
    #[serde(rename = "BERT")]
    Bert,
    #[serde(rename = "RoBERTa")]
    Roberta,
}

impl ModelKind {
    pub const ALL: [ModelKind; 2] = [ModelKind::Bert, ModelKind::Roberta];

    pub fn label(self) -> &'static str {
        match self {
            ModelKind::Bert => "BERT",
            ModelKind::Roberta => "RoBERTa",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ModelKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bert" => Ok(ModelKind::Bert),
            "roberta" => Ok(ModelKind::Roberta),
            other => anyhow::bail!("unknown model `{other}` (expected `bert` or `roberta`)"),
        }
    }
}

/// The seam between the shell and whatever produces classifications.
///
/// The bundled implementation is [`crate::mock::MockAnalyzer`]; a network
/// backed classifier can be dropped in without touching the shell.
#[async_trait]
pub trait NewsAnalyzer: Send + Sync {
    fn name(&self) -> &'static str;
    async fn analyze(&self, text: &str, model: ModelKind) -> anyhow::Result<PredictResponse>;
}

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{simulator, SimulatorConfig, SimulatorConfigError};
use crate::{ModelKind, NewsAnalyzer, PredictResponse};

/// In-process stand-in for a classification backend.
///
/// Waits `delay_ms` on the tokio timer, then fabricates a result with
/// [`simulator::simulate`]. Never fails on its own once constructed.
#[derive(Debug)]
pub struct MockAnalyzer {
    config: SimulatorConfig,
    rng: Mutex<StdRng>,
}

impl MockAnalyzer {
    /// Rejects configs the simulator cannot draw from.
    pub fn new(config: SimulatorConfig) -> Result<Self, SimulatorConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            config,
            rng: Mutex::new(rng),
        })
    }
}

#[async_trait]
impl NewsAnalyzer for MockAnalyzer {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn analyze(&self, text: &str, model: ModelKind) -> Result<PredictResponse> {
        tokio::time::sleep(self.config.delay()).await;

        let response = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| anyhow!("simulator rng lock poisoned"))?;
            simulator::simulate(text, model, &self.config, &mut *rng)
        };

        tracing::debug!(
            target: "thcunews_models",
            model = %model,
            text_len = text.chars().count(),
            category = %response.category,
            confidence = response.confidence,
            inference_time_ms = response.inference_time_ms,
            "mock analysis finished"
        );
        Ok(response)
    }
}

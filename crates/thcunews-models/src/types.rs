use serde::{Deserialize, Serialize};

use crate::Category;

/// Number of entries in a prediction's probability distribution.
pub const TOP_K: usize = 5;

/// A classification result as returned by an analyzer.
///
/// Field names mirror the JSON shape the web front end consumed, so a real
/// backend can deserialize straight into this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Winning category.
    pub category: Category,
    /// Certainty for `category`, in `0.0..=1.0`.
    pub confidence: f64,
    /// Top-k distribution in percent, sorted descending by value.
    pub probabilities: Vec<Probability>,
    /// Reported inference latency.
    pub inference_time_ms: u64,
}

/// One bar in the distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probability {
    pub name: Category,
    /// Percentage rounded to one decimal place.
    pub value: f64,
}

impl PredictResponse {
    /// Confidence as a percentage with one decimal, as displayed.
    pub fn confidence_percent(&self) -> f64 {
        round_one_decimal(self.confidence * 100.0)
    }

    /// Sum of the displayed percentages. May fall short of 100.
    pub fn total_percent(&self) -> f64 {
        self.probabilities.iter().map(|entry| entry.value).sum()
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub mod category;
pub mod mock;
pub mod traits;
pub mod types;

pub use category::{Category, SAMPLE_TEXT};
pub use traits::{ModelKind, NewsAnalyzer};
pub use types::{PredictResponse, Probability, TOP_K};

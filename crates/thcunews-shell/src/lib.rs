pub mod error;
pub mod handle;
pub mod intake;
pub mod render;
pub mod service;
pub mod state;

pub use error::ShellError;
pub use handle::{ShellHandle, ShellRequest};
pub use state::{AnalysisOutcome, ShellSnapshot, ShellState};

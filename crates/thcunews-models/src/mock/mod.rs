pub mod analyzer;
pub mod config;
pub mod simulator;

pub use analyzer::MockAnalyzer;
pub use config::{SimulatorConfig, SimulatorConfigError};

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::CliOverrides;

#[derive(Debug, Parser)]
#[command(name = "thcunews", version, about = "Chinese news topic classification demo")]
pub struct Args {
    /// Config file; defaults to ./thcunews.toml when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify one text. Without TEXT or --file the built-in sample is used.
    Analyze {
        text: Option<String>,
        /// Read the text from a .txt file.
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
        #[arg(long, value_enum)]
        model: Option<ModelChoice>,
        /// Print the raw prediction as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
        #[command(flatten)]
        sim: SimulatorArgs,
    },
    /// Line-based session against a long-lived shell.
    Interactive {
        #[arg(long, value_enum)]
        model: Option<ModelChoice>,
        #[command(flatten)]
        sim: SimulatorArgs,
    },
    /// List categories and the keywords that select them.
    Categories,
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct SimulatorArgs {
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

impl SimulatorArgs {
    pub fn overrides(&self, model: Option<ModelChoice>) -> CliOverrides {
        CliOverrides {
            model: model.map(Into::into),
            seed: self.seed,
            delay_ms: self.delay_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModelChoice {
    Bert,
    Roberta,
}

impl From<ModelChoice> for thcunews_models::ModelKind {
    fn from(value: ModelChoice) -> Self {
        match value {
            ModelChoice::Bert => thcunews_models::ModelKind::Bert,
            ModelChoice::Roberta => thcunews_models::ModelKind::Roberta,
        }
    }
}

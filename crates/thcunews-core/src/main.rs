use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use thcunews_models::category::KEYWORD_GROUPS;
use thcunews_models::mock::MockAnalyzer;
use thcunews_models::Category;
use thcunews_shell::{render, service, AnalysisOutcome, ShellHandle};

mod cli;
mod config;
mod interactive;

use cli::Args;
use config::{AppConfig, CliOverrides};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("THCUNEWS_LOG").unwrap_or_else(|_| "thcunews=warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "thcunews starting");

    match args.command {
        cli::Command::Analyze {
            text,
            file,
            model,
            json,
            sim,
        } => {
            let config = load_config(args.config.as_deref(), &sim.overrides(model))?;
            analyze(config, text, file, json).await
        }
        cli::Command::Interactive { model, sim } => {
            let config = load_config(args.config.as_deref(), &sim.overrides(model))?;
            let (handle, task) = start_shell(&config)?;
            interactive::run(&handle).await?;
            handle.shutdown().await?;
            task.await?;
            Ok(())
        }
        cli::Command::Categories => {
            print_categories();
            Ok(())
        }
    }
}

fn load_config(explicit: Option<&Path>, overrides: &CliOverrides) -> Result<AppConfig> {
    let working_dir = std::env::current_dir().context("cannot determine working directory")?;
    Ok(AppConfig::load(explicit, &working_dir, overrides)?)
}

fn start_shell(config: &AppConfig) -> Result<(ShellHandle, tokio::task::JoinHandle<()>)> {
    let analyzer = Arc::new(MockAnalyzer::new(config.simulator.clone())?);
    Ok(service::spawn(analyzer, config.model))
}

async fn analyze(
    config: AppConfig,
    text: Option<String>,
    file: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let (handle, task) = start_shell(&config)?;

    match (text, file) {
        (_, Some(path)) => handle
            .load_file(&path)
            .await
            .with_context(|| format!("cannot use {}", path.display()))?,
        (Some(text), None) => handle.set_text(text).await?,
        (None, None) => handle.fill_sample().await?,
    }

    let model = handle.snapshot().await?.model;
    tracing::info!(model = %model, "submitting analysis");
    let response = match handle.analyze().await? {
        AnalysisOutcome::Completed(response) => response,
        AnalysisOutcome::Discarded => bail!("analysis was discarded"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", render::render_result(&response));
    }

    handle.shutdown().await?;
    task.await?;
    Ok(())
}

fn print_categories() {
    let labels: Vec<&str> = Category::ALL.iter().map(|category| category.label()).collect();
    println!("categories: {}", labels.join(" "));
    for group in KEYWORD_GROUPS {
        println!("{}: {}", group.category, group.keywords.join(" "));
    }
}

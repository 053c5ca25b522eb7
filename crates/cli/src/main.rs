//! `autoflow` CLI entry-point.
//!
//! Available sub-commands:
//! - `run`      — build, render and evaluate a workflow from a prompt.
//! - `validate` — check and evaluate a workflow JSON file.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

use engine::{EvaluationContext, Evaluator, EvaluatorConfig, Pipeline, Workflow, WorkflowBuilder};

#[derive(Parser)]
#[command(
    name = "autoflow",
    about = "Turn natural-language steps into a workflow, pseudocode and a reward",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline on a prompt.
    Run {
        /// Prompt file; reads stdin when omitted.
        path: Option<PathBuf>,
        /// Print `{ workflow, pseudocode, reward }` as JSON.
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        eval: EvalArgs,
    },
    /// Validate a workflow JSON file (an array of steps) and evaluate it.
    Validate {
        /// Path to the workflow JSON file.
        path: PathBuf,
        #[command(flatten)]
        eval: EvalArgs,
    },
}

#[derive(clap::Args)]
struct EvalArgs {
    /// Traversal ceiling as a multiple of the workflow length.
    #[arg(long, env = "AUTOFLOW_CEILING_FACTOR", default_value_t = EvaluatorConfig::default().ceiling_factor)]
    ceiling_factor: usize,
    /// Context entry `KEY=VALUE`; VALUE is parsed as JSON, or kept as a string.
    #[arg(long = "context", value_name = "KEY=VALUE", value_parser = parse_context_entry)]
    context: Vec<(String, Value)>,
}

impl EvalArgs {
    fn evaluator(&self) -> Evaluator {
        Evaluator::with_config(EvaluatorConfig {
            ceiling_factor: self.ceiling_factor,
        })
    }

    fn context(&self) -> EvaluationContext {
        self.context.iter().cloned().collect()
    }
}

fn parse_context_entry(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_owned()));
    Ok((key.to_owned(), value))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("cannot read file {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("cannot read stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run { path, json, eval } => {
            let prompt = read_input(path.as_deref())?;
            info!("running pipeline on {} bytes of prompt", prompt.len());

            let pipeline = Pipeline::new(WorkflowBuilder::default(), eval.evaluator());
            let out = pipeline.process(&prompt, &eval.context())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("Generated Pseudocode:\n{}", out.pseudocode);
                println!("Workflow Reward: {}", out.reward);
            }
        }
        Command::Validate { path, eval } => {
            let content = read_input(Some(&path))?;
            let workflow: Workflow = serde_json::from_str(&content).context("invalid workflow JSON")?;

            let reachable = match engine::validate_references(&workflow) {
                Ok(reachable) => reachable,
                Err(e) => bail!("validation failed: {e}"),
            };
            let report = eval
                .evaluator()
                .run(&workflow, &eval.context())
                .context("evaluation failed")?;

            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "steps": workflow.len(),
                    "reachable": reachable,
                    "report": report,
                }))?
            );
        }
    }

    Ok(())
}

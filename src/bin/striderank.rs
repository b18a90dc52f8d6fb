//! striderank CLI - Command-line interface for stride-rank
//!
//! Commands:
//! - analyze: Score and rank a cohort of user weeks from a JSON file
//! - config: Print the effective scoring configuration

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use serde::Serialize;
use stride_rank::types::UserActivityData;
use stride_rank::{AnalysisEngine, AnalysisError, ScoringConfig, ENGINE_VERSION};

/// striderank - Scoring engine for weekly step-challenge reward rankings
#[derive(Parser)]
#[command(name = "striderank")]
#[command(author = "Stride Labs")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Score and rank weekly activity data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score and rank a cohort of user weeks
    Analyze {
        /// Input file with a JSON array of user activity data (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Output format; defaults to pretty JSON on a terminal
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Scoring configuration file (JSON); omitted fields use defaults
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the weekly step goal threshold
        #[arg(long)]
        threshold: Option<f64>,

        /// Derive weeklyAverageSteps from the logs instead of trusting the
        /// precomputed input field
        #[arg(long)]
        derive_averages: bool,
    },

    /// Print the effective scoring configuration
    Config {
        /// Scoring configuration file (JSON); omitted fields use defaults
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the weekly step goal threshold
        #[arg(long)]
        threshold: Option<f64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

#[derive(Serialize)]
struct CliError {
    error: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let wrapped = CliError {
                error: e.to_string(),
            };
            eprintln!(
                "{}",
                serde_json::to_string(&wrapped).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AnalysisError> {
    match cli.command {
        Commands::Analyze {
            input,
            output,
            format,
            config,
            threshold,
            derive_averages,
        } => {
            let config = load_config(config.as_deref(), threshold)?;
            let engine = AnalysisEngine::with_config(config);

            let raw = read_input(&input)?;
            let mut users: Vec<UserActivityData> = serde_json::from_str(&raw)?;
            if derive_averages {
                for user in &mut users {
                    user.weekly_average_steps =
                        stride_rank::analysis::weekly_average_steps_of(&user.logs);
                }
            }

            let report = engine.analyze(&users)?;
            let json = match resolve_format(format, &output) {
                OutputFormat::Json => serde_json::to_string(&report)?,
                OutputFormat::JsonPretty => serde_json::to_string_pretty(&report)?,
            };
            write_output(&output, &json)
        }

        Commands::Config { config, threshold } => {
            let config = load_config(config.as_deref(), threshold)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn load_config(
    path: Option<&std::path::Path>,
    threshold: Option<f64>,
) -> Result<ScoringConfig, AnalysisError> {
    let mut config = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|e| AnalysisError::InvalidInput(format!("cannot read config: {e}")))?;
            serde_json::from_str(&raw)?
        }
        None => ScoringConfig::default(),
    };
    if let Some(threshold) = threshold {
        if threshold <= 0.0 {
            return Err(AnalysisError::InvalidInput(
                "threshold must be positive".to_string(),
            ));
        }
        config.step_goal_threshold = threshold;
    }
    Ok(config)
}

fn read_input(path: &PathBuf) -> Result<String, AnalysisError> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| AnalysisError::InvalidInput(format!("cannot read stdin: {e}")))?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
            .map_err(|e| AnalysisError::InvalidInput(format!("cannot read {}: {e}", path.display())))
    }
}

fn write_output(path: &PathBuf, json: &str) -> Result<(), AnalysisError> {
    if path.as_os_str() == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{json}")
            .map_err(|e| AnalysisError::InvalidInput(format!("cannot write stdout: {e}")))
    } else {
        fs::write(path, json)
            .map_err(|e| AnalysisError::InvalidInput(format!("cannot write {}: {e}", path.display())))
    }
}

fn resolve_format(format: Option<OutputFormat>, output: &PathBuf) -> OutputFormat {
    if let Some(format) = format {
        return format;
    }
    // Pretty by default when writing to an interactive terminal
    if output.as_os_str() == "-" && atty::is(atty::Stream::Stdout) {
        OutputFormat::JsonPretty
    } else {
        OutputFormat::Json
    }
}

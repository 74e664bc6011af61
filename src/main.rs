//! `pose-score`: compare a user pose sequence against a reference.
//!
//! # Commands
//!
//! - `compare`: score two JSON pose sequence files and print the result
//! - `demo`: score the built-in example sequences
//! - `init-config`: write the default TOML configuration

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use pose_similarity::loader;
use pose_similarity::{grade, ComparisonResult, Config, Feedback, PoseSequence, PoseSimilarityScorer};

#[derive(Parser)]
#[command(name = "pose-score")]
#[command(version)]
#[command(about = "Motion-weighted similarity between a reference and a user pose sequence")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Scorer configuration (TOML)
    #[arg(short, long, global = true, env = "POSE_SCORE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a user sequence file against a reference sequence file
    Compare {
        #[arg(long)]
        reference: PathBuf,
        #[arg(long)]
        user: PathBuf,
        /// Ignore reference motion where the user's landmarks are not visible
        #[arg(long)]
        visibility: bool,
        /// Include a coaching grade in the output
        #[arg(long)]
        grade: bool,
        #[arg(long)]
        compact: bool,
    },
    /// Score the built-in example (33 joints, 2 frames each)
    Demo {
        #[arg(long)]
        compact: bool,
    },
    /// Write the default configuration to a file
    InitConfig {
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Serialize)]
struct Report {
    #[serde(flatten)]
    result: ComparisonResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    feedback: Option<Feedback>,
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    if let Err(err) = run(cli, &mut stdout.lock()) {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Compare {
            reference,
            user,
            visibility,
            grade: with_grade,
            compact,
        } => {
            let scorer = PoseSimilarityScorer::from_config(&config)?;
            let reference = loader::load_sequence(&reference)?;
            let user = loader::load_sequence(&user)?;

            let result = if visibility {
                scorer.compare_landmarks(&reference.into_landmarks(), &user.into_landmarks())
            } else {
                scorer.compare_poses(&reference.into_poses(), &user.into_poses())
            }
            .context("scoring pose sequences")?;

            let feedback = with_grade.then(|| grade(result.similarity, config.grade_thresholds()));
            print_json(out, &Report { result, feedback }, compact)
        }
        Commands::Demo { compact } => {
            let scorer = PoseSimilarityScorer::from_config(&Config {
                num_joints: 33,
                ..config
            })?;
            let (reference, user) = demo_sequences();
            let result = scorer.compare_poses(&reference, &user)?;
            print_json(out, &result, compact)
        }
        Commands::InitConfig { path, force } => {
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            config.save(&path)?;
            tracing::info!(path = %path.display(), "wrote configuration");
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(out: &mut impl Write, value: &T, compact: bool) -> Result<()> {
    if compact {
        serde_json::to_writer(&mut *out, value)?;
    } else {
        serde_json::to_writer_pretty(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Reference moves every joint from the origin to (1, 1, 1); the user follows
/// the same path offset by 0.1 on each axis.
fn demo_sequences() -> (PoseSequence, PoseSequence) {
    let frame = |v: f64| vec![[v; 3]; 33];
    (vec![frame(0.0), frame(1.0)], vec![frame(0.1), frame(1.1)])
}

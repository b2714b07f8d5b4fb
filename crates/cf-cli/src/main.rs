//! cutflow CLI

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;

mod analysis_spec;

use analysis_spec::{load_groups, load_sample, process_label, read_spec};
use cf_viz::{CutFlowArtifact, DistributionArtifact};

#[derive(Parser)]
#[command(name = "cutflow")]
#[command(about = "cutflow - weighted cut-flow analysis for simulated event samples")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the cut list and emit a cut-flow artifact
    Run {
        /// Analysis spec (JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Output file for the artifact (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fill a per-process distribution artifact for one variable
    Hist {
        /// Analysis spec (JSON); must carry a `hist` section
        #[arg(short, long)]
        spec: PathBuf,

        /// Output file for the artifact (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Run { spec, output } => cmd_run(&spec, output.as_deref()),
        Commands::Hist { spec, output } => cmd_hist(&spec, output.as_deref()),
    }
}

fn cmd_run(spec_path: &std::path::Path, output: Option<&std::path::Path>) -> Result<()> {
    let spec = read_spec(spec_path)?;
    if spec.cuts.is_empty() {
        bail!("spec has no cuts; nothing to evaluate");
    }

    let (signal, background) = load_groups(&spec, spec_path)?;
    tracing::info!(cuts = spec.cuts.len(), "running cut flow");

    let report = cf_flow::run(&signal, &background, &spec.cuts)?;
    for step in &report {
        tracing::debug!(
            cut = %step.cut,
            signal = step.signal_efficiency,
            background = step.background_efficiency,
            "cut applied"
        );
    }

    write_artifact(&CutFlowArtifact::from_report(&report), output)
}

fn cmd_hist(spec_path: &std::path::Path, output: Option<&std::path::Path>) -> Result<()> {
    let spec = read_spec(spec_path)?;
    let Some(hist) = spec.hist.clone() else {
        bail!("spec has no 'hist' section");
    };

    let signal = load_sample(&spec, spec_path, &spec.signal)?;
    let mut processes = vec![("signal".to_string(), signal)];
    for path in &spec.backgrounds {
        processes.push((process_label(path), load_sample(&spec, spec_path, path)?));
    }

    let edges = hist.binning.edges()?;
    let refs: Vec<(String, &cf_sample::EventSample)> =
        processes.iter().map(|(name, s)| (name.clone(), s)).collect();
    let artifact = DistributionArtifact::build(&hist.variable, edges, &refs)?;

    write_artifact(&artifact, output)
}

fn write_artifact<T: Serialize>(artifact: &T, output: Option<&std::path::Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(artifact)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "artifact written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

mod logging;
mod process;
mod report;
mod walk;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use propshift_rewrite::MigrationConfig;
use tracing::{debug, info};

use crate::report::Summary;

#[derive(Parser)]
#[command(name = "propshift")]
#[command(about = "propshift: migrate JSX component usages from one UI library to another")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite legacy component usages in place
    Migrate {
        #[command(flatten)]
        run: RunArgs,

        /// Print the edits instead of writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// Report files that still need migrating; exits non-zero if any do
    Check {
        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Directory to walk, and to look for propshift.toml in
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Config file, instead of <DIR>/propshift.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Files to migrate; skips the directory walk
    files: Vec<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let failed = match cli.command {
        Command::Migrate { run, dry_run } => {
            let summary = cmd_run(&run, !dry_run, dry_run)?;
            summary.failed > 0
        }
        Command::Check { run } => {
            let summary = cmd_run(&run, false, false)?;
            summary.failed > 0 || summary.changed > 0
        }
    };

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Migrate the selected files. `write` saves results; `previews` prints edits.
fn cmd_run(run: &RunArgs, write: bool, previews: bool) -> anyhow::Result<Summary> {
    logging::init_tracing(run.verbose);

    let config = MigrationConfig::resolve(run.config.as_deref(), &run.dir)
        .context("could not load migration config")?;
    debug!(rules = config.components.len(), "config loaded");

    let files = if run.files.is_empty() {
        walk::collect_files(&run.dir, &config.walk)
    } else {
        run.files.clone()
    };
    info!(files = files.len(), dir = %run.dir.display(), "scanning");

    let reports = process::process_all(&files, &run.dir, &config, write);
    print!("{}", report::render(&reports, write, previews));

    let summary = Summary::from_reports(&reports);
    if summary.issues > 0 {
        info!(issues = summary.issues, "some usages need manual review");
    }
    Ok(summary)
}

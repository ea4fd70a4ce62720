//! nyx - CI automation for GitHub repositories

mod cli;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nyx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Auto-merge gate and nightly failure reporting for GitHub repositories",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a pull request and merge it when every gate passes
    ///
    /// With --owner, --repo, and --pull-number the pull request is evaluated
    /// directly. With none of the three, the target is resolved from the
    /// GITHUB_CONTEXT environment variable a workflow provides. The exit
    /// status is the numeric outcome code.
    Merge {
        /// The organization or user for the repository
        #[arg(short, long)]
        owner: Option<String>,

        /// The repository name
        #[arg(short, long)]
        repo: Option<String>,

        /// The pull request number to evaluate
        #[arg(long)]
        pull_number: Option<u64>,

        /// The GitHub token to use, defaults to $GITHUB_TOKEN
        #[arg(long)]
        token: Option<String>,

        /// GitHub Enterprise host, defaults to github.com
        #[arg(long)]
        host: Option<String>,
    },

    /// Open an issue on the specified repo to report a nightly failure
    ReportFailure {
        /// The organization or user for the repository
        #[arg(short, long)]
        owner: String,

        /// The repository name
        #[arg(short, long)]
        repo: String,

        /// The GitHub Actions run id to report failing
        #[arg(long)]
        run_id: String,

        /// The GitHub token to use, defaults to $GITHUB_TOKEN
        #[arg(long)]
        token: Option<String>,

        /// GitHub Enterprise host, defaults to github.com
        #[arg(long)]
        host: Option<String>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Commands) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Merge {
            owner,
            repo,
            pull_number,
            token,
            host,
        } => {
            let outcome = cli::merge::run_merge(cli::merge::MergeArgs {
                owner,
                repo,
                pull_number,
                token,
                host,
            })
            .await?;
            Ok(ExitCode::from(outcome.code()))
        }
        Commands::ReportFailure {
            owner,
            repo,
            run_id,
            token,
            host,
        } => {
            cli::report_failure::run_report_failure(cli::report_failure::ReportFailureArgs {
                owner,
                repo,
                run_id,
                token,
                host,
            })
            .await
            .context("failed to report nightly failure")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

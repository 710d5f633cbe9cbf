use clap::{Parser, Subcommand};
use log::LevelFilter;
use relver::commands;
use relver::commands::sync::SyncError;
use relver::config::{Config, ConfigError};
use relver::infrastructure::{GithubError, GithubReleases};
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the relver CLI binary
#[derive(Debug, Error)]
enum RelverError {
    /// Configuration could not be assembled.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The Github client could not be created.
    #[error(transparent)]
    Github(#[from] GithubError),

    /// The sync command failed.
    #[error(transparent)]
    Sync(#[from] SyncError),
}

#[derive(Parser)]
#[command(name = "relver")]
#[command(about = "CLI to sync pinned component versions from Github releases", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the latest version of every component and update the versions file
    Sync {
        /// Path of the versions file to update, instead of the installed one
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<(), RelverError> {
    let cli = Cli::parse();

    init_logging(&cli);

    match cli.command {
        Commands::Sync { file } => {
            let config = Config::load(file)?;
            let github = GithubReleases::new()?;

            commands::sync::run(github, &config.components, &config.versions_path)?;
        }
    }

    Ok(())
}

/// Initialize logging based on the verbosity level specified in the CLI
fn init_logging(cli: &Cli) {
    let mut builder = env_logger::builder();
    builder
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            let level = record.level();
            let style = &buf.default_level_style(level);

            writeln!(buf, "[{style}{level}{style:#}] {}", record.args())
        });

    if !cli.verbose {
        builder.format_timestamp(None);
    }

    builder.init();
}

//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod job;
mod submit;

pub use job::JobCommands;

use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Upload a dataset and start an analysis job
    Submit {
        /// Path to a CSV or Excel file
        file: PathBuf,

        /// Print the job id and exit instead of following the job
        #[arg(short, long)]
        detach: bool,

        /// Skip the CSV/Excel file type check
        #[arg(long)]
        any_type: bool,
    },
    /// Job tracking
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Submit {
            file,
            detach,
            any_type,
        } => submit::handle_submit(&file, detach, any_type, config).await,
        Commands::Job { command } => job::handle_job_command(command, config).await,
    }
}

//! Job command handlers
//!
//! Handles job tracking commands: following a job on the dashboard, showing
//! its current state once, and downloading the cleaned dataset.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use std::path::{Path, PathBuf};
use tracing::info;
use udaq_client::ServiceClient;
use udaq_core::domain::job::{Job, JobId};
use udaq_core::domain::view::JobView;
use udaq_core::normalize::normalize_job;
use udaq_tracker::{PollerHandle, Session};

use crate::config::Config;
use crate::render::{Dashboard, colorize_status};

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Follow a job until it completes or fails
    Watch {
        /// Job ID
        id: String,
    },
    /// Show the current state of a job
    Status {
        /// Job ID
        id: String,

        /// Print the job view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Download the cleaned dataset of a completed job
    Download {
        /// Job ID
        id: String,

        /// Directory to write the file into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}

/// Handle job commands
///
/// Routes job subcommands to their respective handlers.
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    match command {
        JobCommands::Watch { id } => watch_job(JobId::new(id), config).await,
        JobCommands::Status { id, json } => {
            show_status(&config.client(), JobId::new(id), json).await
        }
        JobCommands::Download { id, output } => {
            download_cleaned(&config.client(), JobId::new(id), &output).await
        }
    }
}

async fn watch_job(job_id: JobId, config: &Config) -> Result<()> {
    let mut session = Session::connect(&config.tracker);
    let handle = session.track(job_id);
    info!("Watching job {} (poller {})", handle.job_id(), handle.instance());
    follow(handle, config).await
}

/// Renders a running poller until it reaches a terminal status
///
/// Ctrl-C stops the poller; the job itself keeps running on the service.
pub async fn follow(handle: &mut PollerHandle, config: &Config) -> Result<()> {
    let mut dashboard = Dashboard::new(handle.job_id().clone(), config.client());
    let mut rx = handle.subscribe();

    let view = rx.borrow_and_update().clone();
    dashboard.update(&view);
    if view.is_terminal() {
        return Ok(());
    }

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = rx.borrow_and_update().clone();
                dashboard.update(&view);
                if view.is_terminal() {
                    break;
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                handle.stop();
                info!("Interrupted; poller for job {} stopped", handle.job_id());
                let notice = format!(
                    "Stopped watching job {}; it keeps running on the service.",
                    handle.job_id()
                );
                println!("\n{}", notice.yellow());
                return Ok(());
            }
        }
    }

    handle.finished().await;
    Ok(())
}

async fn fetch_job(client: &ServiceClient, job_id: &JobId) -> Result<Job> {
    let payload = client
        .get_job(job_id)
        .await
        .with_context(|| format!("Failed to fetch job {}", job_id))?;
    normalize_job(job_id, payload)
        .with_context(|| format!("Job {} returned an invalid payload", job_id))
}

async fn show_status(client: &ServiceClient, job_id: JobId, json: bool) -> Result<()> {
    let job = fetch_job(client, &job_id).await?;

    let mut view = JobView::default();
    view.apply_snapshot(1, job);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let mut dashboard = Dashboard::new(job_id, client.clone());
    dashboard.update(&view);
    Ok(())
}

async fn download_cleaned(client: &ServiceClient, job_id: JobId, output: &Path) -> Result<()> {
    let job = fetch_job(client, &job_id).await?;

    let Some(report) = &job.report else {
        anyhow::bail!(
            "Job {} is {} and has no report yet",
            job_id,
            colorize_status(job.status)
        );
    };
    let filename = report
        .cleaned_file_name()
        .with_context(|| format!("Job {} did not produce a cleaned file", job_id))?;

    let bytes = client
        .download_artifact(filename)
        .await
        .with_context(|| format!("Failed to download {}", filename))?;

    let target = output.join(filename);
    tokio::fs::write(&target, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", target.display()))?;
    info!("Downloaded {} for job {}", filename, job_id);

    println!(
        "{} Saved {} ({} bytes)",
        "✓".green(),
        target.display().to_string().cyan(),
        bytes.len()
    );
    Ok(())
}

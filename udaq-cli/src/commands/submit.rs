//! Submit command handler
//!
//! Uploads a dataset, starts the analysis job and, unless detached, follows
//! it on the dashboard.

use anyhow::{Context, Result, anyhow};
use colored::*;
use std::path::Path;
use tracing::{debug, info};
use udaq_core::dto::dataset::UploadFile;
use udaq_tracker::{Session, SubmissionError};

use super::job::follow;
use crate::config::Config;

/// File extensions accepted at the upload boundary
const ACCEPTED_EXTENSIONS: &[&str] = &["csv", "xlsx"];

pub async fn handle_submit(
    path: &Path,
    detach: bool,
    any_type: bool,
    config: &Config,
) -> Result<()> {
    let file = read_upload(path).await?;

    if !any_type && !is_accepted(&file) {
        anyhow::bail!(
            "{} is not a CSV or Excel file (supported formats: .csv, .xlsx); \
             pass --any-type to upload anyway",
            file.name
        );
    }

    info!("Submitting {} ({} bytes)", file.name, file.content.len());

    println!("{}", "Uploading & starting analysis...".dimmed());

    let mut session = Session::connect(&config.tracker);
    let handle = match session.submit(&file).await {
        Ok(handle) => handle,
        Err(e) => {
            debug!(stage = %e.stage(), "Submission failed: {}", e);
            return Err(submission_failure(&e));
        }
    };

    info!("Started job {} for {}", handle.job_id(), file.name);

    println!(
        "{} Started job {}",
        "✓".green(),
        handle.job_id().to_string().cyan()
    );

    if detach {
        println!(
            "{}",
            format!("Follow it with `udaq job watch {}`", handle.job_id()).dimmed()
        );
        handle.stop();
        return Ok(());
    }

    follow(handle, config).await
}

async fn read_upload(path: &Path) -> Result<UploadFile> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("{} has no usable file name", path.display()))?
        .to_string();

    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(UploadFile::new(name, content))
}

/// The one message shown for a failed submission
fn submission_failure(e: &SubmissionError) -> anyhow::Error {
    match e.dataset_id() {
        Some(dataset_id) => anyhow!(
            "Upload Failed: {} (dataset {} was registered but no job was started)",
            e.server_message(),
            dataset_id
        ),
        None => anyhow!("Upload Failed: {}", e.server_message()),
    }
}

fn is_accepted(file: &UploadFile) -> bool {
    file.extension()
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
}

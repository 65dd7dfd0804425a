//! Dashboard rendering
//!
//! Prints the client-side job view incrementally: a loading line until the
//! first snapshot, a banner on each status change, log lines as they appear,
//! and the report once the job completes. Rendering only reads the view.

use colored::*;
use udaq_client::ServiceClient;
use udaq_core::domain::job::{JobId, JobStatus};
use udaq_core::domain::report::Report;
use udaq_core::domain::view::JobView;

/// Incremental renderer for one job
pub struct Dashboard {
    job_id: JobId,
    client: ServiceClient,
    loading_shown: bool,
    last_status: Option<JobStatus>,
    printed_logs: usize,
    finished: bool,
}

impl Dashboard {
    pub fn new(job_id: JobId, client: ServiceClient) -> Self {
        Self {
            job_id,
            client,
            loading_shown: false,
            last_status: None,
            printed_logs: 0,
            finished: false,
        }
    }

    /// Prints whatever changed since the previous update
    pub fn update(&mut self, view: &JobView) {
        let Some(job) = &view.job else {
            if !self.loading_shown {
                println!("{}", "Loading job details...".dimmed());
                self.loading_shown = true;
            }
            return;
        };

        if self.last_status != Some(job.status) {
            print_status_banner(&self.job_id, job.status);
            self.last_status = Some(job.status);
        }

        let (start, lines) = self.take_new_logs(&job.logs);
        for (i, line) in lines.iter().enumerate() {
            print_log_line(start + i + 1, line);
        }

        if job.is_terminal() && !self.finished {
            self.finished = true;
            match (job.status, &job.report) {
                (JobStatus::Completed, Some(report)) => self.print_report(report),
                (JobStatus::Completed, None) => {
                    println!("\n{}", "The job completed without a report.".yellow())
                }
                _ => println!("\n{}", "The analysis did not complete.".red()),
            }
            println!(
                "\n{}",
                "Run `udaq submit <FILE>` to start a new analysis.".dimmed()
            );
        }
    }

    /// Log lines not printed yet, with the index of the first one
    ///
    /// Logs are append-only on the service side; if a snapshot comes back
    /// shorter (e.g. an undecodable blob) the counter follows it down.
    fn take_new_logs<'a>(&mut self, logs: &'a [String]) -> (usize, &'a [String]) {
        if logs.len() < self.printed_logs {
            self.printed_logs = logs.len();
        }
        let start = self.printed_logs;
        self.printed_logs = logs.len();
        (start, &logs[start..])
    }

    fn print_report(&self, report: &Report) {
        println!("\n{}", "Report:".bold());
        println!(
            "  Initial Quality: {}",
            format_score(report.initial_quality_score).yellow()
        );
        println!(
            "  Final Quality:   {} ({})",
            format_score(report.final_quality_score).green(),
            format_delta(report.score_delta())
        );

        if report.is_regression() {
            println!(
                "  {}",
                "Note: the service reported a final score below the initial score.".yellow()
            );
        }
        if !report.scores_in_range() {
            println!(
                "  {}",
                "Note: the service reported a score outside 0-100.".yellow()
            );
        }

        println!("\n{}", "Issues Detected & Fixed:".bold());
        if report.issues_found.is_empty() {
            println!("  {}", "No issues found.".dimmed());
        }
        for (kind, count) in &report.issues_found {
            println!(
                "  {} {}: {}",
                "▸".cyan(),
                format_issue_kind(kind),
                format!("{} found", count).red()
            );
        }

        if !report.actions_taken.is_empty() {
            println!("\n{}", "Actions Taken:".bold());
            for action in &report.actions_taken {
                println!("  {} {}", "✓".green(), action);
            }
        }

        if let Some(filename) = report.cleaned_file_name() {
            println!("\n{}", "Dataset cleaned successfully!".green().bold());
            if let Ok(url) = self.client.artifact_url(filename) {
                println!("  Download: {}", url.cyan());
            }
            println!(
                "  {}",
                format!("or run `udaq job download {}`", self.job_id).dimmed()
            );
        }
    }
}

fn print_status_banner(job_id: &JobId, status: JobStatus) {
    println!(
        "{} Job {} is {}",
        "●".bold(),
        job_id.to_string().cyan(),
        colorize_status(status)
    );
}

fn print_log_line(number: usize, line: &str) {
    println!("  {} {}", format!("[{}]", number).dimmed(), line);
}

/// Colorize job status for display
pub fn colorize_status(status: JobStatus) -> ColoredString {
    let status_str = status.as_str();
    match status {
        JobStatus::Pending => status_str.yellow(),
        JobStatus::Running => status_str.cyan(),
        JobStatus::Completed => status_str.green(),
        JobStatus::Failed => status_str.red(),
    }
}

/// `missing_values` -> `Missing values`
pub fn format_issue_kind(kind: &str) -> String {
    let spaced = kind.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

fn format_delta(delta: f64) -> String {
    if delta >= 0.0 {
        format!("+{:.1}", delta)
    } else {
        format!("{:.1}", delta)
    }
}

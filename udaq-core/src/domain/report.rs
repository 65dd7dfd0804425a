//! Report domain types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inclusive range the service reports quality scores in
pub const SCORE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;

/// Terminal output of a completed job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub initial_quality_score: f64,
    pub final_quality_score: f64,
    /// Issue kind (e.g. `missing_values`) to occurrence count
    pub issues_found: BTreeMap<String, u64>,
    /// Remediation steps, in the order they were applied
    pub actions_taken: Vec<String>,
    /// Server-side path of the cleaned artifact
    pub cleaned_file_path: Option<String>,
}

impl Report {
    /// Final path component of the cleaned artifact
    ///
    /// The service reports a server-side path that may use either separator;
    /// only the trailing filename is meaningful to the client.
    pub fn cleaned_file_name(&self) -> Option<&str> {
        let path = self.cleaned_file_path.as_deref()?;
        path.trim_end_matches(['/', '\\'])
            .rsplit(['/', '\\'])
            .next()
            .filter(|name| !name.is_empty())
    }

    pub fn score_delta(&self) -> f64 {
        self.final_quality_score - self.initial_quality_score
    }

    /// Final score below the initial one.
    ///
    /// The service owns this invariant; the client only flags it as an anomaly.
    pub fn is_regression(&self) -> bool {
        self.final_quality_score < self.initial_quality_score
    }

    pub fn scores_in_range(&self) -> bool {
        SCORE_RANGE.contains(&self.initial_quality_score)
            && SCORE_RANGE.contains(&self.final_quality_score)
    }

    pub fn total_issues(&self) -> u64 {
        self.issues_found.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with_path(path: Option<&str>) -> Report {
        Report {
            initial_quality_score: 62.5,
            final_quality_score: 91.0,
            issues_found: BTreeMap::from([
                ("missing_values".to_string(), 12),
                ("duplicates".to_string(), 3),
            ]),
            actions_taken: vec!["Imputed missing values".to_string()],
            cleaned_file_path: path.map(str::to_string),
        }
    }

    #[test]
    fn test_cleaned_file_name_unix_path() {
        let report = report_with_path(Some("/data/out/cleaned_123.csv"));
        assert_eq!(report.cleaned_file_name(), Some("cleaned_123.csv"));
    }

    #[test]
    fn test_cleaned_file_name_windows_path() {
        let report = report_with_path(Some("C:\\media\\cleaned\\cleaned_sales.xlsx"));
        assert_eq!(report.cleaned_file_name(), Some("cleaned_sales.xlsx"));
    }

    #[test]
    fn test_cleaned_file_name_bare_and_missing() {
        assert_eq!(
            report_with_path(Some("cleaned.csv")).cleaned_file_name(),
            Some("cleaned.csv")
        );
        assert_eq!(
            report_with_path(Some("/out/cleaned.csv/")).cleaned_file_name(),
            Some("cleaned.csv")
        );
        assert_eq!(report_with_path(Some("/")).cleaned_file_name(), None);
        assert_eq!(report_with_path(None).cleaned_file_name(), None);
    }

    #[test]
    fn test_scores() {
        let report = report_with_path(None);
        assert_eq!(report.score_delta(), 28.5);
        assert!(!report.is_regression());
        assert!(report.scores_in_range());
        assert_eq!(report.total_issues(), 15);

        let regressed = Report {
            final_quality_score: 40.0,
            ..report.clone()
        };
        assert!(regressed.is_regression());

        let out_of_range = Report {
            final_quality_score: 140.0,
            ..report
        };
        assert!(!out_of_range.scores_in_range());
    }
}

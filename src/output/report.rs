use crate::output::record::CharacterRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Where in a run a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// A listing page could not be loaded; the walk stopped there
    Listing,
    /// A listing row had no link or no name; the row was skipped
    Malformed,
    /// A character page could not be loaded; the entry was skipped
    Entry,
    /// An image could not be fetched for encoding; the image was omitted
    Image,
}

impl FailureStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Listing => "listing",
            Self::Malformed => "malformed",
            Self::Entry => "entry",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal problem met during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeFailure {
    pub stage: FailureStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub message: String,
}

impl ScrapeFailure {
    pub fn new(stage: FailureStage, url: Option<&str>, error: impl fmt::Display) -> Self {
        Self {
            stage,
            url: url.map(str::to_string),
            message: error.to_string(),
        }
    }
}

/// Result of a scrape run: everything collected plus what went wrong
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeReport {
    pub records: Vec<CharacterRecord>,
    pub failures: Vec<ScrapeFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ScrapeReport {
    /// Creates an empty report stamped with the current time
    pub fn start() -> Self {
        let now = Utc::now();
        Self {
            records: Vec::new(),
            failures: Vec::new(),
            started_at: now,
            finished_at: now,
        }
    }

    /// Stamps the finish time
    pub fn finish(mut self) -> Self {
        self.finished_at = Utc::now();
        self
    }

    pub fn push_failure(&mut self, failure: ScrapeFailure) {
        tracing::warn!(
            "{} failure{}: {}",
            failure.stage,
            failure
                .url
                .as_deref()
                .map(|url| format!(" for {}", url))
                .unwrap_or_default(),
            failure.message
        );
        self.failures.push(failure);
    }

    /// Returns true if the run hit no failure of any kind
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures_at(&self, stage: FailureStage) -> impl Iterator<Item = &ScrapeFailure> {
        self.failures.iter().filter(move |f| f.stage == stage)
    }

    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Serializes the report as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Result of counting listing entries without visiting them
#[derive(Debug, Clone, Serialize)]
pub struct ListingCount {
    pub total: usize,
    pub failures: Vec<ScrapeFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_lifecycle() {
        let mut report = ScrapeReport::start();
        assert!(report.is_complete());

        report.push_failure(ScrapeFailure::new(
            FailureStage::Entry,
            Some("https://x.fandom.com/wiki/A"),
            "HTTP status 500",
        ));
        report.push_failure(ScrapeFailure::new(FailureStage::Listing, None, "boom"));

        let report = report.finish();
        assert!(!report.is_complete());
        assert_eq!(report.failures_at(FailureStage::Entry).count(), 1);
        assert!(report.duration() >= chrono::Duration::zero());
    }

    #[test]
    fn test_report_json() {
        let mut report = ScrapeReport::start();
        report.push_failure(ScrapeFailure::new(FailureStage::Image, None, "gone"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["failures"][0]["stage"], "image");
        assert!(json["failures"][0].get("url").is_none());
        assert_eq!(json["records"], serde_json::json!([]));
    }
}

//! Run statistics for scrape reports
//!
//! Summarises a `ScrapeReport` for display after a CLI run.

use crate::output::report::{FailureStage, ScrapeReport};
use std::collections::HashMap;

/// Scrape run statistics summary
#[derive(Debug, Clone)]
pub struct ScrapeStatistics {
    /// Number of records emitted
    pub records: usize,

    /// Records that carry extracted infobox data
    pub with_data: usize,

    /// Total images across all records
    pub images: usize,

    /// Failure counts by stage
    pub failures_by_stage: HashMap<FailureStage, usize>,

    /// Wall-clock duration in milliseconds
    pub duration_ms: i64,
}

/// Computes statistics for a report
pub fn compute_statistics(report: &ScrapeReport) -> ScrapeStatistics {
    let mut failures_by_stage = HashMap::new();
    for failure in &report.failures {
        *failures_by_stage.entry(failure.stage).or_insert(0) += 1;
    }

    ScrapeStatistics {
        records: report.records.len(),
        with_data: report.records.iter().filter(|r| r.data.is_some()).count(),
        images: report
            .records
            .iter()
            .filter_map(|r| r.images())
            .map(<[String]>::len)
            .sum(),
        failures_by_stage,
        duration_ms: report.duration().num_milliseconds(),
    }
}

/// Prints statistics to stderr in a formatted manner
///
/// Stdout is reserved for the JSON records.
pub fn print_statistics(stats: &ScrapeStatistics) {
    eprintln!("=== Scrape Statistics ===\n");

    eprintln!("Overview:");
    eprintln!("  Records: {}", stats.records);
    eprintln!("  Records with data: {}", stats.with_data);
    eprintln!("  Images: {}", stats.images);
    eprintln!("  Duration: {}ms", stats.duration_ms);
    eprintln!();

    if !stats.failures_by_stage.is_empty() {
        eprintln!("Failures:");
        let mut counts: Vec<_> = stats.failures_by_stage.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1));

        for (stage, count) in counts {
            eprintln!("  {}: {}", stage, count);
        }
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Field;
    use crate::output::record::{CharacterRecord, FieldData, FieldValue};
    use crate::output::report::ScrapeFailure;

    #[test]
    fn test_compute_statistics() {
        let mut report = ScrapeReport::start();

        let mut data = FieldData::new();
        data.insert(
            Field::Images,
            FieldValue::Images(vec!["a".to_string(), "b".to_string()]),
        );
        report.records.push(CharacterRecord {
            url: "https://x/wiki/A".to_string(),
            name: "A".to_string(),
            id: Some(1),
            data: Some(data),
        });
        report.records.push(CharacterRecord {
            url: "https://x/wiki/B".to_string(),
            name: "B".to_string(),
            id: None,
            data: None,
        });
        report.push_failure(ScrapeFailure::new(FailureStage::Entry, None, "x"));
        report.push_failure(ScrapeFailure::new(FailureStage::Entry, None, "y"));

        let stats = compute_statistics(&report.finish());
        assert_eq!(stats.records, 2);
        assert_eq!(stats.with_data, 1);
        assert_eq!(stats.images, 2);
        assert_eq!(stats.failures_by_stage.get(&FailureStage::Entry), Some(&2));
    }
}

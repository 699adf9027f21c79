//! JSON reporter.
//!
//! Smell names and method lists are lexicographically sorted so output
//! is stable and diffable, and the shape round-trips through serde.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{FileReport, SmellEntry};

/// Serialized form of one file's analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport {
    pub test_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_file: Option<String>,
    pub test_method_count: usize,
    /// Only smells that fired; display name -> affected methods + score
    pub smells: BTreeMap<String, SmellEntry>,
}

impl JsonReport {
    pub fn from_report(report: &FileReport) -> Self {
        Self {
            test_file: report.test_path.display().to_string(),
            production_file: report
                .production_path
                .as_ref()
                .map(|p| p.display().to_string()),
            test_method_count: report.test_method_count,
            smells: report.smell_map(),
        }
    }
}

/// Render one report as JSON.
pub fn render(report: &FileReport, pretty: bool) -> Result<String> {
    let json = JsonReport::from_report(report);
    serialize(&json, pretty)
}

/// Render a batch of reports as a JSON array.
pub fn render_many(reports: &[FileReport], pretty: bool) -> Result<String> {
    let json: Vec<JsonReport> = reports.iter().map(JsonReport::from_report).collect();
    serialize(&json, pretty)
}

fn serialize<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    out.context("Failed to serialize report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SmellResult, SmellyElement};
    use std::path::PathBuf;

    fn sample_report() -> FileReport {
        let mut result = SmellResult::new("Eager Test");
        result.record(SmellyElement::method("testB", true));
        result.record(SmellyElement::method("testA", true));
        result.add_score(2);
        FileReport {
            test_path: PathBuf::from("FooTest.java"),
            production_path: Some(PathBuf::from("Foo.java")),
            test_method_count: 2,
            smells: vec![Some(result), None],
        }
    }

    #[test]
    fn output_is_sorted_and_round_trips() {
        let rendered = render(&sample_report(), false).unwrap();
        let parsed: JsonReport = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed.test_method_count, 2);
        let entry = &parsed.smells["Eager Test"];
        assert_eq!(entry.methods, vec!["testA".to_string(), "testB".to_string()]);
        assert_eq!(entry.score, 2);
        assert_eq!(parsed, JsonReport::from_report(&sample_report()));
    }

    #[test]
    fn clean_results_are_omitted() {
        let report = FileReport {
            test_path: PathBuf::from("CleanTest.java"),
            production_path: None,
            test_method_count: 1,
            smells: vec![Some(SmellResult::new("Empty Test"))],
        };
        let rendered = render(&report, false).unwrap();
        let parsed: JsonReport = serde_json::from_str(&rendered).unwrap();
        assert!(parsed.smells.is_empty());
        assert!(parsed.production_file.is_none());
    }
}

//! Sniff: test smell detector for JUnit test suites
//!
//! This library statically analyzes Java test files for recurring test
//! smells (assertion roulette, eager tests, general fixtures, ...) and
//! reports, per smell, the affected test methods and a severity score.

pub mod config;
pub mod engine;
pub mod parser;
pub mod reporter;
pub mod resolve;
pub mod smells;
pub mod syntax;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// One entry of the input manifest: a test file and its optional
/// production counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Path to the test source file
    pub test_path: PathBuf,
    /// Path to the associated production source file, if any
    pub production_path: Option<PathBuf>,
}

impl ManifestEntry {
    pub fn new(test_path: impl Into<PathBuf>, production_path: Option<PathBuf>) -> Self {
        Self {
            test_path: test_path.into(),
            production_path,
        }
    }

    /// Parse a `testPath,productionPath[,extra]` manifest line.
    ///
    /// An empty production path means "no production file available", not
    /// an error. Returns `None` for blank lines.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let mut fields = line.split(',');
        let test = fields.next()?.trim();
        if test.is_empty() {
            return None;
        }
        let production = fields.next().map(str::trim).filter(|p| !p.is_empty());
        Some(Self {
            test_path: PathBuf::from(test),
            production_path: production.map(PathBuf::from),
        })
    }

    /// Extension-stripped base name of the test file.
    pub fn test_stem(&self) -> String {
        file_stem(&self.test_path)
    }

    /// Extension-stripped base name of the production file, if any.
    pub fn production_stem(&self) -> Option<String> {
        self.production_path.as_deref().map(file_stem)
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A test element examined by an analyzer, with an open bag of named
/// diagnostic data (e.g. a literal count).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmellyElement {
    Method {
        name: String,
        smelly: bool,
        data: BTreeMap<String, String>,
    },
    Class {
        name: String,
        smelly: bool,
    },
}

impl SmellyElement {
    pub fn method(name: impl Into<String>, smelly: bool) -> Self {
        SmellyElement::Method {
            name: name.into(),
            smelly,
            data: BTreeMap::new(),
        }
    }

    pub fn class(name: impl Into<String>, smelly: bool) -> Self {
        SmellyElement::Class {
            name: name.into(),
            smelly,
        }
    }

    pub fn with_data(mut self, key: &str, value: impl ToString) -> Self {
        if let SmellyElement::Method { ref mut data, .. } = self {
            data.insert(key.to_string(), value.to_string());
        }
        self
    }

    pub fn name(&self) -> &str {
        match self {
            SmellyElement::Method { name, .. } | SmellyElement::Class { name, .. } => name,
        }
    }

    pub fn is_smelly(&self) -> bool {
        match self {
            SmellyElement::Method { smelly, .. } | SmellyElement::Class { smelly, .. } => *smelly,
        }
    }
}

/// Per-analyzer outcome: every examined element, the names of the smelly
/// ones, and an integer severity score.
///
/// Invariant: `score > 0` if and only if `smelly_names` is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmellResult {
    /// Display name of the smell
    pub smell_name: String,
    /// Every element the analyzer examined
    pub elements: Vec<SmellyElement>,
    /// Names of elements judged smelly (sorted for determinism)
    pub smelly_names: BTreeSet<String>,
    /// Accumulated severity score; zero means the smell is absent
    pub score: u32,
}

impl SmellResult {
    pub fn new(smell_name: &str) -> Self {
        Self {
            smell_name: smell_name.to_string(),
            ..Self::default()
        }
    }

    /// Record an examined element; smelly elements also enter the name set.
    pub fn record(&mut self, element: SmellyElement) {
        if element.is_smelly() {
            self.smelly_names.insert(element.name().to_string());
        }
        self.elements.push(element);
    }

    pub fn add_score(&mut self, amount: u32) {
        self.score += amount;
    }

    pub fn has_smell(&self) -> bool {
        self.score > 0
    }
}

/// Output-contract entry for one smell: affected element names (sorted)
/// and the severity score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmellEntry {
    pub methods: Vec<String>,
    pub score: u32,
}

/// Report for one manifest entry after all analyzers have run.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Path to the analyzed test file
    pub test_path: PathBuf,
    /// Path to the production file, if one was supplied
    pub production_path: Option<PathBuf>,
    /// Number of test methods the classifier accepted
    pub test_method_count: usize,
    /// One outcome per catalog analyzer, in catalog order; `None` marks an
    /// analyzer that could not run (missing production file)
    pub smells: Vec<Option<SmellResult>>,
}

impl FileReport {
    /// Smells that actually fired, as the sorted mapping of the output
    /// contract: display name -> { methods, score }.
    pub fn smell_map(&self) -> BTreeMap<String, SmellEntry> {
        let mut map = BTreeMap::new();
        for result in self.smells.iter().flatten() {
            if result.has_smell() {
                map.insert(
                    result.smell_name.clone(),
                    SmellEntry {
                        methods: result.smelly_names.iter().cloned().collect(),
                        score: result.score,
                    },
                );
            }
        }
        map
    }

    /// Names of catalog analyzers that were skipped for this file.
    pub fn skipped_analyzers<'a>(&self, names: &[&'a str]) -> Vec<&'a str> {
        names
            .iter()
            .zip(self.smells.iter())
            .filter(|(_, outcome)| outcome.is_none())
            .map(|(name, _)| *name)
            .collect()
    }
}

/// Public API: analyze a single test/production file pair with the given
/// thresholds. Used by programmatic consumers.
pub fn detect_file(
    test_path: &Path,
    production_path: Option<&Path>,
    thresholds: &config::Thresholds,
) -> Result<FileReport, engine::DetectError> {
    let entry = ManifestEntry::new(test_path, production_path.map(Path::to_path_buf));
    engine::SmellDetector::new(thresholds.clone()).detect(&entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_line_with_production_file() {
        let entry = ManifestEntry::parse_line("tests/FooTest.java,src/Foo.java").unwrap();
        assert_eq!(entry.test_path, PathBuf::from("tests/FooTest.java"));
        assert_eq!(entry.production_path, Some(PathBuf::from("src/Foo.java")));
        assert_eq!(entry.test_stem(), "FooTest");
        assert_eq!(entry.production_stem().as_deref(), Some("Foo"));
    }

    #[test]
    fn manifest_line_empty_production_is_none() {
        let entry = ManifestEntry::parse_line("tests/FooTest.java,").unwrap();
        assert_eq!(entry.production_path, None);
        assert_eq!(entry.production_stem(), None);
    }

    #[test]
    fn manifest_line_extra_field_is_ignored() {
        let entry = ManifestEntry::parse_line("a/T.java,b/P.java,extra").unwrap();
        assert_eq!(entry.production_path, Some(PathBuf::from("b/P.java")));
    }

    #[test]
    fn blank_manifest_line_is_skipped() {
        assert!(ManifestEntry::parse_line("   ").is_none());
        assert!(ManifestEntry::parse_line("").is_none());
    }

    #[test]
    fn smell_result_invariant() {
        let mut result = SmellResult::new("Example");
        assert!(!result.has_smell());
        result.record(SmellyElement::method("testOne", true));
        result.add_score(1);
        assert!(result.has_smell());
        assert_eq!(result.smelly_names.len(), 1);
    }

    #[test]
    fn smell_map_skips_clean_results() {
        let mut smelly = SmellResult::new("B Smell");
        smelly.record(SmellyElement::method("testB", true));
        smelly.add_score(2);
        let mut clean = SmellResult::new("A Smell");
        clean.record(SmellyElement::method("testA", false));

        let report = FileReport {
            test_path: PathBuf::from("T.java"),
            production_path: None,
            test_method_count: 2,
            smells: vec![Some(clean), Some(smelly), None],
        };
        let map = report.smell_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map["B Smell"].score, 2);
        assert_eq!(map["B Smell"].methods, vec!["testB".to_string()]);
    }
}

//! Detection engine: orchestrates parsing and the analyzer catalog.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use rayon::prelude::*;
use thiserror::Error;

use crate::config::Thresholds;
use crate::parser::JavaParser;
use crate::smells::{self, classify, SmellError};
use crate::syntax::CompilationUnit;
use crate::{FileReport, ManifestEntry};

/// Fatal per-file failures. Anything softer is handled inside the
/// catalog run.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("failed to open {path}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {detail}")]
    Parse { path: PathBuf, detail: String },
}

/// The orchestrator. Holds only the threshold settings; every analysis
/// builds a fresh catalog, so no state crosses files.
pub struct SmellDetector {
    thresholds: Thresholds,
}

impl SmellDetector {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Display names of the catalog, in run order.
    pub fn smell_names(&self) -> Vec<&'static str> {
        smells::smell_names()
    }

    /// Analyze one manifest entry from disk.
    pub fn detect(&self, entry: &ManifestEntry) -> Result<FileReport, DetectError> {
        let test_source = read(&entry.test_path)?;
        let production_source = match &entry.production_path {
            Some(path) => Some(read(path)?),
            None => None,
        };
        self.detect_source(
            &test_source,
            production_source.as_deref(),
            &entry.test_path,
            entry.production_path.as_deref(),
        )
    }

    /// Analyze already-loaded sources. The paths are used for
    /// diagnostics and the report only.
    pub fn detect_source(
        &self,
        test_source: &str,
        production_source: Option<&str>,
        test_path: &Path,
        production_path: Option<&Path>,
    ) -> Result<FileReport, DetectError> {
        let mut parser = JavaParser::new().map_err(|e| parse_error(test_path, e))?;
        let test_unit = parser
            .parse_unit(test_source)
            .map_err(|e| parse_error(test_path, e))?;
        let production_unit = match (production_source, production_path) {
            (Some(source), Some(path)) => {
                Some(parser.parse_unit(source).map_err(|e| parse_error(path, e))?)
            }
            _ => None,
        };
        Ok(self.run_catalog(
            &test_unit,
            production_unit.as_ref(),
            test_path,
            production_path,
        ))
    }

    fn run_catalog(
        &self,
        test_unit: &CompilationUnit,
        production_unit: Option<&CompilationUnit>,
        test_path: &Path,
        production_path: Option<&Path>,
    ) -> FileReport {
        let test_name = stem(test_path);
        let production_name = production_path.map(stem);
        let mut smells = Vec::new();
        for mut analyzer in smells::catalog(&self.thresholds) {
            match analyzer.analyze(
                test_unit,
                production_unit,
                &test_name,
                production_name.as_deref(),
            ) {
                Ok(()) => smells.push(Some(analyzer.result().clone())),
                Err(SmellError::MissingProductionFile { smell }) => {
                    debug!("skipping {smell} for {}: no production file", test_path.display());
                    smells.push(None);
                }
            }
        }
        FileReport {
            test_path: test_path.to_path_buf(),
            production_path: production_path.map(Path::to_path_buf),
            test_method_count: classify::count_test_methods(test_unit),
            smells,
        }
    }

    /// Analyze entries sequentially, one result per entry.
    pub fn detect_many(&self, entries: &[ManifestEntry]) -> Vec<Result<FileReport, DetectError>> {
        entries.iter().map(|entry| self.detect(entry)).collect()
    }

    /// Analyze entries in parallel. Files are independent analysis
    /// units; results keep manifest order.
    pub fn detect_parallel(
        &self,
        entries: &[ManifestEntry],
    ) -> Vec<Result<FileReport, DetectError>> {
        entries.par_iter().map(|entry| self.detect(entry)).collect()
    }
}

fn read(path: &Path) -> Result<String, DetectError> {
    fs::read_to_string(path).map_err(|source| DetectError::FileAccess {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_error(path: &Path, err: anyhow::Error) -> DetectError {
    DetectError::Parse {
        path: path.to_path_buf(),
        detail: err.to_string(),
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

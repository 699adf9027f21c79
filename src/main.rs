use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use std::process;

use sniff::config::Thresholds;
use sniff::engine::SmellDetector;
use sniff::reporter::{json, ConsoleReporter};
use sniff::{FileReport, ManifestEntry};

/// Test smell detector for JUnit test suites
#[derive(Parser)]
#[command(name = "sniff", version, about)]
struct Cli {
    /// Manifest file: one testPath,productionPath line per entry
    manifest: PathBuf,

    /// Emit JSON instead of console output
    #[arg(long)]
    json: bool,

    /// Pretty-print the JSON output
    #[arg(long, requires = "json")]
    pretty: bool,

    /// Threshold settings file (JSON)
    #[arg(long, value_name = "FILE")]
    thresholds: Option<PathBuf>,

    /// Write output to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Analyze manifest entries in parallel
    #[arg(long)]
    parallel: bool,

    /// Suppress console output, keep errors
    #[arg(long, short)]
    quiet: bool,

    /// Show skipped analyzers per file
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("{} {err:#}", "error:".red().bold());
        process::exit(2);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let thresholds = match &cli.thresholds {
        Some(path) => Thresholds::load(path)?,
        None => Thresholds::default(),
    };
    let entries = load_manifest(&cli.manifest)?;

    let detector = SmellDetector::new(thresholds);
    let results = if cli.parallel {
        detector.detect_parallel(&entries)
    } else {
        detector.detect_many(&entries)
    };

    let mut reports: Vec<FileReport> = Vec::new();
    let mut failures = 0usize;
    for result in results {
        match result {
            Ok(report) => reports.push(report),
            Err(err) => {
                let err = anyhow::Error::new(err);
                eprintln!("{} {err:#}", "error:".red().bold());
                failures += 1;
            }
        }
    }

    let names = detector.smell_names();
    if cli.json {
        let body = json::render_many(&reports, cli.pretty)?;
        match &cli.out {
            Some(path) => fs::write(path, body)
                .with_context(|| format!("Failed to write report: {}", path.display()))?,
            None => println!("{body}"),
        }
    } else if !cli.quiet {
        let reporter = if cli.verbose {
            ConsoleReporter::new().verbose()
        } else {
            ConsoleReporter::new()
        };
        reporter.report_many(&reports, &names);
    }

    if failures > 0 {
        anyhow::bail!("{failures} file(s) could not be analyzed");
    }
    Ok(())
}

fn load_manifest(path: &PathBuf) -> Result<Vec<ManifestEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
    let entries: Vec<ManifestEntry> = content.lines().filter_map(ManifestEntry::parse_line).collect();
    if entries.is_empty() {
        anyhow::bail!("manifest {} contains no entries", path.display());
    }
    Ok(entries)
}

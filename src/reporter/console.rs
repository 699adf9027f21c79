//! Console reporter with colored output

use colored::Colorize;

use crate::FileReport;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to show clean analyzers and skipped entries
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single file's analysis
    pub fn report(&self, report: &FileReport, catalog_names: &[&str]) {
        println!();
        println!(
            "{}",
            format!("Test smells: {}", report.test_path.display()).bold()
        );
        match &report.production_path {
            Some(path) => println!("   Production: {}", path.display()),
            None => println!("   Production: {}", "none".dimmed()),
        }
        println!("   Test methods: {}", report.test_method_count);

        let smells = report.smell_map();
        if smells.is_empty() {
            println!("   {}", "No smells detected".green());
        } else {
            for (name, entry) in &smells {
                println!(
                    "   {} (score {}): {}",
                    name.yellow().bold(),
                    entry.score,
                    entry.methods.join(", ")
                );
            }
        }

        if self.verbose {
            let skipped = report.skipped_analyzers(catalog_names);
            if !skipped.is_empty() {
                println!("   {} {}", "Skipped:".dimmed(), skipped.join(", ").dimmed());
            }
        }
    }

    /// Report multiple files with a closing summary line
    pub fn report_many(&self, reports: &[FileReport], catalog_names: &[&str]) {
        for report in reports {
            self.report(report, catalog_names);
        }
        let smelly_files = reports.iter().filter(|r| !r.smell_map().is_empty()).count();
        println!();
        println!(
            "{} file(s) analyzed, {} with smells",
            reports.len(),
            smelly_files
        );
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

//! Output formatting and progress reporting

use console::{style, Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tactile::{OutcomeStatus, ScenarioOutcome, SuiteReport};

/// Output format for suite results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text on stderr
    #[default]
    Text,
    /// JSON document on stdout
    Json,
}

/// Progress reporter for a suite run
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            progress_bar: None,
            use_color,
            quiet,
        }
    }

    /// Start a progress bar over `total` scenarios
    pub fn start_progress(&mut self, total: u64, message: &str) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message(message.to_string());
        self.progress_bar = Some(pb);
    }

    /// Increment progress
    pub fn increment(&self, delta: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(delta);
        }
    }

    /// Finish progress bar
    pub fn finish(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }

    fn line(&self, text: &str) {
        let write = || {
            let _ = self.term.write_line(text);
        };
        match self.progress_bar {
            Some(ref pb) => pb.suspend(write),
            None => write(),
        }
    }

    fn prefixed(&self, symbol: &str, plain: &str, color: Style, message: &str) -> String {
        let prefix = if self.use_color {
            color.bold().apply_to(symbol).to_string()
        } else {
            plain.to_string()
        };
        format!("{prefix} {message}")
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.line(&self.prefixed("ℹ", "INFO", Style::new().blue(), message));
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }

        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };

        self.line("");
        self.line(&styled);
    }

    /// Print one scenario outcome and advance the bar
    pub fn outcome(&self, outcome: &ScenarioOutcome) {
        if let Some(line) = self.outcome_line(outcome) {
            self.line(&line);
        }
        self.increment(1);
    }

    fn outcome_line(&self, outcome: &ScenarioOutcome) -> Option<String> {
        let timing = format!("{} ({}ms)", outcome.name, outcome.duration_ms);
        let (symbol, plain, color, message) = match outcome.status {
            // failures are shown even in quiet mode
            OutcomeStatus::Failed => {
                let message = outcome.message.as_deref().unwrap_or("failed");
                ("✗", "FAIL", Style::new().red(), format!("{timing}: {message}"))
            }
            _ if self.quiet => return None,
            OutcomeStatus::Passed => ("✓", "PASS", Style::new().green(), timing),
            OutcomeStatus::ExpectedFailure => {
                ("ℹ", "INFO", Style::new().blue(), format!("{timing} [xfail]"))
            }
            OutcomeStatus::UnexpectedPass => {
                ("⚠", "WARN", Style::new().yellow(), format!("{timing} [xpass]"))
            }
        };
        Some(self.prefixed(symbol, plain, color, &message))
    }

    /// Print the suite summary
    pub fn summary(&self, report: &SuiteReport) {
        if let Some(line) = self.summary_line(report) {
            self.line("");
            self.line(&line);
        }
    }

    fn summary_line(&self, report: &SuiteReport) -> Option<String> {
        let failed = report.failed();
        if self.quiet && failed == 0 {
            return None;
        }

        let counts = format!(
            "{} scenarios on {} in {:.2}s ({} passed, {} failed, {} xfail, {} xpass)",
            report.total(),
            report.browser,
            report.duration().as_secs_f64(),
            report.passed(),
            failed,
            report.expected_failures(),
            report.unexpected_passes(),
        );

        let status = match (failed > 0, self.use_color) {
            (true, true) => Style::new().red().bold().apply_to("FAILED").to_string(),
            (false, true) => Style::new().green().bold().apply_to("PASSED").to_string(),
            (true, false) => "FAILED".to_string(),
            (false, false) => "PASSED".to_string(),
        };
        Some(format!("{status} {counts}"))
    }
}

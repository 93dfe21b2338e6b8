//! Sequential scenario runner

use super::{registry, Harness, Scenario};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// How a scenario ended, taking its markers into account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Passed, no marker applied
    Passed,
    /// Failed, no marker applied
    Failed,
    /// Failed as a marker predicted
    ExpectedFailure,
    /// Passed although a marker predicted failure
    UnexpectedPass,
}

impl OutcomeStatus {
    /// Classify a raw pass/fail against whether failure was expected
    #[must_use]
    pub const fn classify(passed: bool, expected_failure: bool) -> Self {
        match (passed, expected_failure) {
            (true, false) => Self::Passed,
            (false, false) => Self::Failed,
            (false, true) => Self::ExpectedFailure,
            (true, true) => Self::UnexpectedPass,
        }
    }

    /// Short label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::ExpectedFailure => "xfail",
            Self::UnexpectedPass => "xpass",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Scenario name
    pub name: String,
    /// Classified status
    pub status: OutcomeStatus,
    /// Error message if the body failed
    pub message: Option<String>,
    /// Wall time in milliseconds
    pub duration_ms: u64,
}

/// Aggregated scenario outcomes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Browser the suite ran against
    pub browser: String,
    /// Individual outcomes, in execution order
    pub outcomes: Vec<ScenarioOutcome>,
    /// Total wall time in milliseconds
    pub duration_ms: u64,
}

impl SuiteReport {
    fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// Number of passed scenarios
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(OutcomeStatus::Passed)
    }

    /// Number of failed scenarios
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(OutcomeStatus::Failed)
    }

    /// Number of expected failures
    #[must_use]
    pub fn expected_failures(&self) -> usize {
        self.count(OutcomeStatus::ExpectedFailure)
    }

    /// Number of unexpected passes
    #[must_use]
    pub fn unexpected_passes(&self) -> usize {
        self.count(OutcomeStatus::UnexpectedPass)
    }

    /// Total number of scenarios run
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// No scenario failed without a marker
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Failed scenarios
    #[must_use]
    pub fn failures(&self) -> Vec<&ScenarioOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status == OutcomeStatus::Failed)
            .collect()
    }

    /// Total duration
    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Runs scenarios one after another against a single harness
#[derive(Debug, Clone, Default)]
pub struct SuiteRunner {
    filter: Option<String>,
    fail_fast: bool,
}

impl SuiteRunner {
    /// Create a runner for every registered scenario
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only run scenarios whose name contains `filter`
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Stop at the first unexpected failure
    #[must_use]
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Scenarios selected by the filter, in registry order
    #[must_use]
    pub fn select(&self) -> Vec<&'static Scenario> {
        registry()
            .iter()
            .filter(|s| self.filter.as_deref().map_or(true, |f| s.name.contains(f)))
            .collect()
    }

    /// Run one scenario and classify it
    pub async fn run_scenario(&self, harness: &Harness, scenario: &Scenario) -> ScenarioOutcome {
        let expected = scenario.expected_failure(harness.config());
        info!(scenario = scenario.name, xfail = expected.is_some(), "scenario started");

        let start = Instant::now();
        let result = (scenario.run)(harness).await;
        let duration_ms = millis(start.elapsed());

        // a failed sequence may leave keys or buttons down
        if let Err(e) = harness.session().release_actions().await {
            warn!(scenario = scenario.name, error = %e, "failed to release actions");
        }

        let status = OutcomeStatus::classify(result.is_ok(), expected.is_some());
        if status == OutcomeStatus::UnexpectedPass {
            if let Some(marker) = expected {
                warn!(scenario = scenario.name, %marker, "scenario passed unexpectedly");
            }
        }
        info!(scenario = scenario.name, %status, duration_ms, "scenario finished");

        ScenarioOutcome {
            name: scenario.name.to_string(),
            status,
            message: result.err().map(|e| e.to_string()),
            duration_ms,
        }
    }

    /// Run every selected scenario
    pub async fn run(&self, harness: &Harness) -> SuiteReport {
        self.run_with(harness, |_| {}).await
    }

    /// Run every selected scenario, reporting each outcome as it completes
    pub async fn run_with<F>(&self, harness: &Harness, mut on_outcome: F) -> SuiteReport
    where
        F: FnMut(&ScenarioOutcome),
    {
        let start = Instant::now();
        let mut report = SuiteReport {
            browser: harness.session().browser_name().to_string(),
            ..SuiteReport::default()
        };

        for scenario in self.select() {
            let outcome = self.run_scenario(harness, scenario).await;
            on_outcome(&outcome);
            let stop = self.fail_fast && outcome.status == OutcomeStatus::Failed;
            report.outcomes.push(outcome);
            if stop {
                warn!("stopping after first failure");
                break;
            }
        }

        report.duration_ms = millis(start.elapsed());
        report
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod status_tests {
        use super::*;

        #[test]
        fn test_classify() {
            assert_eq!(OutcomeStatus::classify(true, false), OutcomeStatus::Passed);
            assert_eq!(OutcomeStatus::classify(false, false), OutcomeStatus::Failed);
            assert_eq!(
                OutcomeStatus::classify(false, true),
                OutcomeStatus::ExpectedFailure
            );
            assert_eq!(
                OutcomeStatus::classify(true, true),
                OutcomeStatus::UnexpectedPass
            );
        }

        #[test]
        fn test_serde_names() {
            assert_eq!(
                serde_json::to_string(&OutcomeStatus::ExpectedFailure).unwrap(),
                "\"expected_failure\""
            );
            assert_eq!(OutcomeStatus::UnexpectedPass.to_string(), "xpass");
        }
    }

    mod report_tests {
        use super::*;

        fn outcome(name: &str, status: OutcomeStatus) -> ScenarioOutcome {
            ScenarioOutcome {
                name: name.to_string(),
                status,
                message: None,
                duration_ms: 1,
            }
        }

        #[test]
        fn test_counts() {
            let report = SuiteReport {
                browser: "mock".to_string(),
                outcomes: vec![
                    outcome("a", OutcomeStatus::Passed),
                    outcome("b", OutcomeStatus::ExpectedFailure),
                    outcome("c", OutcomeStatus::UnexpectedPass),
                    outcome("d", OutcomeStatus::Passed),
                ],
                duration_ms: 4,
            };
            assert_eq!(report.total(), 4);
            assert_eq!(report.passed(), 2);
            assert_eq!(report.expected_failures(), 1);
            assert_eq!(report.unexpected_passes(), 1);
            assert!(report.is_success());
            assert!(report.failures().is_empty());
        }

        #[test]
        fn test_failure_breaks_success() {
            let report = SuiteReport {
                outcomes: vec![outcome("a", OutcomeStatus::Failed)],
                ..SuiteReport::default()
            };
            assert!(!report.is_success());
            assert_eq!(report.failures()[0].name, "a");
        }
    }

    mod selection_tests {
        use super::*;

        #[test]
        fn test_select_all() {
            assert_eq!(SuiteRunner::new().select().len(), registry().len());
        }

        #[test]
        fn test_select_filtered() {
            let names: Vec<_> = SuiteRunner::new()
                .with_filter("pause")
                .select()
                .iter()
                .map(|s| s.name)
                .collect();
            assert_eq!(names, vec!["pause_on_keyboard", "pause_on_pointer"]);
        }

        #[test]
        fn test_select_none() {
            assert!(SuiteRunner::new().with_filter("zzz").select().is_empty());
        }
    }
}

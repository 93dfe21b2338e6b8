//! Interaction scenarios
//!
//! Each scenario loads a page, locates elements, performs one or more
//! composed action sequences and checks the DOM effect. Scenarios that a
//! given browser or a remote grid is known to get wrong carry an expected
//! failure [`Marker`]; the [`SuiteRunner`] classifies their outcome instead of
//! counting it as a failure.
//!
//! ```ignore
//! let harness = Harness::new(session, server.pages(), config);
//! let report = SuiteRunner::new().run(&harness).await;
//! assert!(report.is_success());
//! ```

mod runner;
pub mod scenarios;

pub use runner::{OutcomeStatus, ScenarioOutcome, SuiteReport, SuiteRunner};

use crate::config::{BrowserFamily, SuiteConfig};
use crate::pages::Pages;
use crate::result::InteractionResult;
use crate::session::Session;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

/// What an expected-failure marker applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerTarget {
    /// A browser family
    Browser(BrowserFamily),
    /// Any session on a remote grid
    Remote,
}

impl fmt::Display for MarkerTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Browser(browser) => write!(f, "{browser}"),
            Self::Remote => f.write_str("remote"),
        }
    }
}

/// Expected failure marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker {
    /// Where the failure is expected
    pub target: MarkerTarget,
    /// Why, if known
    pub reason: Option<&'static str>,
}

impl Marker {
    /// Expect failure on `target`
    #[must_use]
    pub const fn xfail(target: MarkerTarget) -> Self {
        Self {
            target,
            reason: None,
        }
    }

    /// Attach a reason
    #[must_use]
    pub const fn because(mut self, reason: &'static str) -> Self {
        self.reason = Some(reason);
        self
    }

    /// Whether this marker applies to a run with `config`
    #[must_use]
    pub fn applies_to(&self, config: &SuiteConfig) -> bool {
        match self.target {
            MarkerTarget::Browser(browser) => browser == config.browser,
            MarkerTarget::Remote => config.remote,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            Some(reason) => write!(f, "xfail({}: {reason})", self.target),
            None => write!(f, "xfail({})", self.target),
        }
    }
}

/// Scenario body
pub type ScenarioFn = for<'a> fn(&'a Harness) -> BoxFuture<'a, InteractionResult<()>>;

/// A named interaction scenario
#[derive(Clone, Copy)]
pub struct Scenario {
    /// Unique name
    pub name: &'static str,
    /// One-line summary
    pub description: &'static str,
    /// Expected failure markers
    pub markers: &'static [Marker],
    /// Body
    pub run: ScenarioFn,
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("markers", &self.markers)
            .finish_non_exhaustive()
    }
}

impl Scenario {
    /// First marker that applies to `config`
    #[must_use]
    pub fn expected_failure(&self, config: &SuiteConfig) -> Option<&'static Marker> {
        self.markers.iter().find(|m| m.applies_to(config))
    }
}

/// Every scenario, in execution order
#[must_use]
pub fn registry() -> &'static [Scenario] {
    &scenarios::SCENARIOS
}

/// Look up a scenario by name
#[must_use]
pub fn find(name: &str) -> Option<&'static Scenario> {
    registry().iter().find(|s| s.name == name)
}

/// What a scenario runs against: one session, the pages and the config
#[derive(Clone)]
pub struct Harness {
    session: Arc<dyn Session>,
    pages: Pages,
    config: SuiteConfig,
}

impl fmt::Debug for Harness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Harness")
            .field("browser", &self.session.browser_name())
            .field("pages", &self.pages)
            .field("config", &self.config)
            .finish()
    }
}

impl Harness {
    /// Create a harness
    pub fn new(session: Arc<dyn Session>, pages: Pages, config: SuiteConfig) -> Self {
        Self {
            session,
            pages,
            config,
        }
    }

    /// The session
    #[must_use]
    pub fn session(&self) -> &dyn Session {
        self.session.as_ref()
    }

    /// Page fixture
    #[must_use]
    pub const fn pages(&self) -> &Pages {
        &self.pages
    }

    /// Run configuration
    #[must_use]
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Navigate to a bundled page
    pub async fn load(&self, name: &str) -> InteractionResult<()> {
        self.pages.load(self.session(), name).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_names_unique() {
        let names: HashSet<_> = registry().iter().map(|s| s.name).collect();
        assert_eq!(names.len(), registry().len());
        assert_eq!(registry().len(), 12);
    }

    #[test]
    fn test_find() {
        assert_eq!(find("move_and_click").unwrap().name, "move_and_click");
        assert!(find("no_such_scenario").is_none());
    }

    #[test]
    fn test_marker_applies() {
        let safari = SuiteConfig::default().with_browser(BrowserFamily::Safari);
        let remote_chrome = SuiteConfig::default().with_remote(true);

        let marker = Marker::xfail(MarkerTarget::Browser(BrowserFamily::Safari));
        assert!(marker.applies_to(&safari));
        assert!(!marker.applies_to(&remote_chrome));

        let marker = Marker::xfail(MarkerTarget::Remote);
        assert!(marker.applies_to(&remote_chrome));
        assert!(!marker.applies_to(&safari));
    }

    #[test]
    fn test_marker_display() {
        assert_eq!(
            Marker::xfail(MarkerTarget::Browser(BrowserFamily::Firefox)).to_string(),
            "xfail(firefox)"
        );
        assert_eq!(
            Marker::xfail(MarkerTarget::Remote)
                .because("Fails on Travis")
                .to_string(),
            "xfail(remote: Fails on Travis)"
        );
    }

    #[test]
    fn test_expected_failures_per_target() {
        let chrome = SuiteConfig::default();
        let firefox = SuiteConfig::default().with_browser(BrowserFamily::Firefox);
        let safari = SuiteConfig::default().with_browser(BrowserFamily::Safari);
        let remote = SuiteConfig::default()
            .with_browser(BrowserFamily::Edge)
            .with_remote(true);

        let xfail = |name: &str, config: &SuiteConfig| {
            find(name).unwrap().expected_failure(config).is_some()
        };

        assert!(xfail("double_click", &chrome));
        assert!(!xfail("move_and_click", &chrome));
        assert!(xfail("pause_on_keyboard", &firefox));
        assert!(!xfail("pause_on_pointer", &firefox));
        assert!(xfail("pen_pointer_properties", &firefox));
        assert!(xfail("sending_keys_with_modifier", &safari));
        assert!(!xfail("sending_keys_with_modifier", &firefox));
        for name in [
            "sending_keys_with_modifier",
            "pause_on_keyboard",
            "double_click",
            "pen_pointer_properties",
        ] {
            assert!(xfail(name, &remote), "{name} should be xfail on remote");
        }
        assert!(!xfail("drag_and_drop", &remote));
    }
}

//! Suite configuration
//!
//! Values come from `TACTILE_*` environment variables (see
//! [`SuiteConfig::from_env`]) and can be overridden with the `with_*`
//! builders. The CLI maps its flags onto the same builders.

use crate::result::{InteractionError, InteractionResult};
use crate::wait::{DEFAULT_ELEMENT_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable holding the WebDriver endpoint
pub const ENV_WEBDRIVER_URL: &str = "TACTILE_WEBDRIVER_URL";
/// Environment variable selecting the browser family
pub const ENV_BROWSER: &str = "TACTILE_BROWSER";
/// Environment variable marking the endpoint as a remote grid
pub const ENV_REMOTE: &str = "TACTILE_REMOTE";
/// Environment variable toggling headless mode
pub const ENV_HEADLESS: &str = "TACTILE_HEADLESS";
/// Environment variable with the host browsers use to reach the page server
pub const ENV_PAGES_HOST: &str = "TACTILE_PAGES_HOST";
/// Environment variable with a directory overriding the bundled pages
pub const ENV_PAGES_DIR: &str = "TACTILE_PAGES_DIR";
/// Environment variable with an external base URL serving the pages
pub const ENV_PAGES_URL: &str = "TACTILE_PAGES_URL";

/// Default HTTP timeout per WebDriver command (60 seconds)
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 60_000;

/// Browser family a session drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserFamily {
    /// Chrome / Chromium
    #[default]
    Chrome,
    /// Firefox
    Firefox,
    /// Safari
    Safari,
    /// Microsoft Edge
    Edge,
}

impl BrowserFamily {
    /// All supported families
    pub const ALL: [Self; 4] = [Self::Chrome, Self::Firefox, Self::Safari, Self::Edge];

    /// W3C `browserName`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Firefox => "firefox",
            Self::Safari => "safari",
            Self::Edge => "MicrosoftEdge",
        }
    }

    /// Capabilities for `alwaysMatch`
    #[must_use]
    pub fn capabilities(self, headless: bool) -> Value {
        let mut caps = json!({ "browserName": self.as_str() });
        if headless {
            match self {
                Self::Chrome => {
                    caps["goog:chromeOptions"] = json!({ "args": ["--headless=new"] });
                }
                Self::Edge => {
                    caps["ms:edgeOptions"] = json!({ "args": ["--headless=new"] });
                }
                Self::Firefox => {
                    caps["moz:firefoxOptions"] = json!({ "args": ["-headless"] });
                }
                // safaridriver has no headless mode
                Self::Safari => {}
            }
        }
        caps
    }
}

impl fmt::Display for BrowserFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Chrome => "chrome",
            Self::Firefox => "firefox",
            Self::Safari => "safari",
            Self::Edge => "edge",
        };
        f.write_str(name)
    }
}

impl FromStr for BrowserFamily {
    type Err = InteractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chrome" | "chromium" => Ok(Self::Chrome),
            "firefox" | "gecko" => Ok(Self::Firefox),
            "safari" => Ok(Self::Safari),
            "edge" | "msedge" | "microsoftedge" => Ok(Self::Edge),
            other => Err(InteractionError::config(format!(
                "unknown browser '{other}' (expected chrome, firefox, safari or edge)"
            ))),
        }
    }
}

/// Configuration for a suite run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// WebDriver endpoint (e.g. `http://localhost:4444`)
    pub webdriver_url: Option<String>,
    /// Browser family to request
    pub browser: BrowserFamily,
    /// Endpoint is a remote grid rather than a local driver
    pub remote: bool,
    /// Request a headless browser
    pub headless: bool,
    /// Host the browser uses to reach the page server
    pub pages_host: String,
    /// Port for the page server (0 picks a free port)
    pub pages_port: u16,
    /// Directory whose files take precedence over the bundled pages
    pub pages_dir: Option<PathBuf>,
    /// External base URL serving the pages; disables the built-in server
    pub pages_url: Option<String>,
    /// How long to wait for late elements
    pub element_timeout: Duration,
    /// How often to poll while waiting
    pub poll_interval: Duration,
    /// Timeout per WebDriver HTTP request
    pub http_timeout: Duration,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            webdriver_url: None,
            browser: BrowserFamily::default(),
            remote: false,
            headless: true,
            pages_host: "127.0.0.1".to_string(),
            pages_port: 0,
            pages_dir: None,
            pages_url: None,
            element_timeout: Duration::from_millis(DEFAULT_ELEMENT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            http_timeout: Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS),
        }
    }
}

fn parse_bool(name: &str, value: &str) -> InteractionResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(InteractionError::config(format!(
            "{name}: expected a boolean, got '{other}'"
        ))),
    }
}

impl SuiteConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from the process environment
    pub fn from_env() -> InteractionResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> InteractionResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // blank string settings count as unset
        let text = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();
        if let Some(url) = text(ENV_WEBDRIVER_URL) {
            config.webdriver_url = Some(url);
        }
        if let Some(browser) = lookup(ENV_BROWSER) {
            config.browser = browser.parse()?;
        }
        if let Some(remote) = lookup(ENV_REMOTE) {
            config.remote = parse_bool(ENV_REMOTE, &remote)?;
        }
        if let Some(headless) = lookup(ENV_HEADLESS) {
            config.headless = parse_bool(ENV_HEADLESS, &headless)?;
        }
        if let Some(host) = text(ENV_PAGES_HOST) {
            config.pages_host = host;
        }
        config.pages_dir = text(ENV_PAGES_DIR).map(PathBuf::from);
        config.pages_url = text(ENV_PAGES_URL);
        Ok(config)
    }

    /// Set WebDriver endpoint
    #[must_use]
    pub fn with_webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.webdriver_url = Some(url.into());
        self
    }

    /// Set browser family
    #[must_use]
    pub const fn with_browser(mut self, browser: BrowserFamily) -> Self {
        self.browser = browser;
        self
    }

    /// Mark the endpoint as a remote grid
    #[must_use]
    pub const fn with_remote(mut self, remote: bool) -> Self {
        self.remote = remote;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set page server host
    #[must_use]
    pub fn with_pages_host(mut self, host: impl Into<String>) -> Self {
        self.pages_host = host.into();
        self
    }

    /// Set page server port
    #[must_use]
    pub const fn with_pages_port(mut self, port: u16) -> Self {
        self.pages_port = port;
        self
    }

    /// Override bundled pages with files from a directory
    #[must_use]
    pub fn with_pages_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.pages_dir = Some(dir.into());
        self
    }

    /// Use an external page host instead of the built-in server
    #[must_use]
    pub fn with_pages_url(mut self, url: impl Into<String>) -> Self {
        self.pages_url = Some(url.into());
        self
    }

    /// Set element-availability timeout
    #[must_use]
    pub const fn with_element_timeout(mut self, timeout: Duration) -> Self {
        self.element_timeout = timeout;
        self
    }

    /// Set polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set HTTP timeout
    #[must_use]
    pub const fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// WebDriver endpoint or a configuration error naming the variable to set
    pub fn require_webdriver_url(&self) -> InteractionResult<&str> {
        self.webdriver_url.as_deref().ok_or_else(|| {
            InteractionError::config(format!(
                "no WebDriver endpoint configured (set {ENV_WEBDRIVER_URL} or pass --webdriver-url)"
            ))
        })
    }
}

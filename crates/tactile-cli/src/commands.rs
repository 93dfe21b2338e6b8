//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tactile::BrowserFamily;

/// Tactile: W3C WebDriver pointer and keyboard interaction suite
#[derive(Parser, Debug)]
#[command(name = "tactile")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run interaction scenarios against a WebDriver endpoint
    Run(RunArgs),

    /// List scenarios and their expected failures
    List(ListArgs),

    /// Serve the test pages until interrupted
    Serve(ServeArgs),
}

/// Parse a browser family name for clap
fn parse_browser(s: &str) -> Result<BrowserFamily, String> {
    s.parse::<BrowserFamily>().map_err(|e| e.to_string())
}

/// Arguments for the run command
#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunArgs {
    /// Only run scenarios whose name contains this text
    #[arg(short, long)]
    pub filter: Option<String>,

    /// WebDriver endpoint (chromedriver, geckodriver, grid)
    #[arg(long, env = "TACTILE_WEBDRIVER_URL")]
    pub webdriver_url: Option<String>,

    /// Browser family to request (chrome, firefox, safari, edge)
    #[arg(short, long, value_parser = parse_browser)]
    pub browser: Option<BrowserFamily>,

    /// Treat the endpoint as a remote grid
    #[arg(long)]
    pub remote: bool,

    /// Request a headless browser
    #[arg(long, conflicts_with = "headed")]
    pub headless: bool,

    /// Request a visible browser window
    #[arg(long)]
    pub headed: bool,

    /// Host the browser uses to reach the page server
    #[arg(long)]
    pub pages_host: Option<String>,

    /// Port for the page server (0 picks a free port)
    #[arg(long)]
    pub pages_port: Option<u16>,

    /// Serve pages from this directory before the bundled copies
    #[arg(long)]
    pub pages_dir: Option<PathBuf>,

    /// Use pages already served at this URL instead of starting a server
    #[arg(long)]
    pub pages_url: Option<String>,

    /// Stop at the first unexpected failure
    #[arg(long)]
    pub fail_fast: bool,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: FormatArg,
}

impl RunArgs {
    /// Headless override, if either flag was given
    #[must_use]
    pub const fn headless_override(&self) -> Option<bool> {
        if self.headless {
            Some(true)
        } else if self.headed {
            Some(false)
        } else {
            None
        }
    }
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Browser family to evaluate markers for
    #[arg(short, long, value_parser = parse_browser)]
    pub browser: Option<BrowserFamily>,

    /// Evaluate markers for a remote grid
    #[arg(long)]
    pub remote: bool,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// HTTP port to listen on
    #[arg(short, long, default_value = "8000")]
    pub port: u16,

    /// Host advertised in the printed URL
    #[arg(long)]
    pub pages_host: Option<String>,

    /// Serve pages from this directory before the bundled copies
    #[arg(short = 'd', long)]
    pub pages_dir: Option<PathBuf>,
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable lines
    #[default]
    Text,
    /// JSON document on stdout
    Json,
}

impl From<FormatArg> for crate::output::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

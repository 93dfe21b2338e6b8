//! Tactile CLI Library
//!
//! Command-line front end for the Tactile interaction suite: run scenarios
//! against a WebDriver endpoint, list them with their expected failures and
//! serve the bundled test pages.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
mod output;
mod runner;

pub use commands::{Cli, ColorArg, Commands, FormatArg, ListArgs, RunArgs, ServeArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, ProgressReporter};
pub use runner::{
    execute_list, execute_run, execute_serve, list_scenarios, suite_config, ScenarioListing,
};

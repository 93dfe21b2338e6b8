//! Command execution: suite runs, scenario listing and the page server

use crate::commands::{ListArgs, RunArgs, ServeArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{OutputFormat, ProgressReporter};
use serde::Serialize;
use std::sync::Arc;
use tactile::{
    suite, Harness, PageServer, Pages, RemoteSession, SuiteConfig, SuiteReport, SuiteRunner,
};
use tracing::{info, warn};

/// Environment config with `run` flags layered on top
pub fn suite_config(args: &RunArgs) -> CliResult<SuiteConfig> {
    let mut config = SuiteConfig::from_env()?;
    if let Some(url) = &args.webdriver_url {
        config.webdriver_url = Some(url.clone());
    }
    if let Some(browser) = args.browser {
        config.browser = browser;
    }
    if args.remote {
        config.remote = true;
    }
    if let Some(headless) = args.headless_override() {
        config.headless = headless;
    }
    if let Some(host) = &args.pages_host {
        config.pages_host = host.clone();
    }
    if let Some(port) = args.pages_port {
        config.pages_port = port;
    }
    if let Some(dir) = &args.pages_dir {
        config.pages_dir = Some(dir.clone());
    }
    if let Some(url) = &args.pages_url {
        config.pages_url = Some(url.clone());
    }
    Ok(config)
}

/// Connect, run the selected scenarios and tear everything down
pub async fn execute_run(cli: &CliConfig, args: &RunArgs) -> CliResult<SuiteReport> {
    let config = suite_config(args)?;
    config.require_webdriver_url()?;

    let runner = {
        let runner = SuiteRunner::new().with_fail_fast(cli.fail_fast);
        match &args.filter {
            Some(filter) => runner.with_filter(filter.clone()),
            None => runner,
        }
    };
    let selected = runner.select().len();
    if selected == 0 {
        return Err(CliError::config(format!(
            "no scenario matches '{}'",
            args.filter.as_deref().unwrap_or_default()
        )));
    }

    let (server, pages) = match &config.pages_url {
        Some(url) => (None, Pages::new(url.clone())),
        None => {
            let server = PageServer::start(&config).await?;
            let pages = server.pages();
            (Some(server), pages)
        }
    };

    let browser = config.browser;
    let session = Arc::new(RemoteSession::connect(&config).await?);
    let harness = Harness::new(session.clone(), pages, config);

    let text = cli.format == OutputFormat::Text;
    let quiet = cli.verbosity.is_quiet() || !text;
    let mut reporter = ProgressReporter::new(cli.color.should_color(), quiet);
    reporter.header(&format!("tactile: {selected} scenario(s) on {browser}"));
    reporter.start_progress(selected as u64, "scenarios");

    let report = runner
        .run_with(&harness, |outcome| reporter.outcome(outcome))
        .await;
    reporter.finish();

    if let Err(e) = session.quit().await {
        warn!(error = %e, "failed to close session");
    }
    if let Some(server) = server {
        server.shutdown().await;
    }

    if text {
        reporter.summary(&report);
    } else {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if report.is_success() {
        Ok(report)
    } else {
        Err(CliError::suite_failed(format!(
            "{} scenario(s) failed",
            report.failed()
        )))
    }
}

/// One row of `tactile list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioListing {
    /// Scenario name
    pub name: &'static str,
    /// One-line summary
    pub description: &'static str,
    /// Marker predicting failure for the chosen target
    pub expected_failure: Option<String>,
}

/// Scenarios with the marker that applies to the chosen target
pub fn list_scenarios(args: &ListArgs) -> CliResult<Vec<ScenarioListing>> {
    let mut config = SuiteConfig::from_env()?;
    if let Some(browser) = args.browser {
        config.browser = browser;
    }
    if args.remote {
        config.remote = true;
    }

    Ok(suite::registry()
        .iter()
        .map(|scenario| ScenarioListing {
            name: scenario.name,
            description: scenario.description,
            expected_failure: scenario.expected_failure(&config).map(ToString::to_string),
        })
        .collect())
}

/// Print the scenario list in the chosen format
pub fn execute_list(args: &ListArgs) -> CliResult<()> {
    let listings = list_scenarios(args)?;
    match OutputFormat::from(args.format) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listings)?),
        OutputFormat::Text => {
            for listing in &listings {
                let marker = listing.expected_failure.as_deref().unwrap_or("");
                println!("{:<30} {:<24} {}", listing.name, marker, listing.description);
            }
        }
    }
    Ok(())
}

/// Serve the test pages until Ctrl+C
pub async fn execute_serve(cli: &CliConfig, args: &ServeArgs) -> CliResult<()> {
    let mut config = SuiteConfig::default().with_pages_port(args.port);
    if let Some(host) = &args.pages_host {
        config.pages_host = host.clone();
    }
    config.pages_dir = args.pages_dir.clone();

    let server = PageServer::start(&config).await?;
    let reporter = ProgressReporter::new(cli.color.should_color(), cli.verbosity.is_quiet());
    reporter.info(&format!("Serving test pages at {}", server.url()));
    reporter.info("Press Ctrl+C to stop");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| CliError::runtime(format!("failed to listen for Ctrl+C: {e}")))?;
    info!("shutting down page server");
    server.shutdown().await;
    Ok(())
}

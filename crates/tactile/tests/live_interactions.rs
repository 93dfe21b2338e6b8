//! Full suite against a real WebDriver endpoint
//!
//! Skipped unless `TACTILE_WEBDRIVER_URL` points at chromedriver,
//! geckodriver or a grid:
//!
//! ```text
//! TACTILE_WEBDRIVER_URL=http://localhost:9515 cargo test --test live_interactions
//! ```

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use tactile::config::ENV_WEBDRIVER_URL;
use tactile::{Harness, PageServer, RemoteSession, SuiteConfig, SuiteRunner};

#[tokio::test]
async fn test_interaction_suite_live() {
    if std::env::var(ENV_WEBDRIVER_URL).is_err() {
        eprintln!("skipping: {ENV_WEBDRIVER_URL} not set");
        return;
    }
    tactile::logging::init_test_tracing();

    let config = SuiteConfig::from_env().expect("suite config");
    let server = if config.pages_url.is_some() {
        None
    } else {
        Some(PageServer::start(&config).await.expect("page server"))
    };
    let pages = server.as_ref().map_or_else(
        || tactile::Pages::new(config.pages_url.clone().unwrap_or_default()),
        PageServer::pages,
    );

    let session = Arc::new(RemoteSession::connect(&config).await.expect("session"));
    let harness = Harness::new(session.clone(), pages, config);
    let report = SuiteRunner::new().run(&harness).await;

    for outcome in &report.outcomes {
        eprintln!(
            "{:<32} {:<6} {}",
            outcome.name,
            outcome.status,
            outcome.message.as_deref().unwrap_or("")
        );
    }

    session.quit().await.expect("quit");
    if let Some(server) = server {
        server.shutdown().await;
    }
    assert!(report.is_success(), "failures: {:?}", report.failures());
}

//! Tactile CLI: drive the WebDriver interaction suite
//!
//! ## Usage
//!
//! ```bash
//! tactile run --webdriver-url http://localhost:9515       # Run every scenario
//! tactile run --browser firefox --filter drag              # Filter scenarios
//! tactile list --browser safari                            # Show expected failures
//! tactile serve --port 8000                                # Serve the test pages
//! ```

use clap::Parser;
use std::process::ExitCode;
use tactile::logging::{init_tracing, LogFormat};
use tactile_cli::{
    execute_list, execute_run, execute_serve, Cli, CliConfig, CliError, CliResult, ColorChoice,
    Commands, Verbosity,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(config.verbosity.log_level(), LogFormat::Text);

    match cli.command {
        Commands::Run(args) => {
            let config = config
                .with_format(args.format.into())
                .with_fail_fast(args.fail_fast);
            block_on(async { execute_run(&config, &args).await.map(|_| ()) })
        }
        Commands::List(args) => execute_list(&args),
        Commands::Serve(args) => block_on(execute_serve(&config, &args)),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.into();
    CliConfig::new().with_verbosity(verbosity).with_color(color)
}

fn block_on<F: std::future::Future<Output = CliResult<()>>>(future: F) -> CliResult<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create runtime: {e}")))?;
    rt.block_on(future)
}

mod cli;
mod logging;
mod operator;
mod settings;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use engine_logging::{engine_error, engine_info, engine_warn};
use harvester_core::RunSummary;
use harvester_engine::{
    AutoConfirm, HarvestError, HarvestSettings, Harvester, Navigator, Operator, RecordWriter,
    StaticNavigator,
};

use crate::cli::{Cli, Driver};
use crate::operator::LineOperator;

/// A run that could not finish: bad settings, no browser, unusable output
/// directory or an unreachable catalog.
const EXIT_FATAL: u8 = 2;
const EXIT_OK: u8 = 0;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return cli::exit_for_parse_error(err),
    };
    logging::initialize(cli.log_file.as_deref());

    let result = run(cli).await;
    if let Err(err) = &result {
        engine_error!("{:#}", err);
    }
    ExitCode::from(exit_status(&result))
}

/// Completed and operator-aborted runs alike exit cleanly; the summary is
/// already logged.
fn exit_status(result: &anyhow::Result<RunSummary>) -> u8 {
    match result {
        Ok(_) => EXIT_OK,
        Err(_) => EXIT_FATAL,
    }
}

async fn run(cli: Cli) -> anyhow::Result<RunSummary> {
    let settings = settings::resolve(&cli)?;
    let writer = RecordWriter::create(&cli.output_dir).map_err(HarvestError::OutputDir)?;
    engine_info!("Writing records to {}", writer.dir().display());

    let mut navigator = launch(cli.driver, &settings)
        .await
        .map_err(HarvestError::Session)?;
    let mut operator: Box<dyn Operator> = if cli.yes {
        Box::new(AutoConfirm)
    } else {
        Box::new(LineOperator::stdio())
    };

    let result = Harvester::new(navigator.as_mut(), operator.as_mut(), writer, settings)
        .run()
        .await;

    // The browser goes away whatever the run's outcome.
    if let Err(err) = navigator.shutdown().await {
        engine_warn!("Browser shutdown failed: {}", err);
    }

    result.context("harvest failed")
}

async fn launch(
    driver: Driver,
    settings: &HarvestSettings,
) -> Result<Box<dyn Navigator>, harvester_engine::NavError> {
    match driver {
        Driver::Static => Ok(Box::new(StaticNavigator::new(settings.request_timeout)?)),
        Driver::Chromium => launch_chromium(settings).await,
    }
}

#[cfg(feature = "chromium")]
async fn launch_chromium(
    settings: &HarvestSettings,
) -> Result<Box<dyn Navigator>, harvester_engine::NavError> {
    let navigator = harvester_engine::ChromiumNavigator::launch(&settings.browser).await?;
    Ok(Box::new(navigator))
}

#[cfg(not(feature = "chromium"))]
async fn launch_chromium(
    _settings: &HarvestSettings,
) -> Result<Box<dyn Navigator>, harvester_engine::NavError> {
    Err(harvester_engine::NavError::Browser(
        "built without the chromium feature; use --driver static".to_string(),
    ))
}

use clap::Parser;
use color_eyre::Result;
use gmaps_geo::{
    app::{cancel_on, App, Outcome, FAILURE_MESSAGE},
    cli::Cli,
    config::Config,
    logging,
};
use std::process::ExitCode;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let (mut config, config_err) = match Config::load(cli.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    cli.apply(&mut config);
    let _log_guard = logging::initialize_logging(&config.logging);
    if let Some(e) = config_err {
        warn!("{}. Using defaults.", e);
    }

    let app = App::from_config(&config)?;

    // Resolve off the main task; Ctrl-C abandons whatever hop is in flight.
    let url = cli.url.clone();
    let report = tokio::spawn(async move {
        app.run(&url, cancel_on(tokio::signal::ctrl_c())).await
    })
    .await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report.to_json())?);
    } else {
        if !cli.quiet && !report.trace.is_empty() {
            eprintln!("{}", report.trace);
        }
        match &report.outcome {
            Outcome::Resolved(geo) => println!("{geo}"),
            Outcome::Cancelled => eprintln!("cancelled"),
            Outcome::Unresolved | Outcome::Failed(_) => eprintln!("{FAILURE_MESSAGE}"),
        }
    }

    info!(outcome = ?report.outcome, "done");
    Ok(match report.outcome {
        Outcome::Resolved(_) => ExitCode::SUCCESS,
        Outcome::Cancelled => ExitCode::from(130),
        _ => ExitCode::FAILURE,
    })
}

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod auth;
mod cli;
mod clip;
mod config;
mod error;
mod notify;
mod options;
mod relay;
mod store;
#[cfg(test)]
mod testing;
mod twitch;

#[tokio::main(flavor = "current_thread")]
async fn run() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            return Err(err.into());
        }
    }

    let config = config::Config::from_cli(cli::Cli::parse())?;
    init_tracing(config.debug);

    let relay = relay::Relay::new(&config, config.http_client()?);
    let outcome = match relay.run(chrono::Utc::now()).await {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!(kind = ?err.kind(), "Run aborted");
            return Err(err.into());
        }
    };
    if let relay::RunOutcome::Announced { count, .. } = outcome {
        tracing::info!(count, "Announced new clips");
    }

    println!("{}", outcome.status_line());
    Ok(())
}

fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if debug {
            "clip_relay=debug"
        } else {
            "clip_relay=info"
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

mod cli;
mod commands;
mod error;
mod transport;

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use restaurantes_core::RestaurantClient;

use crate::cli::Cli;
use crate::commands::Context;
use crate::error::CliError;
use crate::transport::Transport;

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = Context {
        client: RestaurantClient::new(&cli.global.api_url),
        transport: Transport::new(Duration::from_secs(cli.global.timeout)),
        global: &cli.global,
    };
    tracing::debug!(command = ?cli.command, api_url = ctx.client.base_url(), "dispatching command");
    commands::dispatch(cli.command, &ctx)
}

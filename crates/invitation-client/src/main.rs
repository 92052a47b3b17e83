//! invitation CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::{Level, warn};

use invitation_client::cli::{Cli, Command, ConfigAction};
use invitation_client::commands::{self, watch::ViewOptions};
use invitation_client::config::ClientConfig;
use invitation_client::error::{ClientError, ClientResult};
use invitation_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else if cli.json {
        TracingConfig::json().with_level(Level::WARN)
    } else {
        TracingConfig::interactive()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let config_path = cli.config.clone().unwrap_or_else(ClientConfig::default_path);
    let config = if let Some(ref path) = cli.config {
        ClientConfig::load_from(path).map_err(ClientError::Config)?
    } else {
        ClientConfig::load().unwrap_or_else(|e| {
            warn!(error = %e, path = %config_path.display(), "Ignoring unreadable config");
            ClientConfig::default()
        })
    };

    let variant = cli.variant.unwrap_or(config.display.variant);
    let format = cli.output_format();

    match cli.command {
        Some(Command::Countdown { at }) => commands::countdown::run(&config, variant, at, format),
        Some(Command::CalendarLink { open, copy }) => {
            commands::calendar::run(&config, open, copy, format)
        }
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(&config_path),
        },
        Some(Command::Watch) | None => {
            let options = ViewOptions {
                variant,
                format,
                hyperlinks: config.display.hyperlinks && !cli.no_hyperlinks,
                seed: cli.seed.unwrap_or_else(rand::random),
            };
            commands::watch::run(&config, options).await
        }
    }
}

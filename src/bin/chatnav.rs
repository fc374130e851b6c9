//! Chatnav CLI Binary
//!
//! Replays shortcut scripts against fixture document snapshots.

use chatnav::cli::{self, Cli};
use chatnav::config::ChatnavConfig;
use chatnav::logging::{init_logging, LoggingConfig};
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let config = match ChatnavConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    if cli.print_config {
        match config.to_toml() {
            Ok(rendered) => {
                println!("{}", rendered);
                return;
            }
            Err(e) => {
                error!("Failed to render configuration: {}", e);
                process::exit(1);
            }
        }
    }

    info!("Chatnav replay starting");

    match cli::run(&cli, &config) {
        Ok(0) => {
            info!("Replay completed, all actions succeeded");
        }
        Ok(failures) => {
            info!(failures, "Replay completed with failed actions");
            process::exit(2);
        }
        Err(e) => {
            error!("Replay failed: {:#}", e);
            eprintln!("{:#}", e);
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, config: &ChatnavConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();

    if cli.quiet {
        logging.enabled = false;
    }
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }

    logging
}

// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storefront - local catalog, marketplace aggregation and payments.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod check;
mod serve;
mod shutdown;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use storefront_config::{ConfigError, StorefrontConfig};

/// Storefront back end.
#[derive(Parser, Debug)]
#[command(name = "storefront", version, about, long_about = None)]
struct Cli {
    /// Read this file instead of the standard config locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server.
    Serve,
    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Create or upgrade the database schema, then exit.
    Migrate,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Validate configuration and print a redacted summary.
    Check,
}

fn load(path: Option<&PathBuf>) -> Result<StorefrontConfig, Vec<ConfigError>> {
    match path {
        Some(path) => storefront_config::load_and_validate_path(path),
        None => storefront_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load(cli.config.as_ref()) {
        Ok(config) => config,
        Err(errors) => {
            storefront_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Config {
            action: ConfigAction::Check,
        } => {
            check::print_summary(&config);
            Ok(())
        }
        Commands::Migrate => serve::run_migrate(&config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

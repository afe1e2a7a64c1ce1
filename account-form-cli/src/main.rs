//! Account form CLI entry point
//!
//! Loads the account list from the local store file, applies one command and
//! writes the list back through the store's persist-after-mutate contract.

use std::process::ExitCode;
use std::sync::Arc;

use account_form_cli::commands::is_expected_failure;
use account_form_cli::{run, AppConfig, Cli, JsonFileStorage};
use account_form_core::AccountStore;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false),
        )
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    let config = AppConfig::from_cli(&cli);
    tracing::debug!("Using store file {}", config.store_file().display());

    let storage = Arc::new(JsonFileStorage::new(config.store_file()));
    let mut store = AccountStore::new(storage).with_storage_key(config.storage_key.clone());
    store.init_from_storage();

    let mut stdout = std::io::stdout().lock();
    match run(&cli.command, &mut store, cli.json, &mut stdout) {
        Ok(()) => {
            if cli.command.is_mutation() {
                tracing::debug!("{} accounts stored under {}", store.len(), store.storage_key());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            if is_expected_failure(&e) {
                tracing::warn!("{e:#}");
            } else {
                tracing::error!("{e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

//! mark - bookmarks with due-time reminders

pub mod cli;
pub mod command;
pub mod domain;
pub mod model;
pub mod reminder;
pub mod storage;

use anyhow::Result;
use clap::Parser;

use cli::{
    Cli, CliCommand,
    config::Config,
    handlers::{handle_completions, handle_operation, handle_shell, handle_watch},
};
use storage::JsonStorage;

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    init_logging(cli.verbose, config.log_level.as_deref());

    let storage = JsonStorage::new(config.data_file(cli.data.as_ref()));
    log::debug!("using data file {}", storage.path().display());

    match cli.command {
        CliCommand::Op(operation) => handle_operation(operation, &storage),
        CliCommand::Watch(args) => handle_watch(&args, &storage, config.scheduler()),
        CliCommand::Shell => handle_shell(&storage, config.scheduler()),
        CliCommand::Completions(args) => handle_completions(&args),
    }
}

/// `RUST_LOG` wins; otherwise `-v` picks the level, then the config file.
fn init_logging(verbose: u8, config_level: Option<&str>) {
    let level = match verbose {
        0 => config_level.unwrap_or("warn"),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

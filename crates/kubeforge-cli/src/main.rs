//! # kubeforge CLI
//!
//! Scaffolds Kubernetes API types, controllers and admission webhooks, then
//! wires them into the operator's entry point.
//!
//! `main` loads `.env`, parses flags, installs the tracing subscriber, loads
//! [`AppConfig`] and dispatches. Every failure is a [`CliError`] whose
//! category picks the exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                       |
//! |------|-------------------------------|
//! |  0   | Success                       |
//! |  1   | Internal / system error       |
//! |  2   | User / input error            |
//! |  3   | Not found (PROJECT, markers)  |
//! |  4   | Configuration error           |
//! |  5   | Conflict (files already exist)|

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands, CreateCommands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod project;

fn main() -> ExitCode {
    // Load .env before anything else, including tracing init.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here and must exit 0.
            let code = if e.use_stderr() { 2 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        project_dir = %cli.global.project_dir.display(),
        config = ?cli.global.config,
        format = ?cli.global.output_format,
        "kubeforge starting"
    );

    // init-config is how a missing --config file gets created.
    let require_config = !matches!(cli.command, Commands::InitConfig(_));
    let config = match AppConfig::load(cli.global.config.as_ref(), require_config) {
        Ok(cfg) => cfg,
        Err(e) => {
            let err = CliError::ConfigError {
                message: format!("{e:#}"),
                source: None,
            };
            return handle_error(err, cli.global.verbose > 0, cli.global.no_color);
        }
    };

    let output = OutputManager::new(&cli.global, &config);
    let verbose = cli.global.verbose > 0;
    let no_color = !output.supports_color();

    match run(cli, config, output) {
        Ok(()) => {
            info!("kubeforge completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose, no_color),
    }
}

/// Route the parsed subcommand to its handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::Create(CreateCommands::Api(args)) => {
            commands::api::execute(args, &cli.global, &config, &output)
        }
        Commands::Create(CreateCommands::Webhook(args)) => {
            commands::webhook::execute(args, &cli.global, &config, &output)
        }
        Commands::InitConfig(args) => commands::init_config::execute(args, &cli.global, &output),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Log, print to stderr, and convert to the process exit code.
fn handle_error(err: CliError, verbose: bool, no_color: bool) -> ExitCode {
    err.log();

    // stderr, so the message survives stdout redirection.
    let colored = !no_color && std::io::IsTerminal::is_terminal(&std::io::stderr());
    let msg = err.render(verbose, colored);
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

//! BloodSync operator CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod demo;
mod logging;
mod render;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::logging::{LogConfig, LogFormat, init_logging};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Stats => commands::run_stats(&cli.data_dir),
        Command::Inventory => commands::run_inventory(&cli.data_dir),
        Command::MatchRequest(args) => commands::run_match_request(&cli.data_dir, args),
        Command::OpenRequests(args) => commands::run_open_requests(&cli.data_dir, args),
        Command::RegisterDonor(args) => commands::run_register_donor(&cli.data_dir, args),
        Command::RegisterRequestor(args) => commands::run_register_requestor(&cli.data_dir, args),
        Command::CreateRequest(args) => commands::run_create_request(&cli.data_dir, args),
        Command::Accept(args) => commands::run_accept(&cli.data_dir, args),
        Command::ConfirmDonation(args) => commands::run_confirm_donation(&cli.data_dir, args),
        Command::DonateInventory(args) => commands::run_donate_inventory(&cli.data_dir, args),
        Command::Withdraw(args) => commands::run_withdraw(&cli.data_dir, args),
        Command::UseInventory(args) => commands::run_use_inventory(&cli.data_dir, args),
        Command::ConfirmDonor(args) => commands::run_confirm_donor(&cli.data_dir, args),
        Command::DemoData => demo::run_demo_data(&cli.data_dir),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

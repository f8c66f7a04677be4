//! leaddesk CLI.

use clap::{ColorChoice, Parser};
use lead_cli::config::AppConfig;
use lead_cli::logging::{LogConfig, LogFormat, init_logging};
use lead_cli::session::Session;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_choices, run_errors, run_export, run_list, run_sample, run_show, run_upload,
};
use crate::summary::print_upload_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    if let Command::Sample(args) = &cli.command {
        run_sample(args)?;
        return Ok(0);
    }
    let config = AppConfig::load(&cli.config)?;
    let session = Session::new(config, &cli.store, &cli.user).with_log_data(cli.log_data);
    match &cli.command {
        Command::Upload(args) => {
            let report = run_upload(&session, args)?;
            print_upload_summary(&report);
            Ok(if report.failures.is_empty() { 0 } else { 2 })
        }
        Command::List(args) => run_list(&session, args).map(|()| 0),
        Command::Show(args) => run_show(&session, args).map(|()| 0),
        Command::Export(args) => run_export(&session, args).map(|_| 0),
        Command::Errors(args) => run_errors(&session, args).map(|()| 0),
        Command::Sample(args) => run_sample(args).map(|()| 0),
        Command::Choices => run_choices(&session).map(|()| 0),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    let mut config = LogConfig::default()
        .with_level(level_filter)
        .with_format(format)
        .with_ansi(ansi)
        .with_log_file(cli.log_file.clone())
        .with_log_data(cli.log_data);
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config
}

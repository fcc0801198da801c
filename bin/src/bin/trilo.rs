use clap::Parser;
use std::{io, process::ExitCode};
use trilo_bin::{
    cli::{Cli, Command},
    commands::{self, Status},
    config::Config,
};
use trilo_log::LogConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match trilo_log::init(LogConfig {
        log_file_path: cli.log_file.clone(),
    }) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {e}");
            None
        },
    };

    match run(cli) {
        Ok(status) => status.into(),
        Err(e) => {
            tracing::error!(target: trilo_log::FILE_ONLY_TARGET, "{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: Cli) -> anyhow::Result<Status> {
    match cli.command {
        Command::Options { args } => {
            let config = Config::load_with_overrides(
                cli.config.as_deref(),
                Config::default_path().as_deref(),
            )?;
            commands::options::run(
                &config.default_args,
                &args,
                &mut io::stdout().lock(),
                &mut io::stderr().lock(),
            )
        },
        Command::Read { file } => {
            commands::read::run(&file, &mut io::stdout().lock())?;
            Ok(Status::Success)
        },
    }
}

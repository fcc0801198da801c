use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "trilo", version, about = "Example programs for the trilo option table")]
pub struct Cli {
    /// Write logs to this file, or to `trilo-<pid>.log` inside this directory
    #[arg(long, env = "TRILO_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, env = "TRILO_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse arguments with an option table and print what was set
    #[command(disable_help_flag = true)]
    Options {
        /// Arguments handed to the option table, `--help` included
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Print the contents of a text file
    Read {
        /// File to print
        file: PathBuf,
    },
}
